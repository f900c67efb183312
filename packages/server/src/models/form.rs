use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::form_question;
use crate::error::AppError;
use crate::utils::pesel;

/// A form with its questions, in declared order.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FormResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub description: String,
    pub year: Option<i32>,
    pub questions: Vec<QuestionResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: i32,
    pub title: String,
    /// One of `number`, `string`, `textbox`, `date`, `pesel`, `phone`.
    pub data_type: String,
    pub is_required: bool,
    pub is_locked: bool,
    pub answer: Option<AnswerResponse>,
}

/// The requester's stored answer to a question.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AnswerResponse {
    pub value_number: Option<i64>,
    pub value_string: Option<String>,
    pub value_date: Option<NaiveDate>,
}

/// One submitted answer. Exactly one value must be set, matching the
/// question's data type; all values null clears the answer.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AnswerInput {
    pub question_id: i32,
    pub value_number: Option<i64>,
    pub value_string: Option<String>,
    pub value_date: Option<NaiveDate>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerInput>,
}

/// Check one answer against its question's declared type.
pub fn validate_answer(
    question: &form_question::Model,
    input: &AnswerInput,
) -> Result<(), AppError> {
    let populated = usize::from(input.value_number.is_some())
        + usize::from(input.value_string.is_some())
        + usize::from(input.value_date.is_some());
    if populated == 0 {
        if question.is_required {
            return Err(AppError::Validation(format!(
                "Question '{}' requires an answer",
                question.title
            )));
        }
        return Ok(());
    }
    if populated > 1 {
        return Err(AppError::Validation(
            "An answer must set at most one value".into(),
        ));
    }
    let matches_type = (question.expects_number() && input.value_number.is_some())
        || (question.expects_date() && input.value_date.is_some())
        || (question.expects_string() && input.value_string.is_some());
    if !matches_type {
        return Err(AppError::Validation(format!(
            "Question '{}' expects a {} value",
            question.title, question.data_type
        )));
    }
    if question.data_type == form_question::TYPE_PESEL
        && let Some(value) = &input.value_string
    {
        pesel::validate(value)
            .map_err(|e| AppError::Validation(format!("Invalid PESEL: {e}")))?;
    }
    if let Some(value) = &input.value_string
        && value.len() > 100_000
    {
        return Err(AppError::Validation(
            "Answer must be at most 100000 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(data_type: &str, required: bool) -> form_question::Model {
        form_question::Model {
            id: 1,
            form_id: 1,
            title: "Pytanie".into(),
            data_type: data_type.into(),
            is_required: required,
            is_locked: false,
            order: 1,
        }
    }

    fn input(
        number: Option<i64>,
        string: Option<&str>,
        date: Option<NaiveDate>,
    ) -> AnswerInput {
        AnswerInput {
            question_id: 1,
            value_number: number,
            value_string: string.map(Into::into),
            value_date: date,
        }
    }

    #[test]
    fn value_must_match_declared_type() {
        let q = question(form_question::TYPE_NUMBER, false);
        assert!(validate_answer(&q, &input(Some(7), None, None)).is_ok());
        assert!(validate_answer(&q, &input(None, Some("7"), None)).is_err());
    }

    #[test]
    fn required_question_rejects_empty_answer() {
        let q = question(form_question::TYPE_STRING, true);
        assert!(validate_answer(&q, &input(None, None, None)).is_err());
        let optional = question(form_question::TYPE_STRING, false);
        assert!(validate_answer(&optional, &input(None, None, None)).is_ok());
    }

    #[test]
    fn pesel_answers_are_checksum_validated() {
        let q = question(form_question::TYPE_PESEL, false);
        assert!(validate_answer(&q, &input(None, Some("44051401359"), None)).is_ok());
        assert!(validate_answer(&q, &input(None, Some("44051401358"), None)).is_err());
    }

    #[test]
    fn at_most_one_value_column() {
        let q = question(form_question::TYPE_STRING, false);
        let both = input(Some(7), Some("siedem"), None);
        assert!(validate_answer(&q, &both).is_err());
    }
}
