//! People-listing projection.
//!
//! Builds the rows behind the participant, lecturer and all-people
//! tables: dynamic form answers aligned to a fixed question order, birth
//! date resolved from the year's designated question, adult/minor
//! classification against the camp start date, and the qualification
//! summary folded in per row.

use chrono::{Months, NaiveDate};
use sea_orm::*;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::entity::{
    camp, camp_interest_email, camp_participation, form, form_question, form_question_answer,
    user, user_profile, workshop, workshop_lecturer,
};
use crate::error::AppError;
use crate::services::summary::{self, ParticipationCounts, WorkshopOutcome};
use crate::services::Capabilities;
use crate::utils::pesel;

/// A typed form answer, carried in the same position as its question.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
    Date(NaiveDate),
}

/// Pull the value out of an answer row, checked against the question's
/// declared type. A row whose populated column disagrees with the
/// declaration is logged and treated as unanswered.
pub fn answer_value(
    question: &form_question::Model,
    answer: &form_question_answer::Model,
) -> Option<AnswerValue> {
    let value = if question.expects_number() {
        answer.value_number.map(AnswerValue::Number)
    } else if question.expects_date() {
        answer.value_date.map(AnswerValue::Date)
    } else {
        answer.value_string.clone().map(AnswerValue::Text)
    };
    if value.is_none()
        && (answer.value_number.is_some()
            || answer.value_string.is_some()
            || answer.value_date.is_some())
    {
        warn!(
            question_id = question.id,
            answer_id = answer.id,
            data_type = %question.data_type,
            "answer value column does not match question type"
        );
    }
    value
}

/// Arrange a user's answers so index `i` corresponds to question `i`.
/// Unanswered questions project as `None`.
pub fn align_answers(
    questions: &[form_question::Model],
    answers: &[form_question_answer::Model],
) -> Vec<Option<AnswerValue>> {
    questions
        .iter()
        .map(|question| {
            answers
                .iter()
                .find(|a| a.question_id == question.id)
                .and_then(|a| answer_value(question, a))
        })
        .collect()
}

/// Resolve a birth date from the year's designated birth-date question.
///
/// A PESEL question yields the date encoded in the number; a date
/// question yields its value directly. Any other type, a dangling
/// question reference, or a missing answer resolves to `None`.
pub fn resolve_birth_date(
    questions: &[form_question::Model],
    answers: &[Option<AnswerValue>],
    birth_question_id: Option<i32>,
) -> Option<NaiveDate> {
    let target = birth_question_id?;
    let index = questions.iter().position(|q| q.id == target)?;
    let question = &questions[index];
    match answers.get(index)? {
        Some(AnswerValue::Text(text)) if question.data_type == form_question::TYPE_PESEL => {
            pesel::extract_birth_date(text)
        }
        Some(AnswerValue::Date(date)) if question.data_type == form_question::TYPE_DATE => {
            Some(*date)
        }
        _ => None,
    }
}

/// Adult at camp: compared against the camp start date when the year has
/// one, otherwise against today. Turning 18 exactly on the reference
/// date counts as adult.
pub fn classify_adult(
    birth: Option<NaiveDate>,
    camp_start: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<bool> {
    let birth = birth?;
    let eighteenth = birth.checked_add_months(Months::new(216))?;
    match camp_start {
        Some(start) => Some(start >= eighteenth),
        None => Some(today >= eighteenth),
    }
}

/// One row of a people listing. Accountless interest registrations
/// project as rows with only the email populated.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PersonRow {
    pub user_id: Option<i32>,
    pub full_name: Option<String>,
    pub email: String,
    /// Titles of accepted workshops this person lectures in the selected
    /// year.
    pub lecturer_workshops: Vec<String>,
    pub gender: Option<String>,
    pub is_adult: Option<bool>,
    pub matura_exam_year: Option<i32>,
    pub counts: ParticipationCounts,
    pub has_completed_profile: bool,
    /// `None` when the person has no participation for the selected year.
    pub has_cover_letter: Option<bool>,
    pub status: Option<String>,
    pub school: String,
    /// Aggregate result percentage, `0.0` without a participation.
    pub points: f64,
    /// Human-readable per-workshop breakdown, best outcome first.
    pub infos: Vec<String>,
    pub how_do_you_know_about: String,
    pub form_answers: Vec<Option<AnswerValue>>,
}

fn describe_outcome(outcome: &WorkshopOutcome) -> String {
    if !outcome.is_qualifying {
        format!("{}: no qualification required", outcome.workshop_title)
    } else if outcome.solution_uploads_enabled && !outcome.has_solution {
        format!("{}: no solution submitted", outcome.workshop_title)
    } else {
        match outcome.result_in_percent {
            None => format!("{}: not yet graded", outcome.workshop_title),
            Some(percent) => format!("{}: {:.1}%", outcome.workshop_title, percent),
        }
    }
}

/// Format the already-sorted outcome breakdown for display.
pub fn describe_outcomes(outcomes: &[WorkshopOutcome]) -> Vec<String> {
    outcomes.iter().map(describe_outcome).collect()
}

/// A placeholder row for an email-only interest registration.
pub fn interested_row(email: String, question_count: usize) -> PersonRow {
    PersonRow {
        user_id: None,
        full_name: None,
        email,
        lecturer_workshops: Vec::new(),
        gender: None,
        is_adult: None,
        matura_exam_year: None,
        counts: ParticipationCounts::zero(),
        has_completed_profile: false,
        has_cover_letter: None,
        status: None,
        school: String::new(),
        points: 0.0,
        infos: Vec::new(),
        how_do_you_know_about: String::new(),
        form_answers: vec![None; question_count],
    }
}

/// Which people a listing selects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Listing {
    /// Registered participants of a year, minus lecturers of accepted
    /// workshops.
    Participants,
    /// Lecturers of accepted workshops of a year.
    Lecturers,
    /// Every profile, across all years. Shows only forms bound to no
    /// year; no interest emails are excluded by year.
    AllPeople,
}

/// Build a people listing.
///
/// `year` must be `Some` for [`Listing::Participants`] and
/// [`Listing::Lecturers`]; [`Listing::AllPeople`] ignores it.
pub async fn list_people(
    db: &DatabaseConnection,
    listing: Listing,
    year: Option<&camp::Model>,
    capabilities: Capabilities,
    cover_letter_min_length: usize,
    profile_page_min_length: usize,
    max_result_percent: f64,
    today: NaiveDate,
) -> Result<Vec<PersonRow>, AppError> {
    let questions = load_questions(db, year.map(|y| y.year)).await?;

    let profiles = match (listing, year) {
        (Listing::AllPeople, _) => user_profile::Entity::find().all(db).await?,
        (Listing::Participants, Some(camp)) => {
            let lecturer_ids = accepted_lecturer_ids(db, camp.year).await?;
            let registered: Vec<i32> = camp_participation::Entity::find()
                .filter(camp_participation::Column::Year.eq(camp.year))
                .all(db)
                .await?
                .into_iter()
                .map(|cp| cp.user_profile_id)
                .collect();
            user_profile::Entity::find()
                .filter(user_profile::Column::Id.is_in(registered))
                .filter(user_profile::Column::Id.is_not_in(lecturer_ids))
                .all(db)
                .await?
        }
        (Listing::Lecturers, Some(camp)) => {
            let lecturer_ids = accepted_lecturer_ids(db, camp.year).await?;
            user_profile::Entity::find()
                .filter(user_profile::Column::Id.is_in(lecturer_ids))
                .all(db)
                .await?
        }
        _ => return Err(AppError::NotFound("Camp year not found".into())),
    };

    let mut rows = Vec::with_capacity(profiles.len());
    for profile in &profiles {
        let account = user::Entity::find_by_id(profile.user_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("profile {} has no user row", profile.id))
            })?;

        let raw_answers = form_question_answer::Entity::find()
            .filter(form_question_answer::Column::UserId.eq(account.id))
            .all(db)
            .await?;
        let answers = align_answers(&questions, &raw_answers);

        let birth = resolve_birth_date(
            &questions,
            &answers,
            year.and_then(|y| y.form_question_birth_date_id),
        );
        let is_adult = classify_adult(birth, year.and_then(|y| y.start_date), today);

        let lecturer_titles = match year {
            Some(camp) => lectured_titles(db, profile.id, camp.year).await?,
            None => Vec::new(),
        };

        let summary = summary::summarize_profile(
            db,
            profile,
            year.map(|camp| camp.year),
            cover_letter_min_length,
            profile_page_min_length,
            max_result_percent,
            capabilities.see_all_workshops,
        )
        .await?;
        let year_summary = year.and_then(|camp| {
            summary.years.iter().find(|s| s.year == camp.year)
        });

        let participation = match year {
            Some(camp) => {
                camp_participation::Entity::find()
                    .filter(camp_participation::Column::UserProfileId.eq(profile.id))
                    .filter(camp_participation::Column::Year.eq(camp.year))
                    .one(db)
                    .await?
            }
            None => None,
        };

        rows.push(PersonRow {
            user_id: Some(account.id),
            full_name: Some(account.full_name()),
            email: account.email.clone(),
            lecturer_workshops: lecturer_titles,
            gender: profile.gender.clone(),
            is_adult,
            matura_exam_year: profile.matura_exam_year,
            counts: year_summary.map_or(ParticipationCounts::zero(), |s| s.counts),
            has_completed_profile: summary.has_completed_profile,
            // The projector keeps its historical strict comparison.
            has_cover_letter: participation
                .as_ref()
                .map(|cp| cp.cover_letter.len() > cover_letter_min_length),
            status: participation.as_ref().and_then(|cp| cp.status.clone()),
            school: profile.school.clone(),
            points: year_summary
                .and_then(|s| s.result_in_percent)
                .unwrap_or(0.0),
            infos: year_summary.map_or(Vec::new(), |s| describe_outcomes(&s.workshops)),
            how_do_you_know_about: profile.how_do_you_know_about.clone(),
            form_answers: answers,
        });
    }

    if listing != Listing::Lecturers {
        let mut interested = camp_interest_email::Entity::find();
        if let Some(camp) = year {
            interested = interested.filter(camp_interest_email::Column::Year.eq(camp.year));
        }
        let emails = interested.all(db).await?.into_iter().map(|r| r.email);
        append_interested_rows(&mut rows, emails, questions.len());
    }

    Ok(rows)
}

/// Append accountless interest registrations after the registered rows,
/// skipping addresses that already appear in the listing.
pub fn append_interested_rows(
    rows: &mut Vec<PersonRow>,
    emails: impl IntoIterator<Item = String>,
    question_count: usize,
) {
    let mut seen: std::collections::HashSet<String> =
        rows.iter().map(|r| r.email.clone()).collect();
    for email in emails {
        if seen.insert(email.clone()) {
            rows.push(interested_row(email, question_count));
        }
    }
}

/// Questions of the listing's forms, form by form in declared order.
/// Year listings use that year's forms; the all-people listing uses
/// forms bound to no year.
async fn load_questions(
    db: &DatabaseConnection,
    year: Option<i32>,
) -> Result<Vec<form_question::Model>, AppError> {
    let forms = match year {
        Some(year) => {
            form::Entity::find()
                .filter(form::Column::Year.eq(year))
                .order_by_asc(form::Column::Id)
                .all(db)
                .await?
        }
        None => {
            form::Entity::find()
                .filter(form::Column::Year.is_null())
                .order_by_asc(form::Column::Id)
                .all(db)
                .await?
        }
    };
    let mut questions = Vec::new();
    for f in forms {
        let mut q = form_question::Entity::find()
            .filter(form_question::Column::FormId.eq(f.id))
            .order_by_asc(form_question::Column::Order)
            .all(db)
            .await?;
        questions.append(&mut q);
    }
    Ok(questions)
}

/// Profiles lecturing an accepted workshop in the given year.
async fn accepted_lecturer_ids(db: &DatabaseConnection, year: i32) -> Result<Vec<i32>, AppError> {
    let accepted: Vec<i32> = workshop::Entity::find()
        .filter(workshop::Column::Year.eq(year))
        .filter(workshop::Column::Status.eq(workshop::STATUS_ACCEPTED))
        .all(db)
        .await?
        .into_iter()
        .map(|w| w.id)
        .collect();
    let ids = workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::WorkshopId.is_in(accepted))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.user_profile_id)
        .collect();
    Ok(ids)
}

/// Titles of accepted workshops the profile lectures in the given year.
async fn lectured_titles(
    db: &DatabaseConnection,
    profile_id: i32,
    year: i32,
) -> Result<Vec<String>, AppError> {
    let workshop_ids: Vec<i32> = workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::UserProfileId.eq(profile_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.workshop_id)
        .collect();
    let titles = workshop::Entity::find()
        .filter(workshop::Column::Id.is_in(workshop_ids))
        .filter(workshop::Column::Year.eq(year))
        .filter(workshop::Column::Status.eq(workshop::STATUS_ACCEPTED))
        .all(db)
        .await?
        .into_iter()
        .map(|w| w.title)
        .collect();
    Ok(titles)
}

/// Clamp a declared arrival or departure date into the camp's duration.
/// Out-of-range or missing dates fall back to the nearest bound.
pub fn clean_date(
    date: Option<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
    default: NaiveDate,
) -> NaiveDate {
    match date {
        Some(d) if d >= start && d <= end => d,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn question(id: i32, data_type: &str, order: i32) -> form_question::Model {
        form_question::Model {
            id,
            form_id: 1,
            title: format!("Q{id}"),
            data_type: data_type.into(),
            is_required: false,
            is_locked: false,
            order,
        }
    }

    fn answer(
        id: i32,
        question_id: i32,
        number: Option<i64>,
        string: Option<&str>,
        date_value: Option<NaiveDate>,
    ) -> form_question_answer::Model {
        form_question_answer::Model {
            id,
            question_id,
            user_id: 1,
            value_number: number,
            value_string: string.map(Into::into),
            value_date: date_value,
            last_changed: Utc::now(),
        }
    }

    #[test]
    fn answers_align_to_question_positions() {
        let questions = vec![
            question(10, form_question::TYPE_STRING, 1),
            question(11, form_question::TYPE_NUMBER, 2),
            question(12, form_question::TYPE_DATE, 3),
        ];
        // Answers arrive in arbitrary order; question 11 is unanswered.
        let answers = vec![
            answer(1, 12, None, None, Some(date(2006, 7, 1))),
            answer(2, 10, None, Some("LO Staszica"), None),
        ];
        let aligned = align_answers(&questions, &answers);
        assert_eq!(
            aligned,
            vec![
                Some(AnswerValue::Text("LO Staszica".into())),
                None,
                Some(AnswerValue::Date(date(2006, 7, 1))),
            ]
        );
    }

    #[test]
    fn mismatched_value_column_projects_as_unanswered() {
        let questions = vec![question(10, form_question::TYPE_NUMBER, 1)];
        let answers = vec![answer(1, 10, None, Some("not a number"), None)];
        assert_eq!(align_answers(&questions, &answers), vec![None]);
    }

    #[test]
    fn birth_date_from_date_question() {
        let questions = vec![
            question(1, form_question::TYPE_STRING, 1),
            question(2, form_question::TYPE_DATE, 2),
        ];
        let answers = vec![None, Some(AnswerValue::Date(date(2006, 7, 1)))];
        assert_eq!(
            resolve_birth_date(&questions, &answers, Some(2)),
            Some(date(2006, 7, 1))
        );
    }

    #[test]
    fn birth_date_from_pesel_question() {
        let questions = vec![question(1, form_question::TYPE_PESEL, 1)];
        let answers = vec![Some(AnswerValue::Text("44051401359".into()))];
        assert_eq!(
            resolve_birth_date(&questions, &answers, Some(1)),
            Some(date(1944, 5, 14))
        );
        // A malformed number stays unresolved instead of failing.
        let garbled = vec![Some(AnswerValue::Text("44051".into()))];
        assert_eq!(resolve_birth_date(&questions, &garbled, Some(1)), None);
    }

    #[test]
    fn birth_date_unresolved_for_dangling_or_missing() {
        let questions = vec![question(1, form_question::TYPE_DATE, 1)];
        let answers = vec![None];
        assert_eq!(resolve_birth_date(&questions, &answers, Some(1)), None);
        assert_eq!(resolve_birth_date(&questions, &answers, Some(99)), None);
        assert_eq!(resolve_birth_date(&questions, &answers, None), None);
        // Wrong question type for the stored value.
        let q = vec![question(1, form_question::TYPE_STRING, 1)];
        let a = vec![Some(AnswerValue::Text("not a pesel".into()))];
        assert_eq!(resolve_birth_date(&q, &a, Some(1)), None);
    }

    #[test]
    fn adult_against_camp_start_date() {
        let start = Some(date(2024, 7, 1));
        let today = date(2024, 1, 1);
        // 18th birthday exactly on the start date counts as adult.
        assert_eq!(classify_adult(Some(date(2006, 7, 1)), start, today), Some(true));
        assert_eq!(classify_adult(Some(date(2006, 7, 2)), start, today), Some(false));
        assert_eq!(classify_adult(Some(date(2000, 1, 1)), start, today), Some(true));
    }

    #[test]
    fn adult_against_today_when_no_start_date() {
        let today = date(2024, 7, 1);
        assert_eq!(classify_adult(Some(date(2006, 7, 1)), None, today), Some(true));
        assert_eq!(classify_adult(Some(date(2006, 7, 2)), None, today), Some(false));
        assert_eq!(classify_adult(None, None, today), None);
    }

    #[test]
    fn outcome_descriptions_follow_classification() {
        let mk = |qualifying, uploads, has_solution, percent: Option<f64>| WorkshopOutcome {
            workshop_id: 1,
            workshop_name: "algo".into(),
            workshop_title: "Algorytmy".into(),
            workshop_status: Some(workshop::STATUS_ACCEPTED.into()),
            is_qualifying: qualifying,
            solution_uploads_enabled: uploads,
            has_solution,
            qualification_result: percent.map(|p| p / 10.0),
            result_in_percent: percent,
            is_qualified: None,
            comment: String::new(),
            priority: 0.0,
            publicly_visible: true,
        };
        assert_eq!(
            describe_outcome(&mk(false, false, false, None)),
            "Algorytmy: no qualification required"
        );
        assert_eq!(
            describe_outcome(&mk(true, true, false, None)),
            "Algorytmy: no solution submitted"
        );
        assert_eq!(
            describe_outcome(&mk(true, true, true, None)),
            "Algorytmy: not yet graded"
        );
        assert_eq!(
            describe_outcome(&mk(true, true, true, Some(87.5))),
            "Algorytmy: 87.5%"
        );
    }

    #[test]
    fn interested_rows_are_blank() {
        let row = interested_row("kto@example.com".into(), 3);
        assert_eq!(row.user_id, None);
        assert_eq!(row.email, "kto@example.com");
        assert_eq!(row.counts, ParticipationCounts::zero());
        assert_eq!(row.form_answers, vec![None, None, None]);
        assert_eq!(row.points, 0.0);
    }

    fn registered_row(id: i32, email: &str) -> PersonRow {
        let mut row = interested_row(email.into(), 0);
        row.user_id = Some(id);
        row.full_name = Some(format!("User {id}"));
        row
    }

    #[test]
    fn interested_emails_append_after_registered_rows() {
        let mut rows = vec![registered_row(1, "u1@x.com"), registered_row(2, "u2@x.com")];
        append_interested_rows(&mut rows, vec!["a@x.com".to_string()], 2);
        assert_eq!(rows.len(), 3);
        let appended = &rows[2];
        assert_eq!(appended.user_id, None);
        assert_eq!(appended.email, "a@x.com");
        assert_eq!(appended.form_answers, vec![None, None]);
    }

    #[test]
    fn interested_emails_skip_registered_addresses() {
        let mut rows = vec![registered_row(1, "u1@x.com"), registered_row(2, "u2@x.com")];
        let emails = vec![
            "u1@x.com".to_string(),
            "a@x.com".to_string(),
            "a@x.com".to_string(),
        ];
        append_interested_rows(&mut rows, emails, 0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].email, "a@x.com");
    }

    #[test]
    fn clean_date_clamps_to_camp_duration() {
        let start = date(2024, 7, 1);
        let end = date(2024, 7, 14);
        assert_eq!(clean_date(Some(date(2024, 7, 3)), start, end, start), date(2024, 7, 3));
        assert_eq!(clean_date(Some(date(2024, 6, 20)), start, end, start), start);
        assert_eq!(clean_date(Some(date(2024, 8, 1)), start, end, end), end);
        assert_eq!(clean_date(None, start, end, end), end);
    }
}
