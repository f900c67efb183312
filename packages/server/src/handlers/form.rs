use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{form, form_question, form_question_answer};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::form::{
    AnswerResponse, FormResponse, QuestionResponse, SubmitAnswersRequest, validate_answer,
};
use crate::state::AppState;

/// Visible forms with their questions and the requester's stored answers.
#[utoipa::path(
    get,
    path = "/forms",
    tag = "Forms",
    operation_id = "listForms",
    summary = "List visible forms with own answers",
    responses(
        (status = 200, description = "Forms", body = Vec<FormResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_forms(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<FormResponse>>, AppError> {
    let forms = form::Entity::find()
        .filter(form::Column::IsVisible.eq(true))
        .order_by_asc(form::Column::Id)
        .all(&state.db)
        .await?;

    let answers = form_question_answer::Entity::find()
        .filter(form_question_answer::Column::UserId.eq(auth_user.user_id))
        .all(&state.db)
        .await?;

    let mut out = Vec::with_capacity(forms.len());
    for f in forms {
        let questions = form_question::Entity::find()
            .filter(form_question::Column::FormId.eq(f.id))
            .order_by_asc(form_question::Column::Order)
            .all(&state.db)
            .await?;
        let questions = questions
            .into_iter()
            .map(|q| {
                let answer = answers
                    .iter()
                    .find(|a| a.question_id == q.id)
                    .map(|a| AnswerResponse {
                        value_number: a.value_number,
                        value_string: a.value_string.clone(),
                        value_date: a.value_date,
                    });
                QuestionResponse {
                    id: q.id,
                    title: q.title,
                    data_type: q.data_type,
                    is_required: q.is_required,
                    is_locked: q.is_locked,
                    answer,
                }
            })
            .collect();
        out.push(FormResponse {
            id: f.id,
            name: f.name,
            title: f.title,
            description: f.description,
            year: f.year,
            questions,
        });
    }
    Ok(Json(out))
}

/// Store the requester's answers. Answers to locked questions are
/// rejected; an answer with all values null deletes the stored one.
#[utoipa::path(
    post,
    path = "/forms/answers",
    tag = "Forms",
    operation_id = "submitAnswers",
    summary = "Submit form answers",
    responses(
        (status = 204, description = "Answers stored"),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Question is locked (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn submit_answers(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitAnswersRequest>,
) -> Result<StatusCode, AppError> {
    let txn = state.db.begin().await?;

    for input in &payload.answers {
        let question = form_question::Entity::find_by_id(input.question_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Question {} not found", input.question_id))
            })?;
        if question.is_locked {
            return Err(AppError::Conflict(format!(
                "Question '{}' is locked",
                question.title
            )));
        }
        validate_answer(&question, input)?;

        let existing = form_question_answer::Entity::find()
            .filter(form_question_answer::Column::QuestionId.eq(question.id))
            .filter(form_question_answer::Column::UserId.eq(auth_user.user_id))
            .one(&txn)
            .await?;

        let cleared = input.value_number.is_none()
            && input.value_string.is_none()
            && input.value_date.is_none();

        match (existing, cleared) {
            (Some(current), true) => {
                current.delete(&txn).await?;
            }
            (None, true) => {}
            (Some(current), false) => {
                let mut active: form_question_answer::ActiveModel = current.into();
                active.value_number = Set(input.value_number);
                active.value_string = Set(input.value_string.clone());
                active.value_date = Set(input.value_date);
                active.last_changed = Set(Utc::now());
                active.update(&txn).await?;
            }
            (None, false) => {
                form_question_answer::ActiveModel {
                    question_id: Set(question.id),
                    user_id: Set(auth_user.user_id),
                    value_number: Set(input.value_number),
                    value_string: Set(input.value_string.clone()),
                    value_date: Set(input.value_date),
                    last_changed: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
    }

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
