use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{
    camp, camp_interest_email, camp_participation, form_question, form_question_answer, user,
    user_profile, workshop, workshop_lecturer,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::camp::{
    CampResponse, CreateCampRequest, PatchCampRequest, PlanRow, RegisterInterestRequest,
    validate_create_camp, validate_register_interest,
};
use crate::services::people::clean_date;
use crate::state::AppState;

fn to_response(camp: &camp::Model, today: chrono::NaiveDate) -> CampResponse {
    CampResponse {
        year: camp.year,
        start_date: camp.start_date,
        end_date: camp.end_date,
        proposal_end_date: camp.proposal_end_date,
        program_finalized: camp.program_finalized,
        proposals_open: camp.are_proposals_open(today),
        qualification_editable: camp.is_qualification_editable(today),
    }
}

pub async fn find_camp<C: ConnectionTrait>(db: &C, year: i32) -> Result<camp::Model, AppError> {
    camp::Entity::find_by_id(year)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Camp {year} not found")))
}

/// List camp editions, newest first.
#[utoipa::path(
    get,
    path = "/camps",
    tag = "Camps",
    operation_id = "listCamps",
    summary = "List camp editions",
    responses(
        (status = 200, description = "Editions, newest first", body = Vec<CampResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_camps(
    State(state): State<AppState>,
) -> Result<Json<Vec<CampResponse>>, AppError> {
    let today = Utc::now().date_naive();
    let camps = camp::Entity::find()
        .order_by_desc(camp::Column::Year)
        .all(&state.db)
        .await?;
    Ok(Json(camps.iter().map(|c| to_response(c, today)).collect()))
}

/// Get one camp edition.
#[utoipa::path(
    get,
    path = "/camps/{year}",
    tag = "Camps",
    operation_id = "getCamp",
    summary = "Get a camp edition",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "The edition", body = CampResponse),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_camp(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<CampResponse>, AppError> {
    let camp = find_camp(&state.db, year).await?;
    Ok(Json(to_response(&camp, Utc::now().date_naive())))
}

/// Create a camp edition.
#[utoipa::path(
    post,
    path = "/camps",
    tag = "Camps",
    operation_id = "createCamp",
    summary = "Create a camp edition",
    responses(
        (status = 201, description = "Edition created", body = CampResponse),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Year already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_camp(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCampRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("camp:edit")?;
    validate_create_camp(&payload)?;

    let created = camp::ActiveModel {
        year: Set(payload.year),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        proposal_end_date: Set(payload.proposal_end_date),
        program_finalized: Set(false),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("Camp {} already exists", payload.year))
        }
        _ => AppError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(to_response(&created, Utc::now().date_naive())),
    ))
}

/// Partially update a camp edition.
#[utoipa::path(
    patch,
    path = "/camps/{year}",
    tag = "Camps",
    operation_id = "patchCamp",
    summary = "Update a camp edition",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Edition updated", body = CampResponse),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn patch_camp(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
    AppJson(payload): AppJson<PatchCampRequest>,
) -> Result<Json<CampResponse>, AppError> {
    auth_user.require_permission("camp:edit")?;
    let camp = find_camp(&state.db, year).await?;

    let mut active: camp::ActiveModel = camp.into();
    if let Some(v) = payload.start_date {
        active.start_date = Set(v);
    }
    if let Some(v) = payload.end_date {
        active.end_date = Set(v);
    }
    if let Some(v) = payload.proposal_end_date {
        active.proposal_end_date = Set(v);
    }
    if let Some(v) = payload.program_finalized {
        active.program_finalized = Set(v);
    }
    if let Some(v) = payload.form_question_birth_date_id {
        active.form_question_birth_date_id = Set(v);
    }
    if let Some(v) = payload.form_question_arrival_date_id {
        active.form_question_arrival_date_id = Set(v);
    }
    if let Some(v) = payload.form_question_departure_date_id {
        active.form_question_departure_date_id = Set(v);
    }
    let updated = active.update(&state.db).await?;

    Ok(Json(to_response(&updated, Utc::now().date_naive())))
}

/// Register interest in a camp year by email, without an account.
/// Repeated registrations of the same address are accepted silently.
#[utoipa::path(
    post,
    path = "/camps/{year}/interest",
    tag = "Camps",
    operation_id = "registerInterest",
    summary = "Register interest by email",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 204, description = "Interest recorded"),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn register_interest(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    AppJson(payload): AppJson<RegisterInterestRequest>,
) -> Result<StatusCode, AppError> {
    validate_register_interest(&payload)?;
    let camp = find_camp(&state.db, year).await?;

    let email = payload.email.trim().to_lowercase();
    let result = camp_interest_email::ActiveModel {
        year: Set(camp.year),
        email: Set(email),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await;

    match result {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(e.into()),
    }
}

/// Accommodation-plan export: accepted participants and lecturers of
/// accepted workshops, with arrival and departure dates clamped into the
/// camp duration.
#[utoipa::path(
    get,
    path = "/camps/{year}/plan",
    tag = "Camps",
    operation_id = "getPlanData",
    summary = "Accommodation plan data",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Plan rows", body = Vec<PlanRow>),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Camp duration not configured (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn plan_data(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<PlanRow>>, AppError> {
    auth_user.require_permission("registration:export")?;
    let camp = find_camp(&state.db, year).await?;
    let (Some(start), Some(end)) = (camp.start_date, camp.end_date) else {
        return Err(AppError::Conflict(
            "Camp has no start or end date configured".into(),
        ));
    };

    // Accepted participants plus lecturers of accepted workshops.
    let mut profile_ids: Vec<i32> = camp_participation::Entity::find()
        .filter(camp_participation::Column::Year.eq(year))
        .filter(camp_participation::Column::Status.eq(camp_participation::STATUS_ACCEPTED))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|cp| cp.user_profile_id)
        .collect();
    let accepted_workshops: Vec<i32> = workshop::Entity::find()
        .filter(workshop::Column::Year.eq(year))
        .filter(workshop::Column::Status.eq(workshop::STATUS_ACCEPTED))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|w| w.id)
        .collect();
    for lecturer in workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::WorkshopId.is_in(accepted_workshops))
        .all(&state.db)
        .await?
    {
        if !profile_ids.contains(&lecturer.user_profile_id) {
            profile_ids.push(lecturer.user_profile_id);
        }
    }

    let mut rows = Vec::with_capacity(profile_ids.len());
    for profile_id in profile_ids {
        let profile = user_profile::Entity::find_by_id(profile_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal(format!("profile {profile_id} missing")))?;
        let account = user::Entity::find_by_id(profile.user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("profile {} has no user row", profile.id))
            })?;

        let arrival = designated_date_answer(
            &state.db,
            camp.form_question_arrival_date_id,
            account.id,
        )
        .await?;
        let departure = designated_date_answer(
            &state.db,
            camp.form_question_departure_date_id,
            account.id,
        )
        .await?;

        rows.push(PlanRow {
            user_id: account.id,
            full_name: account.full_name(),
            gender: profile.gender.clone(),
            arrival_date: clean_date(arrival, start, end, start),
            departure_date: clean_date(departure, start, end, end),
        });
    }
    Ok(Json(rows))
}

/// The user's answer to a designated date question, if both exist.
async fn designated_date_answer(
    db: &DatabaseConnection,
    question_id: Option<i32>,
    user_id: i32,
) -> Result<Option<chrono::NaiveDate>, AppError> {
    let Some(question_id) = question_id else {
        return Ok(None);
    };
    let Some(question) = form_question::Entity::find_by_id(question_id).one(db).await? else {
        // Dangling designated-question reference is tolerated.
        return Ok(None);
    };
    if question.data_type != form_question::TYPE_DATE {
        return Ok(None);
    }
    let answer = form_question_answer::Entity::find()
        .filter(form_question_answer::Column::QuestionId.eq(question.id))
        .filter(form_question_answer::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    Ok(answer.and_then(|a| a.value_date))
}
