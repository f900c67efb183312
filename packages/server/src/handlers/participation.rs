use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{camp, camp_participation};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::camp::find_camp;
use crate::models::profile::{
    CoverLetterRequest, MyStatusResponse, ParticipationResponse, QualifyRequest,
    validate_cover_letter, validate_qualify,
};
use crate::services::summary;
use crate::state::AppState;
use crate::utils::access;

/// Register the requester for a camp year. Registering again is a no-op
/// that returns the existing record.
#[utoipa::path(
    post,
    path = "/camps/{year}/participants",
    tag = "Participation",
    operation_id = "registerForCamp",
    summary = "Register for a camp year",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 201, description = "Registered", body = ParticipationResponse),
        (status = 200, description = "Already registered", body = ParticipationResponse),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Registration closed (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn register_for_camp(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let camp = find_camp(&state.db, year).await?;
    if !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Registration for this edition is closed".into(),
        ));
    }
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;

    if let Some(existing) = find_participation(&state.db, profile.id, year).await? {
        return Ok((StatusCode::OK, Json(ParticipationResponse::from(existing))));
    }

    let created = camp_participation::ActiveModel {
        user_profile_id: Set(profile.id),
        year: Set(year),
        cover_letter: Set(String::new()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| match e.sql_err() {
        // Concurrent double registration hits the (profile, year) index.
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Already registered for this edition".into())
        }
        _ => AppError::from(e),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipationResponse::from(created)),
    ))
}

/// Set the requester's cover letter for a camp year.
#[utoipa::path(
    put,
    path = "/camps/{year}/participants/me/cover-letter",
    tag = "Participation",
    operation_id = "setCoverLetter",
    summary = "Set own cover letter",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Cover letter stored", body = ParticipationResponse),
        (status = 404, description = "Not registered for this year (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Registration closed (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn set_cover_letter(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
    AppJson(payload): AppJson<CoverLetterRequest>,
) -> Result<Json<ParticipationResponse>, AppError> {
    validate_cover_letter(&payload)?;
    let camp = find_camp(&state.db, year).await?;
    if !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Registration for this edition is closed".into(),
        ));
    }
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    let participation = find_participation(&state.db, profile.id, year)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this edition".into()))?;

    let mut active: camp_participation::ActiveModel = participation.into();
    active.cover_letter = Set(payload.cover_letter);
    let updated = active.update(&state.db).await?;

    Ok(Json(ParticipationResponse::from(updated)))
}

/// The requester's qualification history, current editions first.
#[utoipa::path(
    get,
    path = "/me/status",
    tag = "Participation",
    operation_id = "getMyStatus",
    summary = "Own qualification status",
    responses(
        (status = 200, description = "Qualification history", body = MyStatusResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MyStatusResponse>, AppError> {
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    let q = &state.config.qualification;
    // Participants always see their own full breakdown.
    let summary = summary::summarize_profile(
        &state.db,
        &profile,
        None,
        q.cover_letter_min_length,
        q.profile_page_min_length,
        q.max_result_percent,
        true,
    )
    .await?;

    let today = Utc::now().date_naive();
    let camps = camp::Entity::find().all(&state.db).await?;
    let active_year = summary::select_current_year(&camps, q.current_year, today);

    let mut current = Vec::new();
    let mut past = Vec::new();
    for year in summary.years {
        if Some(year.year) == active_year {
            current.push(year);
        } else {
            past.push(year);
        }
    }

    Ok(Json(MyStatusResponse {
        has_completed_profile: summary.has_completed_profile,
        current,
        past,
    }))
}

/// Decide a participation record (accept, reject, cancel, or clear).
#[utoipa::path(
    patch,
    path = "/participations/{id}/status",
    tag = "Participation",
    operation_id = "qualifyParticipant",
    summary = "Decide a registration",
    params(("id" = i32, Path, description = "Participation ID")),
    responses(
        (status = 200, description = "Decision stored", body = ParticipationResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown participation (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn qualify(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<QualifyRequest>,
) -> Result<Json<ParticipationResponse>, AppError> {
    auth_user.require_permission("participation:qualify")?;
    validate_qualify(&payload)?;

    let participation = camp_participation::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Participation not found".into()))?;

    let mut active: camp_participation::ActiveModel = participation.into();
    active.status = Set(payload.status);
    let updated = active.update(&state.db).await?;

    Ok(Json(ParticipationResponse::from(updated)))
}

/// Delete a participation record and everything hanging off it.
#[utoipa::path(
    delete,
    path = "/participations/{id}",
    tag = "Participation",
    operation_id = "deleteParticipation",
    summary = "Delete a registration",
    params(("id" = i32, Path, description = "Participation ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown participation (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_participation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("participation:qualify")?;

    let participation = camp_participation::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Participation not found".into()))?;

    participation.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn find_participation<C: ConnectionTrait>(
    db: &C,
    user_profile_id: i32,
    year: i32,
) -> Result<Option<camp_participation::Model>, AppError> {
    let found = camp_participation::Entity::find()
        .filter(camp_participation::Column::UserProfileId.eq(user_profile_id))
        .filter(camp_participation::Column::Year.eq(year))
        .one(db)
        .await?;
    Ok(found)
}
