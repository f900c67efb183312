use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{solution, workshop, workshop_participant};
use crate::entity::solution::SolutionFile;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::camp::find_camp;
use crate::handlers::participation::find_participation;
use crate::models::solution::{SolutionResponse, UpsertSolutionRequest, validate_upsert_solution};
use crate::state::AppState;
use crate::utils::access;

fn to_response(model: solution::Model) -> Result<SolutionResponse, AppError> {
    let files: Vec<SolutionFile> = serde_json::from_value(model.files)
        .map_err(|e| AppError::Internal(format!("Corrupt solution files: {e}")))?;
    Ok(SolutionResponse {
        id: model.id,
        workshop_participant_id: model.workshop_participant_id,
        message: model.message,
        files,
        last_changed: model.last_changed,
    })
}

async fn own_workshop_participant(
    state: &AppState,
    user_id: i32,
    workshop_id: i32,
) -> Result<(workshop::Model, workshop_participant::Model), AppError> {
    let workshop = workshop::Entity::find_by_id(workshop_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))?;
    let profile = access::find_profile(&state.db, user_id).await?;
    let participation = find_participation(&state.db, profile.id, workshop.year)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this workshop".into()))?;
    let wp = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::CampParticipationId.eq(participation.id))
        .filter(workshop_participant::Column::WorkshopId.eq(workshop.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this workshop".into()))?;
    Ok((workshop, wp))
}

/// Create or replace the requester's solution for a workshop.
#[utoipa::path(
    put,
    path = "/workshops/{id}/my-solution",
    tag = "Solutions",
    operation_id = "upsertMySolution",
    summary = "Upload own solution",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Solution stored", body = SolutionResponse),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Not registered (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Uploads not accepted (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn upsert_my_solution(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpsertSolutionRequest>,
) -> Result<Json<SolutionResponse>, AppError> {
    validate_upsert_solution(&payload)?;
    let (workshop, wp) = own_workshop_participant(&state, auth_user.user_id, id).await?;

    if !workshop.is_qualifying || !workshop.solution_uploads_enabled {
        return Err(AppError::Conflict(
            "This workshop does not accept solution uploads".into(),
        ));
    }
    let camp = find_camp(&state.db, workshop.year).await?;
    if !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Qualification for this workshop has ended".into(),
        ));
    }

    let files = serde_json::to_value(&payload.files)
        .map_err(|e| AppError::Internal(format!("Solution files encode error: {e}")))?;

    let existing = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.eq(wp.id))
        .one(&state.db)
        .await?;
    let stored = match existing {
        Some(current) => {
            let mut active: solution::ActiveModel = current.into();
            active.message = Set(payload.message);
            active.files = Set(files);
            active.last_changed = Set(Utc::now());
            active.update(&state.db).await?
        }
        None => {
            solution::ActiveModel {
                workshop_participant_id: Set(wp.id),
                message: Set(payload.message),
                files: Set(files),
                last_changed: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&state.db)
            .await?
        }
    };

    Ok(Json(to_response(stored)?))
}

/// The requester's solution for a workshop.
#[utoipa::path(
    get,
    path = "/workshops/{id}/my-solution",
    tag = "Solutions",
    operation_id = "getMySolution",
    summary = "Get own solution",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "The solution", body = SolutionResponse),
        (status = 404, description = "No solution yet (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_my_solution(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SolutionResponse>, AppError> {
    let (_, wp) = own_workshop_participant(&state, auth_user.user_id, id).await?;
    let stored = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.eq(wp.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No solution submitted".into()))?;
    Ok(Json(to_response(stored)?))
}

/// A participant's solution, for lecturers and organizers.
#[utoipa::path(
    get,
    path = "/workshop-participants/{id}/solution",
    tag = "Solutions",
    operation_id = "getSolution",
    summary = "Get a participant's solution",
    params(("id" = i32, Path, description = "Workshop participant ID")),
    responses(
        (status = 200, description = "The solution", body = SolutionResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "No solution (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_solution(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SolutionResponse>, AppError> {
    let wp = workshop_participant::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop participant not found".into()))?;

    if !auth_user.has_permission("workshop:see_all") {
        let profile = access::find_profile(&state.db, auth_user.user_id).await?;
        if !access::is_lecturer(&state.db, wp.workshop_id, profile.id).await? {
            return Err(AppError::PermissionDenied);
        }
    }

    let stored = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.eq(wp.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No solution submitted".into()))?;
    Ok(Json(to_response(stored)?))
}
