use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{user, user_profile};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::profile::{PatchProfileRequest, ProfileResponse, validate_patch_profile};
use crate::state::AppState;
use crate::utils::access;

fn to_response(
    profile: &user_profile::Model,
    account: &user::Model,
    profile_page_min_length: usize,
) -> ProfileResponse {
    ProfileResponse {
        user_profile_id: profile.id,
        user_id: account.id,
        full_name: account.full_name(),
        gender: profile.gender.clone(),
        school: profile.school.clone(),
        matura_exam_year: profile.matura_exam_year,
        profile_page: profile.profile_page.clone(),
        has_completed_profile: profile.profile_page.len() > profile_page_min_length,
    }
}

/// The requester's own profile.
#[utoipa::path(
    get,
    path = "/profiles/me",
    tag = "Profiles",
    operation_id = "getMyProfile",
    summary = "Get own profile",
    responses(
        (status = 200, description = "Own profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_my_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    let account = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    Ok(Json(to_response(
        &profile,
        &account,
        state.config.qualification.profile_page_min_length,
    )))
}

/// Partially update the requester's own profile.
#[utoipa::path(
    patch,
    path = "/profiles/me",
    tag = "Profiles",
    operation_id = "patchMyProfile",
    summary = "Update own profile",
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn patch_my_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<PatchProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_patch_profile(&payload)?;
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;

    let mut active: user_profile::ActiveModel = profile.into();
    if let Some(v) = payload.gender {
        active.gender = Set(v);
    }
    if let Some(v) = payload.school {
        active.school = Set(v);
    }
    if let Some(v) = payload.matura_exam_year {
        active.matura_exam_year = Set(v);
    }
    if let Some(v) = payload.how_do_you_know_about {
        active.how_do_you_know_about = Set(v);
    }
    if let Some(v) = payload.profile_page {
        active.profile_page = Set(v);
    }
    let updated = active.update(&state.db).await?;

    let account = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".into()))?;
    Ok(Json(to_response(
        &updated,
        &account,
        state.config.qualification.profile_page_min_length,
    )))
}

/// Another user's profile, visible to any authenticated user.
#[utoipa::path(
    get,
    path = "/users/{user_id}/profile",
    tag = "Profiles",
    operation_id = "getProfile",
    summary = "Get a user's profile",
    params(("user_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "The profile", body = ProfileResponse),
        (status = 404, description = "Unknown user (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_profile(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<ProfileResponse>, AppError> {
    let account = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let profile = access::find_profile(&state.db, account.id).await?;
    Ok(Json(to_response(
        &profile,
        &account,
        state.config.qualification.profile_page_min_length,
    )))
}
