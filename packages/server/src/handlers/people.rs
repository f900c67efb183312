use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::handlers::camp::find_camp;
use crate::services::people::{self, Listing, PersonRow};
use crate::services::Capabilities;
use crate::state::AppState;

async fn run_listing(
    state: &AppState,
    auth_user: &AuthUser,
    listing: Listing,
    year: Option<i32>,
) -> Result<Vec<PersonRow>, AppError> {
    auth_user.require_permission("user:see_all")?;
    let camp = match year {
        Some(year) => Some(find_camp(&state.db, year).await?),
        None => None,
    };
    let q = &state.config.qualification;
    people::list_people(
        &state.db,
        listing,
        camp.as_ref(),
        Capabilities::from_permissions(&auth_user.permissions),
        q.cover_letter_min_length,
        q.profile_page_min_length,
        q.max_result_percent,
        Utc::now().date_naive(),
    )
    .await
}

/// The participant table of a camp year. Lecturers of accepted
/// workshops are excluded; interest registrations without an account
/// appear as email-only rows.
#[utoipa::path(
    get,
    path = "/camps/{year}/people/participants",
    tag = "People",
    operation_id = "listParticipants",
    summary = "Participant table of a year",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Participant rows", body = Vec<PersonRow>),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_participants(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<PersonRow>>, AppError> {
    let rows = run_listing(&state, &auth_user, Listing::Participants, Some(year)).await?;
    Ok(Json(rows))
}

/// The lecturer table of a camp year.
#[utoipa::path(
    get,
    path = "/camps/{year}/people/lecturers",
    tag = "People",
    operation_id = "listLecturers",
    summary = "Lecturer table of a year",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Lecturer rows", body = Vec<PersonRow>),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_lecturers(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<PersonRow>>, AppError> {
    let rows = run_listing(&state, &auth_user, Listing::Lecturers, Some(year)).await?;
    Ok(Json(rows))
}

/// Everyone who ever touched the system, with answers to the forms
/// bound to no particular year.
#[utoipa::path(
    get,
    path = "/people",
    tag = "People",
    operation_id = "listAllPeople",
    summary = "All-people table",
    responses(
        (status = 200, description = "People rows", body = Vec<PersonRow>),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_all_people(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonRow>>, AppError> {
    let rows = run_listing(&state, &auth_user, Listing::AllPeople, None).await?;
    Ok(Json(rows))
}
