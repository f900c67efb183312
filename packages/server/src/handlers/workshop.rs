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
    camp_participation, solution, user, user_profile, workshop, workshop_lecturer,
    workshop_participant,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::extractors::json::AppJson;
use crate::handlers::camp::find_camp;
use crate::handlers::participation::find_participation;
use crate::models::workshop::{
    ChangeWorkshopStatusRequest, GradeRequest, PatchWorkshopRequest, ProposeWorkshopRequest,
    WorkshopParticipantResponse, WorkshopResponse, validate_change_workshop_status,
    validate_grade, validate_patch_workshop, validate_propose_workshop,
};
use crate::services::summary;
use crate::state::AppState;
use crate::utils::access;

async fn find_workshop<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<workshop::Model, AppError> {
    workshop::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}

async fn lecturer_names<C: ConnectionTrait>(
    db: &C,
    workshop_id: i32,
) -> Result<Vec<String>, AppError> {
    let profile_ids: Vec<i32> = workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::WorkshopId.eq(workshop_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.user_profile_id)
        .collect();
    let mut names = Vec::with_capacity(profile_ids.len());
    for profile in user_profile::Entity::find()
        .filter(user_profile::Column::Id.is_in(profile_ids))
        .all(db)
        .await?
    {
        if let Some(account) = user::Entity::find_by_id(profile.user_id).one(db).await? {
            names.push(account.full_name());
        }
    }
    Ok(names)
}

/// Project a workshop for the given privilege level. `privileged` means
/// a lecturer of this workshop or an organizer with see-all rights.
fn to_response(
    workshop: &workshop::Model,
    lecturers: Vec<String>,
    privileged: bool,
    counts: Option<summary::WorkshopCounts>,
) -> WorkshopResponse {
    WorkshopResponse {
        id: workshop.id,
        year: workshop.year,
        name: workshop.name.clone(),
        title: workshop.title.clone(),
        status: workshop.status.clone(),
        proposition_description: privileged
            .then(|| workshop.proposition_description.clone()),
        page_content: if workshop.page_content_is_public || privileged {
            workshop.page_content.clone()
        } else {
            String::new()
        },
        page_content_is_public: workshop.page_content_is_public,
        is_qualifying: workshop.is_qualifying,
        solution_uploads_enabled: workshop.solution_uploads_enabled,
        max_points: workshop.max_points,
        qualification_threshold: workshop.qualification_threshold,
        lecturers,
        counts,
    }
}

async fn is_privileged(
    db: &DatabaseConnection,
    auth_user: Option<&AuthUser>,
    workshop: &workshop::Model,
) -> Result<bool, AppError> {
    let Some(auth_user) = auth_user else {
        return Ok(false);
    };
    if auth_user.has_permission("workshop:see_all") {
        return Ok(true);
    }
    let profile = access::find_profile(db, auth_user.user_id).await?;
    access::is_lecturer(db, workshop.id, profile.id).await
}

/// List a year's workshops. Callers without see-all rights get only the
/// publicly visible ones, without counts.
#[utoipa::path(
    get,
    path = "/camps/{year}/workshops",
    tag = "Workshops",
    operation_id = "listWorkshops",
    summary = "List workshops of a year",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 200, description = "Workshops", body = Vec<WorkshopResponse>),
        (status = 404, description = "Unknown year (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, maybe_user))]
pub async fn list_workshops(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<WorkshopResponse>>, AppError> {
    find_camp(&state.db, year).await?;
    let see_all = maybe_user.has_permission("workshop:see_all");

    let workshops = workshop::Entity::find()
        .filter(workshop::Column::Year.eq(year))
        .order_by_asc(workshop::Column::Name)
        .all(&state.db)
        .await?;

    let mut out = Vec::with_capacity(workshops.len());
    for w in &workshops {
        if !see_all && !w.is_publicly_visible() {
            continue;
        }
        let lecturers = lecturer_names(&state.db, w.id).await?;
        let counts = if see_all {
            let participants = workshop_participant::Entity::find()
                .filter(workshop_participant::Column::WorkshopId.eq(w.id))
                .all(&state.db)
                .await?;
            let solutions = solutions_of(&state.db, &participants).await?;
            Some(summary::derive_workshop_counts(w, &participants, &solutions))
        } else {
            None
        };
        out.push(to_response(w, lecturers, see_all, counts));
    }
    Ok(Json(out))
}

/// Propose a workshop for a camp year. The proposer becomes its first
/// lecturer.
#[utoipa::path(
    post,
    path = "/camps/{year}/workshops",
    tag = "Workshops",
    operation_id = "proposeWorkshop",
    summary = "Propose a workshop",
    params(("year" = i32, Path, description = "Camp year")),
    responses(
        (status = 201, description = "Proposal created", body = WorkshopResponse),
        (status = 400, description = "Validation failed (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Proposals closed or name taken (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn propose_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(year): Path<i32>,
    AppJson(payload): AppJson<ProposeWorkshopRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_propose_workshop(&payload)?;
    let camp = find_camp(&state.db, year).await?;
    if !camp.are_proposals_open(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Workshop proposals for this edition are closed".into(),
        ));
    }
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;

    let txn = state.db.begin().await?;

    let created = workshop::ActiveModel {
        year: Set(year),
        name: Set(payload.name.clone()),
        title: Set(payload.title.trim().to_string()),
        status: Set(None),
        proposition_description: Set(payload.proposition_description),
        page_content: Set(String::new()),
        page_content_is_public: Set(false),
        is_qualifying: Set(payload.is_qualifying),
        solution_uploads_enabled: Set(payload.solution_uploads_enabled),
        max_points: Set(payload.max_points),
        qualification_threshold: Set(payload.qualification_threshold),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(format!(
            "Workshop '{}' already exists for {year}",
            payload.name
        )),
        _ => AppError::from(e),
    })?;

    workshop_lecturer::ActiveModel {
        workshop_id: Set(created.id),
        user_profile_id: Set(profile.id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    let lecturers = lecturer_names(&state.db, created.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(to_response(&created, lecturers, true, None)),
    ))
}

/// Get one workshop by year and slug.
#[utoipa::path(
    get,
    path = "/camps/{year}/workshops/{name}",
    tag = "Workshops",
    operation_id = "getWorkshop",
    summary = "Get a workshop",
    params(
        ("year" = i32, Path, description = "Camp year"),
        ("name" = String, Path, description = "Workshop slug"),
    ),
    responses(
        (status = 200, description = "The workshop", body = WorkshopResponse),
        (status = 404, description = "Unknown or not visible (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, maybe_user))]
pub async fn get_workshop(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    Path((year, name)): Path<(i32, String)>,
) -> Result<Json<WorkshopResponse>, AppError> {
    let workshop = workshop::Entity::find()
        .filter(workshop::Column::Year.eq(year))
        .filter(workshop::Column::Name.eq(&name))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))?;

    let privileged = is_privileged(&state.db, maybe_user.0.as_ref(), &workshop).await?;
    if !privileged && !workshop.is_publicly_visible() {
        // Proposed and rejected workshops are invisible, not forbidden.
        return Err(AppError::NotFound("Workshop not found".into()));
    }

    let counts = if privileged {
        let participants = workshop_participant::Entity::find()
            .filter(workshop_participant::Column::WorkshopId.eq(workshop.id))
            .all(&state.db)
            .await?;
        let solutions = solutions_of(&state.db, &participants).await?;
        Some(summary::derive_workshop_counts(
            &workshop,
            &participants,
            &solutions,
        ))
    } else {
        None
    };

    let lecturers = lecturer_names(&state.db, workshop.id).await?;
    Ok(Json(to_response(&workshop, lecturers, privileged, counts)))
}

/// Update a workshop. Allowed for its lecturers and organizers with
/// edit-all rights.
#[utoipa::path(
    patch,
    path = "/workshops/{id}",
    tag = "Workshops",
    operation_id = "patchWorkshop",
    summary = "Update a workshop",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Workshop updated", body = WorkshopResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown workshop (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn patch_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<PatchWorkshopRequest>,
) -> Result<Json<WorkshopResponse>, AppError> {
    validate_patch_workshop(&payload)?;
    let workshop = find_workshop(&state.db, id).await?;

    if !auth_user.has_permission("workshop:edit_all") {
        let profile = access::find_profile(&state.db, auth_user.user_id).await?;
        if !access::is_lecturer(&state.db, workshop.id, profile.id).await? {
            return Err(AppError::PermissionDenied);
        }
    }

    let mut active: workshop::ActiveModel = workshop.into();
    if let Some(v) = payload.title {
        active.title = Set(v.trim().to_string());
    }
    if let Some(v) = payload.proposition_description {
        active.proposition_description = Set(v);
    }
    if let Some(v) = payload.page_content {
        active.page_content = Set(v);
    }
    if let Some(v) = payload.page_content_is_public {
        active.page_content_is_public = Set(v);
    }
    if let Some(v) = payload.is_qualifying {
        active.is_qualifying = Set(v);
    }
    if let Some(v) = payload.solution_uploads_enabled {
        active.solution_uploads_enabled = Set(v);
    }
    if let Some(v) = payload.max_points {
        active.max_points = Set(v);
    }
    if let Some(v) = payload.qualification_threshold {
        active.qualification_threshold = Set(v);
    }
    let updated = active.update(&state.db).await?;

    let lecturers = lecturer_names(&state.db, updated.id).await?;
    Ok(Json(to_response(&updated, lecturers, true, None)))
}

/// Decide a workshop proposal. Locked once the year's program is
/// finalized.
#[utoipa::path(
    put,
    path = "/workshops/{id}/status",
    tag = "Workshops",
    operation_id = "changeWorkshopStatus",
    summary = "Decide a workshop proposal",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Status changed", body = WorkshopResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Program already finalized (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn change_workshop_status(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<ChangeWorkshopStatusRequest>,
) -> Result<Json<WorkshopResponse>, AppError> {
    auth_user.require_permission("workshop:change_status")?;
    validate_change_workshop_status(&payload)?;

    let workshop = find_workshop(&state.db, id).await?;
    let camp = find_camp(&state.db, workshop.year).await?;
    if camp.program_finalized {
        return Err(AppError::Conflict(
            "The workshop program of this edition is finalized".into(),
        ));
    }

    let mut active: workshop::ActiveModel = workshop.into();
    active.status = Set(payload.status);
    let updated = active.update(&state.db).await?;

    let lecturers = lecturer_names(&state.db, updated.id).await?;
    Ok(Json(to_response(&updated, lecturers, true, None)))
}

/// Register the requester for a workshop. Creates the camp-year
/// registration on the fly when missing.
#[utoipa::path(
    post,
    path = "/workshops/{id}/register",
    tag = "Workshops",
    operation_id = "registerToWorkshop",
    summary = "Register for a workshop",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 201, description = "Registered"),
        (status = 404, description = "Unknown or not visible (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Closed or already registered (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn register_to_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let workshop = find_workshop(&state.db, id).await?;
    if !workshop.is_accepted() {
        return Err(AppError::NotFound("Workshop not found".into()));
    }
    let camp = find_camp(&state.db, workshop.year).await?;
    if !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Qualification for this workshop has ended".into(),
        ));
    }

    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    let txn = state.db.begin().await?;

    let participation = match find_participation(&txn, profile.id, workshop.year).await? {
        Some(cp) => cp,
        None => {
            camp_participation::ActiveModel {
                user_profile_id: Set(profile.id),
                year: Set(workshop.year),
                cover_letter: Set(String::new()),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    let existing = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::CampParticipationId.eq(participation.id))
        .filter(workshop_participant::Column::WorkshopId.eq(workshop.id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Already registered for this workshop".into(),
        ));
    }

    workshop_participant::ActiveModel {
        camp_participation_id: Set(participation.id),
        workshop_id: Set(workshop.id),
        qualification_result: Set(None),
        comment: Set(String::new()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(StatusCode::CREATED)
}

/// Withdraw from a workshop. Refused once grading has started for this
/// registration.
#[utoipa::path(
    delete,
    path = "/workshops/{id}/register",
    tag = "Workshops",
    operation_id = "unregisterFromWorkshop",
    summary = "Withdraw from a workshop",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 204, description = "Withdrawn"),
        (status = 404, description = "Not registered (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Grading started or closed (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn unregister_from_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let workshop = find_workshop(&state.db, id).await?;
    let camp = find_camp(&state.db, workshop.year).await?;
    if !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Qualification for this workshop has ended".into(),
        ));
    }

    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    let participation = find_participation(&state.db, profile.id, workshop.year)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this workshop".into()))?;

    let wp = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::CampParticipationId.eq(participation.id))
        .filter(workshop_participant::Column::WorkshopId.eq(workshop.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this workshop".into()))?;

    if wp.qualification_result.is_some() || !wp.comment.is_empty() {
        return Err(AppError::Conflict(
            "Cannot withdraw after grading has started".into(),
        ));
    }
    let has_solution = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.eq(wp.id))
        .one(&state.db)
        .await?
        .is_some();
    if has_solution {
        return Err(AppError::Conflict(
            "Cannot withdraw after submitting a solution".into(),
        ));
    }

    wp.delete(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The grading table of a workshop.
#[utoipa::path(
    get,
    path = "/workshops/{id}/participants",
    tag = "Workshops",
    operation_id = "listWorkshopParticipants",
    summary = "List a workshop's participants",
    params(("id" = i32, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Participant rows", body = Vec<WorkshopParticipantResponse>),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_workshop_participants(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<WorkshopParticipantResponse>>, AppError> {
    let workshop = find_workshop(&state.db, id).await?;
    if !is_privileged(&state.db, Some(&auth_user), &workshop).await? {
        return Err(AppError::PermissionDenied);
    }

    let participants = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::WorkshopId.eq(workshop.id))
        .order_by_asc(workshop_participant::Column::Id)
        .all(&state.db)
        .await?;
    let solutions = solutions_of(&state.db, &participants).await?;
    let max_entered = summary::max_entered_results(&state.db, &[workshop.id]).await?;
    let max = max_entered.get(&workshop.id).copied();
    let cap = state.config.qualification.max_result_percent;

    let mut rows = Vec::with_capacity(participants.len());
    for wp in &participants {
        let participation = camp_participation::Entity::find_by_id(wp.camp_participation_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("participant {} has no participation", wp.id))
            })?;
        let profile = user_profile::Entity::find_by_id(participation.user_profile_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal("participation has no profile".into()))?;
        let account = user::Entity::find_by_id(profile.user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Internal("profile has no user row".into()))?;

        rows.push(WorkshopParticipantResponse {
            workshop_participant_id: wp.id,
            user_id: account.id,
            full_name: account.full_name(),
            email: account.email,
            has_solution: solutions.contains(&wp.id),
            qualification_result: wp.qualification_result,
            result_in_percent: summary::result_in_percent(
                &workshop,
                wp.qualification_result,
                max,
                cap,
            ),
            is_qualified: summary::is_qualified(&workshop, wp.qualification_result),
            comment: wp.comment.clone(),
        });
    }
    Ok(Json(rows))
}

/// Grade one participant of a workshop.
#[utoipa::path(
    put,
    path = "/workshops/{id}/participants/{wp_id}/grade",
    tag = "Workshops",
    operation_id = "gradeParticipant",
    summary = "Grade a participant",
    params(
        ("id" = i32, Path, description = "Workshop ID"),
        ("wp_id" = i32, Path, description = "Workshop participant ID"),
    ),
    responses(
        (status = 200, description = "Grade stored", body = WorkshopParticipantResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Not gradable (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn grade_participant(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, wp_id)): Path<(i32, i32)>,
    AppJson(payload): AppJson<GradeRequest>,
) -> Result<Json<WorkshopParticipantResponse>, AppError> {
    validate_grade(&payload)?;
    let workshop = find_workshop(&state.db, id).await?;

    if !auth_user.has_permission("workshop:edit_all") {
        let profile = access::find_profile(&state.db, auth_user.user_id).await?;
        if !access::is_lecturer(&state.db, workshop.id, profile.id).await? {
            return Err(AppError::PermissionDenied);
        }
    }

    if !workshop.is_qualifying {
        return Err(AppError::Conflict(
            "This workshop has no qualification".into(),
        ));
    }
    let camp = find_camp(&state.db, workshop.year).await?;
    if camp.program_finalized && !camp.is_qualification_editable(Utc::now().date_naive()) {
        return Err(AppError::Conflict(
            "Qualification results of this edition are locked".into(),
        ));
    }

    let wp = workshop_participant::Entity::find_by_id(wp_id)
        .one(&state.db)
        .await?
        .filter(|wp| wp.workshop_id == workshop.id)
        .ok_or_else(|| AppError::NotFound("Workshop participant not found".into()))?;

    let has_solution = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.eq(wp.id))
        .one(&state.db)
        .await?
        .is_some();
    if workshop.solution_uploads_enabled && !has_solution {
        return Err(AppError::Conflict("No solution was submitted".into()));
    }

    let mut active: workshop_participant::ActiveModel = wp.into();
    active.qualification_result = Set(payload.qualification_result);
    active.comment = Set(payload.comment);
    let updated = active.update(&state.db).await?;

    let participation = camp_participation::Entity::find_by_id(updated.camp_participation_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("participant has no participation".into()))?;
    let profile = user_profile::Entity::find_by_id(participation.user_profile_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("participation has no profile".into()))?;
    let account = user::Entity::find_by_id(profile.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal("profile has no user row".into()))?;

    let max_entered = summary::max_entered_results(&state.db, &[workshop.id]).await?;
    let max = max_entered.get(&workshop.id).copied();
    let cap = state.config.qualification.max_result_percent;

    Ok(Json(WorkshopParticipantResponse {
        workshop_participant_id: updated.id,
        user_id: account.id,
        full_name: account.full_name(),
        email: account.email,
        has_solution,
        qualification_result: updated.qualification_result,
        result_in_percent: summary::result_in_percent(
            &workshop,
            updated.qualification_result,
            max,
            cap,
        ),
        is_qualified: summary::is_qualified(&workshop, updated.qualification_result),
        comment: updated.comment,
    }))
}

async fn solutions_of<C: ConnectionTrait>(
    db: &C,
    participants: &[workshop_participant::Model],
) -> Result<std::collections::HashSet<i32>, AppError> {
    let ids: Vec<i32> = participants.iter().map(|p| p.id).collect();
    let set = solution::Entity::find()
        .filter(solution::Column::WorkshopParticipantId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| s.workshop_participant_id)
        .collect();
    Ok(set)
}
