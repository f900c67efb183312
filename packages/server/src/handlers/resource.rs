use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{
    camp_participation, resource_year_permission, user_profile, workshop, workshop_lecturer,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, MaybeAuthUser};
use crate::models::resource::ResourceResponse;
use crate::state::AppState;
use crate::utils::access;

/// Accepted participant or lecturer of an accepted workshop in a year.
async fn is_participating_in(
    db: &DatabaseConnection,
    profile: &user_profile::Model,
    year: i32,
) -> Result<bool, AppError> {
    let accepted = camp_participation::Entity::find()
        .filter(camp_participation::Column::UserProfileId.eq(profile.id))
        .filter(camp_participation::Column::Year.eq(year))
        .filter(camp_participation::Column::Status.eq(camp_participation::STATUS_ACCEPTED))
        .one(db)
        .await?
        .is_some();
    if accepted {
        return Ok(true);
    }
    let workshop_ids: Vec<i32> = workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::UserProfileId.eq(profile.id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.workshop_id)
        .collect();
    let lectures = workshop::Entity::find()
        .filter(workshop::Column::Id.is_in(workshop_ids))
        .filter(workshop::Column::Year.eq(year))
        .filter(workshop::Column::Status.eq(workshop::STATUS_ACCEPTED))
        .one(db)
        .await?
        .is_some();
    Ok(lectures)
}

/// Resources the requester is entitled to, for the navigation menu.
#[utoipa::path(
    get,
    path = "/resources",
    tag = "Resources",
    operation_id = "listMyResources",
    summary = "List accessible resources",
    responses(
        (status = 200, description = "Accessible resources", body = Vec<ResourceResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn list_my_resources(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceResponse>>, AppError> {
    let all = resource_year_permission::Entity::find()
        .order_by_desc(resource_year_permission::Column::Year)
        .all(&state.db)
        .await?;

    let see_all = auth_user.has_permission("resource:access_all");
    let profile = access::find_profile(&state.db, auth_user.user_id).await?;

    let mut out = Vec::new();
    for resource in all {
        if see_all || is_participating_in(&state.db, &profile, resource.year).await? {
            out.push(ResourceResponse {
                id: resource.id,
                year: resource.year,
                display_name: resource.display_name,
                access_url: resource.access_url,
            });
        }
    }
    Ok(Json(out))
}

/// Subrequest authentication for nginx `auth_request`: checks the
/// `X-Original-URI` header against the resource path prefixes the
/// requester is entitled to. Responds 200, 401, or 403 only.
#[utoipa::path(
    get,
    path = "/resources/auth",
    tag = "Resources",
    operation_id = "authResource",
    summary = "Resource access subrequest",
    responses(
        (status = 200, description = "Access granted"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Access denied"),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, maybe_user, headers))]
pub async fn auth_resource(
    maybe_user: MaybeAuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let Some(auth_user) = maybe_user.0 else {
        return Ok(StatusCode::UNAUTHORIZED);
    };
    if auth_user.has_permission("resource:access_all") {
        return Ok(StatusCode::OK);
    }

    let uri = headers
        .get("X-Original-URI")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let profile = access::find_profile(&state.db, auth_user.user_id).await?;
    for resource in resources_for_uri(&state.db, uri).await? {
        if is_participating_in(&state.db, &profile, resource.year).await? {
            return Ok(StatusCode::OK);
        }
    }
    Ok(StatusCode::FORBIDDEN)
}

/// Resources whose path prefixes the original URI. Resources with an
/// empty path never match.
async fn resources_for_uri(
    db: &DatabaseConnection,
    uri: &str,
) -> Result<Vec<resource_year_permission::Model>, AppError> {
    let all = resource_year_permission::Entity::find().all(db).await?;
    Ok(all
        .into_iter()
        .filter(|r| !r.path.is_empty() && uri.starts_with(&r.path))
        .collect())
}
