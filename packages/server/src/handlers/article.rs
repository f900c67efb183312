use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{article, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::article::{
    ArticleResponse, MenuEntry, UpsertArticleRequest, validate_upsert_article,
};
use crate::state::AppState;

async fn to_response(
    db: &DatabaseConnection,
    model: article::Model,
) -> Result<ArticleResponse, AppError> {
    let modified_by = match model.modified_by_id {
        Some(id) => user::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(|u| u.full_name()),
        None => None,
    };
    Ok(ArticleResponse {
        id: model.id,
        name: model.name,
        title: model.title,
        content: model.content,
        on_menubar: model.on_menubar,
        modified_by,
        modified_at: model.modified_at,
    })
}

/// Menubar entries, for the public navigation.
#[utoipa::path(
    get,
    path = "/articles/menu",
    tag = "Articles",
    operation_id = "getMenu",
    summary = "Menubar entries",
    responses(
        (status = 200, description = "Menubar entries", body = Vec<MenuEntry>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuEntry>>, AppError> {
    let entries = article::Entity::find()
        .filter(article::Column::OnMenubar.eq(true))
        .order_by_asc(article::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| MenuEntry {
            name: a.name,
            title: a.title,
        })
        .collect();
    Ok(Json(entries))
}

/// Get an article by slug.
#[utoipa::path(
    get,
    path = "/articles/{name}",
    tag = "Articles",
    operation_id = "getArticle",
    summary = "Get an article",
    params(("name" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "The article", body = ArticleResponse),
        (status = 404, description = "Unknown article (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ArticleResponse>, AppError> {
    let found = article::Entity::find()
        .filter(article::Column::Name.eq(&name))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article '{name}' not found")))?;
    Ok(Json(to_response(&state.db, found).await?))
}

/// Create or update the article at a slug.
#[utoipa::path(
    put,
    path = "/articles/{name}",
    tag = "Articles",
    operation_id = "upsertArticle",
    summary = "Create or update an article",
    params(("name" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article updated", body = ArticleResponse),
        (status = 201, description = "Article created", body = ArticleResponse),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn upsert_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
    AppJson(payload): AppJson<UpsertArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("article:edit")?;
    validate_upsert_article(&name, &payload)?;

    let existing = article::Entity::find()
        .filter(article::Column::Name.eq(&name))
        .one(&state.db)
        .await?;

    let (status, stored) = match existing {
        Some(current) => {
            let mut active: article::ActiveModel = current.into();
            active.title = Set(payload.title.trim().to_string());
            active.content = Set(payload.content);
            active.on_menubar = Set(payload.on_menubar);
            active.modified_by_id = Set(Some(auth_user.user_id));
            active.modified_at = Set(Utc::now());
            (StatusCode::OK, active.update(&state.db).await?)
        }
        None => {
            let created = article::ActiveModel {
                name: Set(name),
                title: Set(payload.title.trim().to_string()),
                content: Set(payload.content),
                on_menubar: Set(payload.on_menubar),
                modified_by_id: Set(Some(auth_user.user_id)),
                modified_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&state.db)
            .await?;
            (StatusCode::CREATED, created)
        }
    };

    Ok((status, Json(to_response(&state.db, stored).await?)))
}
