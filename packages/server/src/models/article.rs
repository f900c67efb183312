use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{validate_slug, validate_title};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleResponse {
    pub id: i32,
    #[schema(example = "regulamin")]
    pub name: String,
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub on_menubar: bool,
    pub modified_by: Option<String>,
    pub modified_at: DateTime<Utc>,
}

/// Entry on the public menubar.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MenuEntry {
    pub name: String,
    pub title: String,
}

/// Create or update the article at a slug.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpsertArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub on_menubar: bool,
}

pub fn validate_upsert_article(name: &str, req: &UpsertArticleRequest) -> Result<(), AppError> {
    validate_slug(name)?;
    validate_title(&req.title)?;
    if req.content.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Content must be at most 1MB".into(),
        ));
    }
    Ok(())
}
