use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single file in a multi-file solution.
/// Stored as JSON array in the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SolutionFile {
    /// Filename (e.g., "zad1.pdf", "solution.py")
    pub filename: String,
    /// File content
    pub content: String,
}

/// Zero-or-one per workshop participant.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solution")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub workshop_participant_id: i32,
    #[sea_orm(belongs_to, from = "workshop_participant_id", to = "id")]
    pub workshop_participant: HasOne<super::workshop_participant::Entity>,

    /// Message to the lecturer accompanying the uploaded files.
    pub message: String,
    /// Solution files stored as JSON array of {filename, content} objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub files: serde_json::Value,

    pub last_changed: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
