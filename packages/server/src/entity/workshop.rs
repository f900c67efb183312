use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workshop lifecycle. `None` means proposed, awaiting a decision.
pub const STATUS_ACCEPTED: &str = "Accepted";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_CANCELLED: &str = "Cancelled";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub year: i32,
    #[sea_orm(belongs_to, from = "year", to = "year")]
    pub camp: HasOne<super::camp::Entity>,

    /// URL slug, unique within a year.
    pub name: String,
    pub title: String,

    /// One of `Accepted`, `Rejected`, `Cancelled`, or NULL (proposed).
    pub status: Option<String>,

    /// Proposal text shown to the qualification committee, in Markdown.
    pub proposition_description: String,
    /// Public workshop page, in Markdown.
    pub page_content: String,
    pub page_content_is_public: bool,

    /// Whether participants must qualify via graded solutions.
    pub is_qualifying: bool,
    /// Whether solution uploads are expected for qualification.
    pub solution_uploads_enabled: bool,
    /// Maximum attainable points. When NULL the best entered result is used
    /// as the grading denominator.
    pub max_points: Option<f64>,
    /// Minimum result to qualify. NULL disables the qualified/not-qualified
    /// verdict.
    pub qualification_threshold: Option<f64>,

    #[sea_orm(has_many)]
    pub participants: HasMany<super::workshop_participant::Entity>,

    #[sea_orm(has_many, via = "workshop_lecturer")]
    pub lecturers: HasMany<super::user_profile::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Accepted and cancelled workshops appear in the public program.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some(STATUS_ACCEPTED) | Some(STATUS_CANCELLED)
        )
    }

    pub fn is_accepted(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ACCEPTED)
    }
}
