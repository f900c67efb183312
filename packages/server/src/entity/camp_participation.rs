use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Registration decision for a camp edition. `None` means registered but
/// not yet decided.
pub const STATUS_ACCEPTED: &str = "Accepted";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_CANCELLED: &str = "Cancelled";

/// A user's registration record for one camp year.
///
/// Workshop/solution counts and the result percentage are deliberately not
/// stored here: they are recomputed from the workshop participation set on
/// every read (`services::summary`), so they can never drift.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camp_participation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_profile_id: i32,
    #[sea_orm(belongs_to, from = "user_profile_id", to = "id")]
    pub user_profile: HasOne<super::user_profile::Entity>,

    pub year: i32,
    #[sea_orm(belongs_to, from = "year", to = "year")]
    pub camp: HasOne<super::camp::Entity>,

    /// One of `Accepted`, `Rejected`, `Cancelled`, or NULL (undecided).
    pub status: Option<String>,
    pub cover_letter: String,

    #[sea_orm(has_many)]
    pub workshop_participation: HasMany<super::workshop_participant::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
