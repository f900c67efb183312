use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extended profile data, one row per account (enforced by a unique index).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// "M" / "F" or empty when undisclosed.
    pub gender: Option<String>,
    pub school: String,
    pub matura_exam_year: Option<i32>,
    pub how_do_you_know_about: String,
    /// Free-text page shown to other participants. Its length drives the
    /// profile completeness flag.
    pub profile_page: String,

    #[sea_orm(has_many)]
    pub camp_participation: HasMany<super::camp_participation::Entity>,

    #[sea_orm(has_many, via = "workshop_lecturer")]
    pub lecturer_workshops: HasMany<super::workshop::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
