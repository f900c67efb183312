use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A participant's registration to a single workshop.
///
/// `qualification_result` is NULL until a lecturer grades the participant.
/// The qualified/not-qualified verdict and the percentage are derived at
/// read time (`services::summary`), never stored.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub camp_participation_id: i32,
    #[sea_orm(belongs_to, from = "camp_participation_id", to = "id")]
    pub camp_participation: HasOne<super::camp_participation::Entity>,

    pub workshop_id: i32,
    #[sea_orm(belongs_to, from = "workshop_id", to = "id")]
    pub workshop: HasOne<super::workshop::Entity>,

    /// Points awarded by the lecturer. NULL = not graded yet.
    pub qualification_result: Option<f64>,
    /// Lecturer's free-text comment on the grading.
    pub comment: String,

    #[sea_orm(has_one)]
    pub solution: HasOne<super::solution::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
