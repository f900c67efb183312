use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A registration form: an ordered set of dynamic questions, optionally
/// bound to camp years.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// URL slug.
    #[sea_orm(unique)]
    pub name: String,
    pub title: String,
    pub description: String,
    pub is_visible: bool,

    /// NULL binds the form to no particular year ("all people" listings).
    pub year: Option<i32>,
    #[sea_orm(belongs_to, from = "year", to = "year")]
    pub camp: Option<super::camp::Entity>,

    #[sea_orm(has_many)]
    pub questions: HasMany<super::form_question::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
