use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An email address that registered interest in a camp year without
/// creating an account. Unique per (year, email).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "camp_interest_email")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub year: i32,
    #[sea_orm(belongs_to, from = "year", to = "year")]
    pub camp: HasOne<super::camp::Entity>,

    pub email: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
