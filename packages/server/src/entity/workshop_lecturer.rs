use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_lecturer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub workshop_id: i32,
    #[sea_orm(primary_key)]
    pub user_profile_id: i32,
    #[sea_orm(belongs_to, from = "workshop_id", to = "id")]
    pub workshop: Option<super::workshop::Entity>,
    #[sea_orm(belongs_to, from = "user_profile_id", to = "id")]
    pub user_profile: Option<super::user_profile::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
