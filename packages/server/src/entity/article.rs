use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A CMS page addressed by slug.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
    pub title: String,
    pub content: String,
    pub on_menubar: bool,

    pub modified_by_id: Option<i32>,
    #[sea_orm(belongs_to, from = "modified_by_id", to = "id")]
    pub modified_by: Option<super::user::Entity>,

    pub modified_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
