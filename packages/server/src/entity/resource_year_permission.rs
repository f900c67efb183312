use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grants camp participants of a given year access to a protected
/// static-resource path prefix.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource_year_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub year: i32,
    #[sea_orm(belongs_to, from = "year", to = "year")]
    pub camp: HasOne<super::camp::Entity>,

    pub display_name: String,
    /// Link shown to entitled users.
    pub access_url: String,
    /// Path prefix matched against the original request URI.
    pub path: String,
}

impl ActiveModelBehavior for ActiveModel {}
