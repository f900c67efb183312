use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One user's answer to one question (unique per pair, enforced by an
/// index created on startup). Exactly one value column is populated,
/// matching the question's declared data type.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_question_answer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub question_id: i32,
    #[sea_orm(belongs_to, from = "question_id", to = "id")]
    pub question: HasOne<super::form_question::Entity>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub value_number: Option<i64>,
    pub value_string: Option<String>,
    pub value_date: Option<Date>,

    pub last_changed: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
