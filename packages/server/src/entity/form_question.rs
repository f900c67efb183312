use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Declared answer types. The answer row stores exactly one value column,
/// selected by this type.
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_STRING: &str = "string";
pub const TYPE_TEXTBOX: &str = "textbox";
pub const TYPE_DATE: &str = "date";
pub const TYPE_PESEL: &str = "pesel";
pub const TYPE_PHONE: &str = "phone";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub form_id: i32,
    #[sea_orm(belongs_to, from = "form_id", to = "id")]
    pub form: HasOne<super::form::Entity>,

    pub title: String,
    /// One of `number`, `string`, `textbox`, `date`, `pesel`, `phone`.
    pub data_type: String,
    pub is_required: bool,
    /// Locked questions reject answer edits (e.g. after the camp started).
    pub is_locked: bool,
    pub order: i32,

    #[sea_orm(has_many)]
    pub answers: HasMany<super::form_question_answer::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Which answer column this question's values live in.
    pub fn expects_date(&self) -> bool {
        self.data_type == TYPE_DATE
    }

    pub fn expects_number(&self) -> bool {
        self.data_type == TYPE_NUMBER
    }

    pub fn expects_string(&self) -> bool {
        matches!(
            self.data_type.as_str(),
            TYPE_STRING | TYPE_TEXTBOX | TYPE_PESEL | TYPE_PHONE
        )
    }
}
