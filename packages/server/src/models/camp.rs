use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_email};

/// One camp edition as listed publicly.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CampResponse {
    #[schema(example = 2024)]
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub proposal_end_date: Option<NaiveDate>,
    pub program_finalized: bool,
    /// Whether workshop proposals are currently accepted.
    pub proposals_open: bool,
    /// Whether participants can still register and results may change.
    pub qualification_editable: bool,
}

/// Request body for creating a camp edition.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCampRequest {
    #[schema(example = 2025)]
    pub year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub proposal_end_date: Option<NaiveDate>,
}

pub fn validate_create_camp(req: &CreateCampRequest) -> Result<(), AppError> {
    if req.year < 1900 || req.year > 9999 {
        return Err(AppError::Validation("Year out of range".into()));
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date)
        && end < start
    {
        return Err(AppError::Validation(
            "end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}

/// Partial update of a camp edition. Absent fields are left untouched.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PatchCampRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub proposal_end_date: Option<Option<NaiveDate>>,
    pub program_finalized: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub form_question_birth_date_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub form_question_arrival_date_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub form_question_departure_date_id: Option<Option<i32>>,
}

/// Email-only interest registration for a camp year.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterInterestRequest {
    #[schema(example = "kto@example.com")]
    pub email: String,
}

pub fn validate_register_interest(req: &RegisterInterestRequest) -> Result<(), AppError> {
    validate_email(&req.email)
}

/// One participant row of the accommodation-plan export. Arrival and
/// departure are clamped into the camp duration.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PlanRow {
    pub user_id: i32,
    pub full_name: String,
    pub gender: Option<String>,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
}
