use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::double_option;
use crate::services::summary::YearSummary;

/// Another participant's profile, as visible to the requester.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub user_profile_id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub gender: Option<String>,
    pub school: String,
    pub matura_exam_year: Option<i32>,
    pub profile_page: String,
    pub has_completed_profile: bool,
}

/// Partial update of the requester's own profile.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PatchProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    pub school: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub matura_exam_year: Option<Option<i32>>,
    pub how_do_you_know_about: Option<String>,
    pub profile_page: Option<String>,
}

pub fn validate_patch_profile(req: &PatchProfileRequest) -> Result<(), AppError> {
    if let Some(Some(gender)) = &req.gender
        && !matches!(gender.as_str(), "M" | "F")
    {
        return Err(AppError::Validation("Gender must be 'M' or 'F'".into()));
    }
    if let Some(school) = &req.school
        && school.chars().count() > 256
    {
        return Err(AppError::Validation(
            "School must be at most 256 characters".into(),
        ));
    }
    if let Some(page) = &req.profile_page
        && page.len() > 1_000_000
    {
        return Err(AppError::Validation(
            "Profile page must be at most 1MB".into(),
        ));
    }
    Ok(())
}

/// A camp-year registration record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ParticipationResponse {
    pub id: i32,
    pub year: i32,
    /// `Accepted`, `Rejected`, `Cancelled`, or null while undecided.
    pub status: Option<String>,
    pub cover_letter: String,
}

impl From<crate::entity::camp_participation::Model> for ParticipationResponse {
    fn from(cp: crate::entity::camp_participation::Model) -> Self {
        Self {
            id: cp.id,
            year: cp.year,
            status: cp.status,
            cover_letter: cp.cover_letter,
        }
    }
}

/// The requester's qualification history, split into the active edition
/// and everything before it.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MyStatusResponse {
    pub has_completed_profile: bool,
    pub current: Vec<YearSummary>,
    pub past: Vec<YearSummary>,
}

/// Cover letter accompanying a camp-year registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CoverLetterRequest {
    pub cover_letter: String,
}

pub fn validate_cover_letter(req: &CoverLetterRequest) -> Result<(), AppError> {
    if req.cover_letter.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Cover letter must be at most 1MB".into(),
        ));
    }
    Ok(())
}

/// Registration decision for a participation record.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct QualifyRequest {
    /// One of `Accepted`, `Rejected`, `Cancelled`, or null to clear the
    /// decision.
    #[schema(example = "Accepted")]
    pub status: Option<String>,
}

pub fn validate_qualify(req: &QualifyRequest) -> Result<(), AppError> {
    if let Some(status) = &req.status
        && !matches!(status.as_str(), "Accepted" | "Rejected" | "Cancelled")
    {
        return Err(AppError::Validation(
            "Status must be Accepted, Rejected, or Cancelled".into(),
        ));
    }
    Ok(())
}
