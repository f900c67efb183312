use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::{double_option, validate_slug, validate_title};
use crate::services::summary::WorkshopCounts;

/// A workshop as returned to its lecturers and organizers. Public
/// callers get a reduced view with grading internals cleared.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopResponse {
    pub id: i32,
    pub year: i32,
    #[schema(example = "algorytmy")]
    pub name: String,
    #[schema(example = "Algorytmy i struktury danych")]
    pub title: String,
    /// `Accepted`, `Rejected`, `Cancelled`, or null while proposed.
    pub status: Option<String>,
    pub proposition_description: Option<String>,
    pub page_content: String,
    pub page_content_is_public: bool,
    pub is_qualifying: bool,
    pub solution_uploads_enabled: bool,
    pub max_points: Option<f64>,
    pub qualification_threshold: Option<f64>,
    pub lecturers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<WorkshopCounts>,
}

/// Request body for proposing a workshop.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ProposeWorkshopRequest {
    #[schema(example = "algorytmy")]
    pub name: String,
    #[schema(example = "Algorytmy i struktury danych")]
    pub title: String,
    /// Proposal text in Markdown.
    pub proposition_description: String,
    pub is_qualifying: bool,
    pub solution_uploads_enabled: bool,
    pub max_points: Option<f64>,
    pub qualification_threshold: Option<f64>,
}

pub fn validate_propose_workshop(req: &ProposeWorkshopRequest) -> Result<(), AppError> {
    validate_slug(&req.name)?;
    validate_title(&req.title)?;
    if req.proposition_description.trim().is_empty()
        || req.proposition_description.len() > 1_000_000
    {
        return Err(AppError::Validation(
            "Proposal description must be non-empty and at most 1MB".into(),
        ));
    }
    validate_points(req.max_points, req.qualification_threshold)?;
    Ok(())
}

/// Partial update of a workshop by its lecturer or an organizer.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct PatchWorkshopRequest {
    pub title: Option<String>,
    pub proposition_description: Option<String>,
    pub page_content: Option<String>,
    pub page_content_is_public: Option<bool>,
    pub is_qualifying: Option<bool>,
    pub solution_uploads_enabled: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_points: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub qualification_threshold: Option<Option<f64>>,
}

pub fn validate_patch_workshop(req: &PatchWorkshopRequest) -> Result<(), AppError> {
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(desc) = &req.proposition_description
        && (desc.trim().is_empty() || desc.len() > 1_000_000)
    {
        return Err(AppError::Validation(
            "Proposal description must be non-empty and at most 1MB".into(),
        ));
    }
    if let Some(page) = &req.page_content
        && page.len() > 1_000_000
    {
        return Err(AppError::Validation(
            "Page content must be at most 1MB".into(),
        ));
    }
    validate_points(
        req.max_points.flatten(),
        req.qualification_threshold.flatten(),
    )?;
    Ok(())
}

fn validate_points(max_points: Option<f64>, threshold: Option<f64>) -> Result<(), AppError> {
    if let Some(max) = max_points
        && (!max.is_finite() || max < 0.0)
    {
        return Err(AppError::Validation(
            "max_points must be a non-negative number".into(),
        ));
    }
    if let Some(threshold) = threshold
        && !threshold.is_finite()
    {
        return Err(AppError::Validation(
            "qualification_threshold must be a number".into(),
        ));
    }
    Ok(())
}

/// Workshop lifecycle decision.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ChangeWorkshopStatusRequest {
    /// One of `Accepted`, `Rejected`, `Cancelled`, or null to return the
    /// workshop to the proposed state.
    #[schema(example = "Accepted")]
    pub status: Option<String>,
}

pub fn validate_change_workshop_status(
    req: &ChangeWorkshopStatusRequest,
) -> Result<(), AppError> {
    if let Some(status) = &req.status
        && !matches!(status.as_str(), "Accepted" | "Rejected" | "Cancelled")
    {
        return Err(AppError::Validation(
            "Status must be Accepted, Rejected, or Cancelled".into(),
        ));
    }
    Ok(())
}

/// Grading of one participant by a lecturer.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct GradeRequest {
    /// Points awarded. Null clears the grade.
    #[schema(example = 7.5)]
    pub qualification_result: Option<f64>,
    #[serde(default)]
    pub comment: String,
}

pub fn validate_grade(req: &GradeRequest) -> Result<(), AppError> {
    if let Some(result) = req.qualification_result
        && !result.is_finite()
    {
        return Err(AppError::Validation(
            "qualification_result must be a number".into(),
        ));
    }
    if req.comment.len() > 10_000 {
        return Err(AppError::Validation(
            "Comment must be at most 10000 characters".into(),
        ));
    }
    Ok(())
}

/// A participant row on a workshop's grading page.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopParticipantResponse {
    pub workshop_participant_id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub has_solution: bool,
    pub qualification_result: Option<f64>,
    pub result_in_percent: Option<f64>,
    pub is_qualified: Option<bool>,
    pub comment: String,
}
