use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::solution::SolutionFile;
use crate::error::AppError;

pub const MAX_SOLUTION_FILES: usize = 10;
pub const MAX_SOLUTION_BYTES: usize = 10_000_000;

/// Create or replace the requester's solution for a workshop.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpsertSolutionRequest {
    /// Message to the lecturer.
    #[serde(default)]
    pub message: String,
    pub files: Vec<SolutionFile>,
}

pub fn validate_upsert_solution(req: &UpsertSolutionRequest) -> Result<(), AppError> {
    if req.files.is_empty() {
        return Err(AppError::Validation(
            "Solution must contain at least one file".into(),
        ));
    }
    if req.files.len() > MAX_SOLUTION_FILES {
        return Err(AppError::Validation(format!(
            "Solution must contain at most {MAX_SOLUTION_FILES} files"
        )));
    }
    let total: usize = req.files.iter().map(|f| f.content.len()).sum();
    if total > MAX_SOLUTION_BYTES {
        return Err(AppError::Validation(
            "Solution files exceed the 10MB limit".into(),
        ));
    }
    for file in &req.files {
        let name = file.filename.trim();
        if name.is_empty() || name.len() > 255 || name.contains('/') || name.contains('\\') {
            return Err(AppError::Validation(
                "Filename must be 1-255 characters without path separators".into(),
            ));
        }
    }
    if req.message.len() > 10_000 {
        return Err(AppError::Validation(
            "Message must be at most 10000 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SolutionResponse {
    pub id: i32,
    pub workshop_participant_id: i32,
    pub message: String,
    pub files: Vec<SolutionFile>,
    pub last_changed: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> SolutionFile {
        SolutionFile {
            filename: name.into(),
            content: content.into(),
        }
    }

    #[test]
    fn rejects_empty_and_path_traversal() {
        let empty = UpsertSolutionRequest {
            message: String::new(),
            files: vec![],
        };
        assert!(validate_upsert_solution(&empty).is_err());

        let traversal = UpsertSolutionRequest {
            message: String::new(),
            files: vec![file("../etc/passwd", "x")],
        };
        assert!(validate_upsert_solution(&traversal).is_err());

        let ok = UpsertSolutionRequest {
            message: "done".into(),
            files: vec![file("zad1.pdf", "content")],
        };
        assert!(validate_upsert_solution(&ok).is_ok());
    }
}
