use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a URL slug (1-64 chars, lowercase alphanumeric and hyphens).
pub fn validate_slug(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > 64 {
        return Err(AppError::Validation("Name must be 1-64 characters".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::Validation(
            "Name must contain only lowercase letters, digits, and hyphens".into(),
        ));
    }
    Ok(())
}

/// Minimal shape check for an email address.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || email.len() > 254 {
        return Err(AppError::Validation(
            "Email must be 1-254 characters".into(),
        ));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AppError::Validation("Email must contain '@'".into()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::Validation("Email is not valid".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(validate_slug("algorytmy-2024").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Duże-Litery").is_err());
        assert!(validate_slug("under_score").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("kto@example.com").is_ok());
        assert!(validate_email("kto@localhost").is_err());
        assert!(validate_email("example.com").is_err());
        assert!(validate_email("").is_err());
    }
}
