//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Store names
pub const MAX_NAME_LEN: usize = 200;

/// Store descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Tag labels
pub const MAX_TAG_LEN: usize = 100;

/// Photo filename references
pub const MAX_PHOTO_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty (after trimming) and within
/// the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a longitude/latitude pair.
pub fn validate_coordinates(lng: f64, lat: f64) -> Result<(), AppError> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::Validation(format!(
            "longitude out of range: {lng}"
        )));
    }
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::Validation(format!("latitude out of range: {lat}")));
    }
    Ok(())
}

/// Validate a tag list (each label non-empty, within limit).
pub fn validate_tags(tags: &[String]) -> Result<(), AppError> {
    for tag in tags {
        validate_required_text(tag, "tag", MAX_TAG_LEN)?;
    }
    Ok(())
}
