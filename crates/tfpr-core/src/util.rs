//! Path helpers for repository file locations

use thiserror::Error;

/// Errors related to path validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path traversal attempt detected: {0}")]
    TraversalAttempt(String),

    #[error("Invalid path component: {0}")]
    InvalidComponent(String),
}

/// Validate a value that is placed into a repository path as one segment
///
/// Segments must not contain path separators or `..`, must not start with
/// a dot, and must not contain whitespace or null bytes.
///
/// # Errors
/// Returns an error if the segment is unsafe
pub fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::InvalidComponent("Empty segment".to_string()));
    }

    if segment.contains('/') || segment.contains('\\') {
        return Err(PathError::TraversalAttempt(format!(
            "Segment contains path separator: {segment}"
        )));
    }

    if segment.contains("..") {
        return Err(PathError::TraversalAttempt(format!(
            "Segment contains parent directory reference: {segment}"
        )));
    }

    if segment.starts_with('.') {
        return Err(PathError::InvalidComponent(format!(
            "Segment cannot start with dot: {segment}"
        )));
    }

    if segment.contains('\0') || segment.chars().any(char::is_whitespace) {
        return Err(PathError::InvalidComponent(format!(
            "Segment contains whitespace or null byte: {segment:?}"
        )));
    }

    Ok(())
}

/// Path of the Terraform root module for an environment
#[must_use]
pub fn environment_main_tf(environment: &str) -> String {
    format!("terraform/env/{environment}/main.tf")
}
