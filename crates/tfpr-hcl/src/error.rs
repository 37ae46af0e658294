//! Error types for list patching

use thiserror::Error;

/// Result type for patch operations
pub type HclResult<T> = Result<T, PatchError>;

/// Errors that can occur while patching a list assignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// No `name = [ ... ]` assignment exists in the document
    #[error("List '{list}' not found in document")]
    ListNotFound { list: String },

    /// The value cannot be written safely into a quoted list item
    #[error("Invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: &'static str },

    /// The list name is not a configuration identifier
    #[error("Invalid list name '{name}': {reason}")]
    InvalidListName { name: String, reason: &'static str },
}

impl PatchError {
    /// Get the error code for CLI/API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ListNotFound { .. } => "LIST_NOT_FOUND",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::InvalidListName { .. } => "INVALID_LIST_NAME",
        }
    }

    /// Whether the failure was caused by caller input rather than by the
    /// shape of the document
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidValue { .. } | Self::InvalidListName { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let not_found = PatchError::ListNotFound {
            list: "postgres_list".into(),
        };
        assert_eq!(not_found.code(), "LIST_NOT_FOUND");
        assert!(!not_found.is_input_error());

        let invalid = PatchError::InvalidValue {
            value: "bad,value".into(),
            reason: "contains ','",
        };
        assert_eq!(invalid.code(), "INVALID_VALUE");
        assert!(invalid.is_input_error());
    }

    #[test]
    fn test_error_display_names_list() {
        let err = PatchError::ListNotFound {
            list: "postgres_list".into(),
        };
        assert_eq!(err.to_string(), "List 'postgres_list' not found in document");
    }
}
