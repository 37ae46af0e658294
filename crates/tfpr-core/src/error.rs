//! Error types for the provisioning workflow

use thiserror::Error;
use tfpr_hcl::PatchError;

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Errors reported by a code host (content, branch and pull request APIs)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// Requested file, ref or repository does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The host answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never got a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response could not be understood
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Errors that can occur while provisioning a database
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Request is missing a field or carries an unusable value
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The Terraform file could not be patched
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// A code host call failed; nothing is retried
    #[error("Failed to {step}: {source}")]
    Repository {
        step: &'static str,
        source: RepoError,
    },
}

impl ProvisionError {
    pub(crate) fn repository(step: &'static str, source: RepoError) -> Self {
        Self::Repository { step, source }
    }

    /// Get the error code for CLI/API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Patch(err) => err.code(),
            Self::Repository { .. } => "REPOSITORY_ERROR",
        }
    }

    /// HTTP-style status for the requester
    ///
    /// Bad input is a 400. A target file without the expected list or a
    /// failing code host is a 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::Patch(err) if err.is_input_error() => 400,
            Self::Patch(_) | Self::Repository { .. } => 500,
        }
    }
}
