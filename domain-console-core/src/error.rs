//! Unified error type definition

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_console_client::ApiError;

/// Generic catch-all shown when a failure has neither a backend message nor
/// an operation-specific fallback that applies.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A draft failed local validation. Field-scoped; resolved entirely
    /// within the owning panel and never reaches the network.
    #[error("Validation failed")]
    Validation {
        field_errors: BTreeMap<String, String>,
    },

    /// A domain-scoped operation was attempted with no domain selected.
    #[error("No domain is selected")]
    NoDomainSelected,

    /// A theme operation was attempted before the theme panel was ready.
    #[error("Theme is not loaded")]
    ThemeNotLoaded,

    /// Request failure from the backend client.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behavior (operator input, resource state) used
    /// for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::NoDomainSelected | Self::ThemeNotLoaded => true,
            Self::Api(e) => e.is_expected(),
        }
    }

    /// Resolves the operator-facing message for this failure.
    ///
    /// Resolution order: the backend's own `detail` message verbatim, then
    /// the operation-specific `fallback`, then [`GENERIC_FAILURE`] for
    /// failures outside the request/response contract (malformed bodies).
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(e) => match e {
                ApiError::Backend {
                    detail: Some(msg), ..
                } => msg.clone(),
                ApiError::Backend { detail: None, .. }
                | ApiError::Network { .. }
                | ApiError::Timeout { .. } => fallback.to_string(),
                ApiError::Parse { .. } | ApiError::Serialization { .. } => {
                    GENERIC_FAILURE.to_string()
                }
            },
            Self::Validation { .. } => fallback.to_string(),
            Self::NoDomainSelected | Self::ThemeNotLoaded => self.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
