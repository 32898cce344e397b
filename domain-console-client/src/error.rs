use serde::{Deserialize, Serialize};

/// Unified error type for all backend API operations.
///
/// Every failed request is normalized into one of these variants. When the
/// backend supplies a human-readable `detail` field it is carried verbatim in
/// [`Backend`](Self::Backend) so callers can surface it to the operator
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, etc.). No HTTP status is available.
    Network {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The backend answered with a non-success status.
    Backend {
        /// HTTP status code of the response.
        status: u16,
        /// The backend's own `detail` message, if the error body carried one.
        detail: Option<String>,
    },

    /// Failed to parse a success response body.
    Parse {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    Serialization {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (operator input, resource state)
    /// rather than an infrastructure fault. Used for log classification:
    /// `warn` when `true`, `error` when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Backend { status, .. } if *status < 500)
    }

    /// HTTP status code, when the backend produced a response at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's own human-readable message, verbatim, when present.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::Backend { status, detail } => {
                if let Some(msg) = detail {
                    write!(f, "Backend error (HTTP {status}): {msg}")
                } else {
                    write!(f, "Backend error (HTTP {status})")
                }
            }
            Self::Parse { detail } => write!(f, "Parse error: {detail}"),
            Self::Serialization { detail } => write!(f, "Serialization error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
