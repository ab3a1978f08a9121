use thiserror::Error;

use crate::validation::FieldErrors;

/// Failures of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Request timeout")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    /// The backend answered `{ success: false }`.
    #[error("{0}")]
    Rejected(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Identity provider is not available")]
    Unavailable,

    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(String),

    #[error("Unexpected sign-up status: {0}")]
    UnexpectedSignUpStatus(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fatal outcomes of the dashboard fetch. Analytics failures are not here:
/// they only produce a notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("User is not signed in")]
    NotSignedIn,

    #[error("Unable to get authentication token")]
    MissingToken,

    #[error("Expenses API error: {status} - {body}")]
    ExpensesUnavailable { status: u16, body: String },

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FieldErrors),

    #[error("User is not signed in")]
    NotSignedIn,

    #[error("Unable to get authentication token")]
    MissingToken,

    #[error("{0}")]
    Rejected(String),

    #[error("Failed to add expense: {0}")]
    Request(ApiError),
}
