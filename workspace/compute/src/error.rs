use common::ErrorBody;
use thiserror::Error;
use tracing::{error, instrument};

/// Failure of a single backend call.
///
/// `Display` yields the text shown to the user: the backend's own `error`
/// message when it sent one, otherwise a description of the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response carrying an `{error}` body
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Non-2xx response without a readable error body
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The call ran past its time bound
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its status and raw body.
    #[instrument(skip(body))]
    pub fn from_response(status: u16, body: &str) -> Self {
        let err = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => ApiError::Backend {
                status,
                message: parsed.error,
            },
            _ => ApiError::Status(status),
        };
        error!(?err, "Backend returned an error response");
        err
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } | ApiError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// Client-side rejection of a form before any request is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0}")]
    Missing(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Failure of a workflow that validates input and then calls the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WorkflowError {
    /// True when the workflow stopped before issuing any request.
    pub fn is_form(&self) -> bool {
        matches!(self, WorkflowError::Form(_))
    }
}

/// Type alias for Result with ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
