use thiserror::Error;

/// Failure categories shared by every tool operation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },
    #[error("rate limited: {message}")]
    RateLimited { message: String },
    #[error("API request failed, status code: {status}, error: {body}")]
    Upstream { status: u16, body: String },
    #[error("network error: {message}")]
    Transport { message: String },
    #[error("{message}")]
    InvalidParameters { message: String },
    #[error("image download failed: {message}")]
    Download { message: String },
}

pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
    /// True when the key itself was rejected, as opposed to validation
    /// not completing (rate limit, outage, network failure).
    pub fn is_credential_rejection(&self) -> bool {
        matches!(
            self,
            ToolError::InvalidCredentials { .. } | ToolError::PermissionDenied { .. }
        )
    }

    /// The host-facing message for a failed invocation.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::InvalidParameters { message } => format!("Parameter error: {message}"),
            ToolError::Download { message } => format!("Failed to process image: {message}"),
            other => format!("Unsplash API request error: {other}"),
        }
    }

    /// The message reported when credential validation fails.
    pub fn validation_message(&self) -> String {
        match self {
            ToolError::Transport { message } => format!("API request exception: {message}"),
            ToolError::InvalidCredentials { message }
            | ToolError::PermissionDenied { message }
            | ToolError::RateLimited { message } => {
                format!("Credential validation failed: {message}")
            }
            other => format!("Credential validation failed: {other}"),
        }
    }
}
