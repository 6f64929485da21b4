use serde::Serialize;

use crate::domain::ValidationErrors;

/// Uniform classification of every failure the client can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    AuthRequired,
    Forbidden,
    NotFound,
    ServerError,
    Rejected,
    NetworkError,
    InvalidResponse,
    ValidationError,
}

impl StatusTag {
    pub const fn label(self) -> &'static str {
        match self {
            StatusTag::AuthRequired => "auth_required",
            StatusTag::Forbidden => "forbidden",
            StatusTag::NotFound => "not_found",
            StatusTag::ServerError => "server_error",
            StatusTag::Rejected => "rejected",
            StatusTag::NetworkError => "network_error",
            StatusTag::InvalidResponse => "invalid_response",
            StatusTag::ValidationError => "validation_error",
        }
    }
}

/// Normalized error returned by the transport and every accessor built on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required: {message}")]
    AuthRequired { message: String },
    #[error("access forbidden: {message}")]
    Forbidden { message: String },
    #[error("resource not found: {message}")]
    NotFound { message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("unexpected response payload: {message}")]
    Decode { message: String },
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    pub fn tag(&self) -> StatusTag {
        match self {
            ApiError::AuthRequired { .. } => StatusTag::AuthRequired,
            ApiError::Forbidden { .. } => StatusTag::Forbidden,
            ApiError::NotFound { .. } => StatusTag::NotFound,
            ApiError::Server { .. } => StatusTag::ServerError,
            ApiError::Rejected { .. } => StatusTag::Rejected,
            ApiError::Network { .. } => StatusTag::NetworkError,
            ApiError::Decode { .. } => StatusTag::InvalidResponse,
            ApiError::Validation(_) => StatusTag::ValidationError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::AuthRequired { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Rejected { message, .. }
            | ApiError::Network { message }
            | ApiError::Decode { message } => message.clone(),
            ApiError::Validation(errors) => errors.to_string(),
        }
    }

    /// 401 and 403 both mean the caller needs different credentials.
    pub fn is_auth_boundary(&self) -> bool {
        matches!(
            self,
            ApiError::AuthRequired { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Build the error for a non-success status, preferring the server-provided message.
    pub(crate) fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| default_message(status));
        match status {
            401 => ApiError::AuthRequired { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Rejected { status, message },
        }
    }
}

fn default_message(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Serializable `{ statusTag, message }` view handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorView {
    pub status_tag: StatusTag,
    pub message: String,
}

impl From<&ApiError> for ErrorView {
    fn from(error: &ApiError) -> Self {
        Self {
            status_tag: error.tag(),
            message: error.message(),
        }
    }
}
