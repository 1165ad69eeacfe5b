use thiserror::Error;

/// Error surfaced by domain services. Every variant carries an optional
/// human-readable message taken from the failed response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{}", display(.message, "Unauthorized - token may be expired"))]
    Unauthorized { message: Option<String> },

    #[error("{}", display(.message, "Access denied"))]
    AccessDenied { message: Option<String> },

    #[error("{}", display(.message, "Resource not found"))]
    NotFound { message: Option<String> },

    #[error("{}", display(.message, "Rate limited - please wait before retrying"))]
    RateLimited { message: Option<String> },

    #[error("{}", display(.message, "Server error"))]
    ServerError { status: u16, message: Option<String> },

    #[error("{}", display(.message, "Request failed"))]
    Request { status: u16, message: Option<String> },

    #[error("{}", display(.message, "Invalid response"))]
    InvalidResponse { message: Option<String> },
}

/// Maximum length for messages carried in errors
const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

fn display(message: &Option<String>, fallback: &'static str) -> String {
    message.clone().unwrap_or_else(|| fallback.to_string())
}

impl ApiError {
    /// Truncate a message to avoid logging excessive data
    fn truncate_message(message: &str) -> String {
        let total = message.chars().count();
        if total <= MAX_ERROR_MESSAGE_LENGTH {
            message.to_string()
        } else {
            let head: String = message.chars().take(MAX_ERROR_MESSAGE_LENGTH).collect();
            format!("{}... (truncated, {} total chars)", head, total)
        }
    }

    /// Classify a failed envelope by its status.
    pub fn from_failure(status: u16, error: &str) -> Self {
        let message = if error.trim().is_empty() {
            None
        } else {
            Some(Self::truncate_message(error))
        };
        match status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::AccessDenied { message },
            404 => ApiError::NotFound { message },
            429 => ApiError::RateLimited { message },
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::Request { status, message },
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        ApiError::InvalidResponse {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::AccessDenied { message }
            | ApiError::NotFound { message }
            | ApiError::RateLimited { message }
            | ApiError::ServerError { message, .. }
            | ApiError::Request { message, .. }
            | ApiError::InvalidResponse { message } => message.as_deref(),
        }
    }

    /// HTTP status behind the error, where one applies.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::AccessDenied { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::ServerError { status, .. } | ApiError::Request { status, .. } => Some(*status),
            ApiError::InvalidResponse { .. } => None,
        }
    }
}
