//! Uniform outcome of every network call, and the normalizer that builds it.

use serde::{de::DeserializeOwned, ser::SerializeStruct, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// Fallback message for failed responses without a `message` field
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Fallback message for transport failures that carry no description
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Status reported when no response was obtained
pub const UNKNOWN_STATUS: u16 = 500;

/// Outcome of a request: either parsed data or a human-readable error, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEnvelope<T> {
    Success { data: T, status: u16 },
    Failure { error: String, status: u16 },
}

impl<T> ApiEnvelope<T> {
    pub fn failure(error: impl Into<String>, status: u16) -> Self {
        ApiEnvelope::Failure {
            error: error.into(),
            status,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiEnvelope::Success { status, .. } | ApiEnvelope::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiEnvelope::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiEnvelope::Success { data, .. } => Some(data),
            ApiEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiEnvelope::Success { .. } => None,
            ApiEnvelope::Failure { error, .. } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        match self {
            ApiEnvelope::Success { data, status } => ApiEnvelope::Success { data: f(data), status },
            ApiEnvelope::Failure { error, status } => ApiEnvelope::Failure { error, status },
        }
    }

    /// Convert into a `Result`, classifying failures by status.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiEnvelope::Success { data, .. } => Ok(data),
            ApiEnvelope::Failure { error, status } => Err(ApiError::from_failure(status, &error)),
        }
    }
}

/// Serializes to the `{data, error, status, success}` wire shape.
impl<T: Serialize> Serialize for ApiEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiEnvelope", 4)?;
        state.serialize_field("data", &self.data())?;
        state.serialize_field("error", &self.error())?;
        state.serialize_field("status", &self.status())?;
        state.serialize_field("success", &self.is_success())?;
        state.end()
    }
}

/// TypeScript-facing mirror of the serialized envelope.
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[derive(Debug, Clone, Serialize)]
pub struct WireEnvelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub status: u16,
    pub success: bool,
}

impl<T> From<ApiEnvelope<T>> for WireEnvelope<T> {
    fn from(envelope: ApiEnvelope<T>) -> Self {
        match envelope {
            ApiEnvelope::Success { data, status } => WireEnvelope {
                data: Some(data),
                error: None,
                status,
                success: true,
            },
            ApiEnvelope::Failure { error, status } => WireEnvelope {
                data: None,
                error: Some(error),
                status,
                success: false,
            },
        }
    }
}

/// Build an envelope from a completed response's status and raw body.
///
/// The body is parsed as JSON first. A parse failure wins over the status,
/// so a non-JSON error page still yields the parser's message. For failed
/// statuses the body's `message` field becomes the error. For successful
/// statuses the JSON is decoded into `T`; a shape mismatch is reported as a
/// failure with the response's own status.
pub fn normalize_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> ApiEnvelope<T> {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(status = status, error = %e, "Response body is not valid JSON");
            return ApiEnvelope::failure(e.to_string(), status);
        }
    };

    if !(200..300).contains(&status) {
        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE);
        return ApiEnvelope::failure(message, status);
    }

    match serde_json::from_value(parsed) {
        Ok(data) => ApiEnvelope::Success { data, status },
        Err(e) => {
            debug!(status = status, error = %e, "Response body has unexpected shape");
            ApiEnvelope::failure(e.to_string(), status)
        }
    }
}

/// Read a response body and normalize it. Never fails.
pub async fn normalize_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiEnvelope<T> {
    let status = response.status().as_u16();
    match response.bytes().await {
        Ok(body) => normalize_body(status, &body),
        Err(e) => ApiEnvelope::failure(e.to_string(), status),
    }
}
