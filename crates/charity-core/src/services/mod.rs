//! Per-resource wrappers over the fetch layer.
//!
//! Services unwrap the backend's double-wrapped payloads
//! (`{ "data": { "data": ... } }`) into typed entities. On any failure they
//! raise an error toast with a static message and return the error to the
//! caller.

pub mod campaign;
pub mod role;
pub mod user;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::api::{ApiEnvelope, ApiError};
use crate::notify::{Notification, Notifier};

pub use campaign::{CampaignQuery, CampaignService};
pub use role::RoleService;
pub use user::UserService;

fn take_field(value: Value, field: &str) -> Result<Value, ApiError> {
    match value {
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| ApiError::invalid_response(format!("Response is missing '{}'", field))),
        _ => Err(ApiError::invalid_response(format!(
            "Expected an object holding '{}'",
            field
        ))),
    }
}

/// Extract `T` from `{ "data": { "data": T } }`.
pub(crate) fn extract_nested<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let inner = take_field(take_field(body, "data")?, "data")?;
    serde_json::from_value(inner).map_err(|e| ApiError::invalid_response(e.to_string()))
}

/// Report a failed operation to the user and hand the error back.
pub(crate) fn report<T>(
    result: Result<T, ApiError>,
    notifier: &dyn Notifier,
    failure_message: &'static str,
) -> Result<T, ApiError> {
    if let Err(ref e) = result {
        warn!(error = %e, status = ?e.status(), "{}", failure_message);
        notifier.notify(Notification::error(failure_message));
    }
    result
}

/// Unwrap a nested payload, notifying on failure.
pub(crate) fn unwrap_nested<T: DeserializeOwned>(
    envelope: ApiEnvelope<Value>,
    notifier: &dyn Notifier,
    failure_message: &'static str,
) -> Result<T, ApiError> {
    report(
        envelope.into_result().and_then(extract_nested),
        notifier,
        failure_message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastQueue;
    use serde_json::json;

    #[test]
    fn test_extract_nested() {
        let ids: Vec<i64> = extract_nested(json!({"data": {"data": [1, 2, 3]}})).unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_extract_nested_single_level_is_invalid() {
        let err = extract_nested::<Vec<i64>>(json!({"data": [1, 2]})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_extract_nested_non_object() {
        let err = extract_nested::<Vec<i64>>(json!([1])).unwrap_err();
        assert!(err.message().unwrap().contains("object"));
    }

    #[test]
    fn test_unwrap_nested_notifies_on_failure_only() {
        let queue = ToastQueue::default();

        let ok: Result<String, ApiError> = unwrap_nested(
            ApiEnvelope::Success { data: json!({"data": {"data": "x"}}), status: 200 },
            &queue,
            "Failed",
        );
        assert_eq!(ok.unwrap(), "x");
        assert!(queue.is_empty());

        let failed: Result<String, ApiError> =
            unwrap_nested(ApiEnvelope::failure("boom", 500), &queue, "Failed");
        assert_eq!(failed.unwrap_err().message(), Some("boom"));
        let toasts = queue.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Failed");
    }
}
