//! REST API access for the charity platform backend.
//!
//! This module provides the `ApiClient` fetch wrapper, the `ApiEnvelope`
//! every request resolves to, and the `ApiError` domain services return.
//!
//! The backend speaks JSON. Failed responses may carry a `message` field;
//! list and detail endpoints wrap payloads as `{ "data": { "data": ... } }`.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use envelope::{normalize_body, normalize_response, ApiEnvelope, WireEnvelope};
pub use error::ApiError;
