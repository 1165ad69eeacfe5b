//! Client core for the charity platform.
//!
//! This crate provides the pieces a frontend needs to talk to the charity
//! platform backend:
//!
//! - `api`: the fetch wrapper and the `ApiEnvelope` every call resolves to
//! - `auth`: bearer-token session lifecycle over an injected storage adapter
//! - `services`: role, campaign and user services with toast reporting
//! - `utils`: input validation and currency/date formatting
//! - `notify`: toast configuration and notifier adapters
//! - `context`: `AppContext`, which wires the above together

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiEnvelope, ApiError, RequestOptions};
pub use auth::Session;
pub use config::{Config, StorageBackend};
pub use context::{AppContext, SessionStatus};
pub use state::Loadable;
