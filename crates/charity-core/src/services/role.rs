use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{report, unwrap_nested};
use crate::api::{ApiClient, ApiEnvelope, ApiError};
use crate::models::{Role, RoleInput};
use crate::notify::{messages, Notifier};

const ROLES_PATH: &str = "/roles";

/// Admin role management.
#[derive(Clone)]
pub struct RoleService {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl RoleService {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    fn role_path(id: i64) -> String {
        format!("{}/{}", ROLES_PATH, id)
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        let envelope = self.api.get(ROLES_PATH).await;
        let roles: Vec<Role> = unwrap_nested(envelope, self.notifier.as_ref(), messages::ROLES_FETCH_FAILED)?;
        debug!(count = roles.len(), "Fetched roles");
        Ok(roles)
    }

    pub async fn get_role(&self, id: i64) -> Result<Role, ApiError> {
        let envelope = self.api.get(&Self::role_path(id)).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::ROLE_FETCH_FAILED)
    }

    pub async fn create_role(&self, input: &RoleInput) -> Result<Role, ApiError> {
        let body = Self::encode(input, self.notifier.as_ref(), messages::ROLE_CREATE_FAILED)?;
        let envelope = self.api.post(ROLES_PATH, body).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::ROLE_CREATE_FAILED)
    }

    pub async fn update_role(&self, id: i64, input: &RoleInput) -> Result<Role, ApiError> {
        let body = Self::encode(input, self.notifier.as_ref(), messages::ROLE_UPDATE_FAILED)?;
        let envelope = self.api.put(&Self::role_path(id), body).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::ROLE_UPDATE_FAILED)
    }

    /// Delete succeeds on any 2xx JSON response; the body is not inspected.
    pub async fn delete_role(&self, id: i64) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<Value> = self.api.delete(&Self::role_path(id)).await;
        report(
            envelope.into_result().map(|_| ()),
            self.notifier.as_ref(),
            messages::ROLE_DELETE_FAILED,
        )
    }

    fn encode(input: &RoleInput, notifier: &dyn Notifier, failure_message: &'static str) -> Result<Value, ApiError> {
        report(
            serde_json::to_value(input).map_err(|e| ApiError::invalid_response(e.to_string())),
            notifier,
            failure_message,
        )
    }
}
