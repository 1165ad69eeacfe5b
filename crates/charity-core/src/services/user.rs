use std::sync::Arc;

use serde_json::json;

use super::unwrap_nested;
use crate::api::{ApiClient, ApiError};
use crate::models::User;
use crate::notify::{messages, Notifier};

const USERS_PATH: &str = "/users";

/// Admin user management.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl UserService {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let envelope = self.api.get(USERS_PATH).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::USERS_FETCH_FAILED)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        let envelope = self.api.get(&format!("{}/{}", USERS_PATH, id)).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::USER_FETCH_FAILED)
    }

    /// Returns the updated user.
    pub async fn assign_role(&self, user_id: i64, role_id: i64) -> Result<User, ApiError> {
        let path = format!("{}/{}/role", USERS_PATH, user_id);
        let envelope = self.api.put(&path, json!({ "roleId": role_id })).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::USER_ROLE_UPDATE_FAILED)
    }
}
