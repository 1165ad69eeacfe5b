//! Explicit wiring of session, client and notifier for the rest of the app.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::Session;
use crate::config::Config;
use crate::notify::{messages, Notification, Notifier};
use crate::services::{CampaignService, RoleService, UserService};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No token stored
    Anonymous,
    Active,
    /// Authenticated, within 5 minutes of expiry
    ExpiringSoon,
    /// A token was stored but has expired; it has been cleared
    Expired,
}

#[derive(Clone)]
pub struct AppContext {
    session: Session,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(config: &Config, storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let session = Session::new(storage);
        let api = ApiClient::from_config(config)?;
        Ok(Self::from_parts(api, session, notifier))
    }

    /// Attaches `session` to `api` so requests carry its token.
    pub fn from_parts(api: ApiClient, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api: api.with_session(session.clone()),
            session,
            notifier,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    pub fn roles(&self) -> RoleService {
        RoleService::new(self.api.clone(), self.notifier.clone())
    }

    pub fn campaigns(&self) -> CampaignService {
        CampaignService::new(self.api.clone(), self.notifier.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.api.clone(), self.notifier.clone())
    }

    /// Classify the stored session, warning the user when it is about to
    /// lapse and clearing it once it has.
    pub fn check_session(&self) -> SessionStatus {
        if self.session.token().is_none() {
            return SessionStatus::Anonymous;
        }
        if !self.session.is_authenticated() {
            self.session.logout();
            self.notifier.notify(Notification::warning(messages::SESSION_EXPIRED));
            return SessionStatus::Expired;
        }
        if self.session.is_token_expiring_soon() {
            self.notifier.notify(Notification::warning(messages::SESSION_EXPIRING_SOON));
            return SessionStatus::ExpiringSoon;
        }
        SessionStatus::Active
    }

    pub fn logout(&self) {
        self.session.logout();
        self.notifier.notify(Notification::info(messages::LOGGED_OUT));
        info!("Logged out");
    }
}
