use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use crate::storage::{Storage, StorageExt};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the logged-in user record.
pub const USER_KEY: &str = "user";
/// Storage key holding the absolute expiry in epoch milliseconds.
pub const EXPIRY_KEY: &str = "tokenExpiry";

/// Window before expiry in which the token counts as expiring soon (5 minutes)
const TOKEN_REFRESH_BUFFER_MILLIS: i64 = 5 * 60 * 1000;

/// Session over an injected storage adapter and clock.
/// Clone is cheap and clones observe the same stored state.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Persist a freshly issued token. Token, user and expiry are written
    /// together; if any write fails, all three keys are cleared.
    pub fn start<U: Serialize>(&self, token: &str, user: &U, expires_at: DateTime<Utc>) -> Result<()> {
        let written = self
            .storage
            .set(TOKEN_KEY, &token)
            .and_then(|()| self.storage.set(USER_KEY, user))
            .and_then(|()| self.storage.set(EXPIRY_KEY, &expires_at.timestamp_millis()));
        if let Err(e) = written {
            warn!(error = %e, "Failed to store session; clearing partial state");
            self.logout();
            return Err(e);
        }
        debug!(expires_at = %expires_at, "Session started");
        Ok(())
    }

    /// Raw stored token, regardless of expiry.
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Token if the session is currently authenticated.
    pub fn bearer_token(&self) -> Option<String> {
        if self.is_authenticated() {
            self.token()
        } else {
            None
        }
    }

    pub fn user<U: DeserializeOwned>(&self) -> Option<U> {
        self.read(USER_KEY)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read::<i64>(EXPIRY_KEY)
            .and_then(DateTime::from_timestamp_millis)
    }

    pub fn is_authenticated(&self) -> bool {
        if self.token().is_none() {
            return false;
        }
        match self.expires_at() {
            Some(expiry) => self.clock.now() < expiry,
            None => false,
        }
    }

    /// True only while an expiry exists and is at most 5 minutes away.
    pub fn is_token_expiring_soon(&self) -> bool {
        match self.expires_at() {
            Some(expiry) => {
                let remaining = (expiry - self.clock.now()).num_milliseconds();
                remaining > 0 && remaining <= TOKEN_REFRESH_BUFFER_MILLIS
            }
            None => false,
        }
    }

    pub fn time_until_expiry(&self) -> Option<Duration> {
        self.expires_at().map(|expiry| expiry - self.clock.now())
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry()
            .map(|d| d.num_minutes().max(0))
            .unwrap_or(0)
    }

    /// Remove token, user and expiry. Safe to call repeatedly.
    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY, EXPIRY_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = key, error = %e, "Failed to remove session key");
            }
        }
        debug!("Session cleared");
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read session key");
                None
            }
        }
    }
}
