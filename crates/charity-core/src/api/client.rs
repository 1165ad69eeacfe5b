//! Fetch wrapper for the charity platform REST API.
//!
//! Every request resolves to an `ApiEnvelope`; transport and parse
//! failures are folded into the envelope rather than returned as errors.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::envelope::{normalize_response, ApiEnvelope, NETWORK_ERROR_MESSAGE, UNKNOWN_STATUS};
use crate::auth::Session;
use crate::config::{Config, DEFAULT_TIMEOUT_SECS};

/// Method, headers, body and query for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

fn is_loopback(base_url: &str) -> bool {
    let Some(host) = reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
    else {
        return false;
    };
    // IPv6 hosts keep their brackets in `host_str`
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    bare.eq_ignore_ascii_case("localhost") || bare.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}

/// API client for the charity platform.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// Create a new API client with the default timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut builder = Client::builder().timeout(timeout);
        // A local backend is never reached through the environment's proxy
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Attach a session whose token is sent while it is authenticated.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Default JSON content type and bearer token, then caller headers on top.
    fn request_headers(&self, caller: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !caller.contains_key(header::AUTHORIZATION) {
            if let Some(token) = self.session.as_ref().and_then(Session::bearer_token) {
                match HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(value) => {
                        headers.insert(header::AUTHORIZATION, value);
                    }
                    Err(_) => warn!("Stored token is not a valid header value; sending without it"),
                }
            }
        }

        headers.extend(caller.clone());
        headers
    }

    /// Issue a request and normalize the outcome. Never fails.
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> ApiEnvelope<T> {
        let url = self.url(path);
        let headers = self.request_headers(&options.headers);

        let mut builder = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(ref body) = options.body {
            builder = builder.json(body);
        }

        debug!(method = %options.method, url = %url, "Sending request");

        match builder.send().await {
            Ok(response) => {
                let envelope = normalize_response(response).await;
                debug!(url = %url, status = envelope.status(), success = envelope.is_success(), "Request completed");
                envelope
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Request failed before a response was received");
                let message = e.to_string();
                let message = if message.is_empty() {
                    NETWORK_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                ApiEnvelope::failure(message, UNKNOWN_STATUS)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<T> {
        self.request(path, RequestOptions::get()).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> ApiEnvelope<T> {
        self.request(path, RequestOptions::post(body)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Value) -> ApiEnvelope<T> {
        self.request(path, RequestOptions::put(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<T> {
        self.request(path, RequestOptions::delete()).await
    }
}
