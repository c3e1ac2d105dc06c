//! Integration test harness for the Lumera storefront.
//!
//! Tests drive the full storefront router in-process: no server, no network.
//! A [`TestContext`] plays one shopper and carries that shopper's session
//! cookie from response to request, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lumera-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use lumera_storefront::config::{ConfigError, StorefrontConfig};
use lumera_storefront::state::AppState;

/// Base URL used by test configurations.
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Build a configuration from `vars`, with `LUMERA_BASE_URL` preset.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is invalid.
pub fn test_config(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
    let mut map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    map.entry("LUMERA_BASE_URL".to_string())
        .or_insert_with(|| TEST_BASE_URL.to_string());
    StorefrontConfig::from_lookup(|key| map.get(key).cloned())
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body, or a JSON string holding the raw text for non-JSON bodies.
    pub body: Value,
}

/// One shopper talking to a storefront.
pub struct TestContext {
    router: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestContext {
    /// A storefront with the built-in catalog and default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be built.
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// A storefront configured from `vars`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid or the catalog cannot be loaded.
    pub async fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = test_config(vars).expect("valid test configuration");
        let state = AppState::in_memory(config)
            .await
            .expect("storefront state");
        Self {
            router: lumera_storefront::app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// Another shopper on the same storefront, with no session yet.
    #[must_use]
    pub fn new_shopper(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
            cookie: None,
        }
    }

    /// Shared application state, for inspecting stores directly.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request, remembering any session cookie the response sets.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn request(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(pair.trim().to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
