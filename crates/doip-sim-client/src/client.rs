//! DoipSimulation HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{DoipSimClientError, Result};
use crate::paths;
use crate::response::{ServerResponse, SimulationResult};
use crate::types::{Action, ActionRequest, Gateway, Platform, ServerInfo};

/// Client for the DoipSimulation management API
///
/// Every operation comes in two shapes: a *simple* call returning the raw
/// response body and failing on any non-success status, and an *extended*
/// call returning a [`ServerResponse`] envelope that converts error
/// statuses into data. Transport failures (connection refused, I/O error,
/// malformed URL) propagate from both shapes.
///
/// The client holds no mutable state beyond the base URL and the reqwest
/// handle, both fixed at construction, so it can be cloned and shared
/// across tasks freely.
#[derive(Debug, Clone)]
pub struct DoipSimClient {
    client: Client,
    base_url: Url,
}

impl DoipSimClient {
    /// Create a new client for the given base URL.
    ///
    /// No timeouts are configured; a call can block for as long as the
    /// server takes to answer. Use [`with_config`](Self::with_config) to
    /// bound requests.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Create a new client with request and connect timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // =========================================================================
    // Overview
    // =========================================================================

    /// Get the server overview, optionally filtered by status token
    /// (e.g. `"RUNNING"`). Returns the raw response body.
    #[instrument(skip(self))]
    pub async fn get_overview(&self, status: Option<&str>) -> Result<String> {
        self.dispatch_simple(Method::GET, &paths::overview_path(status), None)
            .await
    }

    /// Get the server overview as a response envelope, decoded into
    /// [`ServerInfo`] on success.
    #[instrument(skip(self))]
    pub async fn get_overview_extended(&self, status: Option<&str>) -> Result<ServerResponse> {
        self.dispatch_extended(Method::GET, &paths::overview_path(status), None, |body| {
            serde_json::from_str::<ServerInfo>(body).map(SimulationResult::Overview)
        })
        .await
    }

    // =========================================================================
    // Platform / Gateway
    // =========================================================================

    /// Get a platform by name. Returns the raw response body.
    #[instrument(skip(self))]
    pub async fn get_platform(&self, platform_name: &str) -> Result<String> {
        self.dispatch_simple(Method::GET, &paths::platform_path(platform_name), None)
            .await
    }

    /// Get a platform by name as a response envelope, decoded into
    /// [`Platform`] on success.
    #[instrument(skip(self))]
    pub async fn get_platform_extended(&self, platform_name: &str) -> Result<ServerResponse> {
        self.dispatch_extended(
            Method::GET,
            &paths::platform_path(platform_name),
            None,
            |body| serde_json::from_str::<Platform>(body).map(SimulationResult::Platform),
        )
        .await
    }

    /// Get a gateway by name for a specific platform. Returns the raw
    /// response body.
    #[instrument(skip(self))]
    pub async fn get_gateway(&self, platform_name: &str, gateway_name: &str) -> Result<String> {
        self.dispatch_simple(
            Method::GET,
            &paths::gateway_path(platform_name, gateway_name),
            None,
        )
        .await
    }

    /// Get a gateway by name as a response envelope, decoded into
    /// [`Gateway`] on success.
    #[instrument(skip(self))]
    pub async fn get_gateway_extended(
        &self,
        platform_name: &str,
        gateway_name: &str,
    ) -> Result<ServerResponse> {
        self.dispatch_extended(
            Method::GET,
            &paths::gateway_path(platform_name, gateway_name),
            None,
            |body| serde_json::from_str::<Gateway>(body).map(SimulationResult::Gateway),
        )
        .await
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Perform an action on a platform via the `?action=` query.
    /// Returns the raw response body.
    #[instrument(skip(self))]
    pub async fn execute_action_get(&self, platform_name: &str, action: Action) -> Result<String> {
        self.dispatch_simple(
            Method::GET,
            &paths::action_get_path(platform_name, action),
            None,
        )
        .await
    }

    /// Perform an action on a platform via the `?action=` query, returning
    /// a response envelope decoded into the updated [`Platform`].
    #[instrument(skip(self))]
    pub async fn execute_action_get_extended(
        &self,
        platform_name: &str,
        action: Action,
    ) -> Result<ServerResponse> {
        self.dispatch_extended(
            Method::GET,
            &paths::action_get_path(platform_name, action),
            None,
            |body| serde_json::from_str::<Platform>(body).map(SimulationResult::Platform),
        )
        .await
    }

    /// Perform an action on a platform via a POST with a JSON body.
    /// Returns the raw response body.
    #[instrument(skip(self))]
    pub async fn execute_action_post(&self, platform_name: &str, action: Action) -> Result<String> {
        self.dispatch_simple(
            Method::POST,
            &paths::platform_path(platform_name),
            Some(&ActionRequest { action }),
        )
        .await
    }

    /// Perform an action on a platform via a POST with a JSON body,
    /// returning a response envelope decoded into the updated [`Platform`].
    #[instrument(skip(self))]
    pub async fn execute_action_post_extended(
        &self,
        platform_name: &str,
        action: Action,
    ) -> Result<ServerResponse> {
        self.dispatch_extended(
            Method::POST,
            &paths::platform_path(platform_name),
            Some(&ActionRequest { action }),
            |body| serde_json::from_str::<Platform>(body).map(SimulationResult::Platform),
        )
        .await
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Issue one request and capture the status code and body text.
    /// All public operations funnel through here.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&ActionRequest>,
    ) -> Result<(StatusCode, String)> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        Ok((status, text))
    }

    /// Simple call shape: return the body, fail on any non-success status
    async fn dispatch_simple(
        &self,
        method: Method,
        path: &str,
        body: Option<&ActionRequest>,
    ) -> Result<String> {
        let (status, text) = self.send(method, path, body).await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(DoipSimClientError::server_error(status.as_u16(), text))
        }
    }

    /// Extended call shape: always return an envelope. The body is decoded
    /// only on status 200; any other status yields an envelope with an
    /// absent result and the error body preserved. Malformed JSON on a 200
    /// is a hard error, since the server only returns well-formed bodies
    /// on success.
    async fn dispatch_extended<F>(
        &self,
        method: Method,
        path: &str,
        body: Option<&ActionRequest>,
        decode: F,
    ) -> Result<ServerResponse>
    where
        F: FnOnce(&str) -> serde_json::Result<SimulationResult>,
    {
        let (status, text) = self.send(method, path, body).await?;

        let result = if status == StatusCode::OK {
            Some(decode(&text)?)
        } else {
            None
        };

        Ok(ServerResponse::new(status.as_u16(), result, Some(text)))
    }
}
