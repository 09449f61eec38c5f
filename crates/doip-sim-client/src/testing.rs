//! Test utilities for doip-sim-client
//!
//! Provides an in-process stand-in for the DoipSimulation server and a
//! harness that serves it on an ephemeral port with a ready client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::types::{Action, ActionRequest, Ecu, Gateway, Platform, ServerInfo, SimulationStatus};
use crate::{DoipSimClient, Result};

/// In-memory simulation state served by [`simulation_router`]
#[derive(Clone, Default)]
pub struct SimulationFixture {
    platforms: Arc<Mutex<Vec<Platform>>>,
}

impl SimulationFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixture with one running platform holding one gateway
    pub fn single(platform_name: &str, gateway_name: &str) -> Self {
        let fixture = Self::new();
        fixture.add_platform(Platform {
            name: platform_name.to_string(),
            status: SimulationStatus::Running,
            url: None,
            gateways: vec![Gateway {
                name: gateway_name.to_string(),
                status: SimulationStatus::Running,
                url: None,
                ecus: vec![Ecu {
                    name: "EcuSim".to_string(),
                }],
            }],
        });
        fixture
    }

    pub fn add_platform(&self, platform: Platform) {
        self.platforms.lock().push(platform);
    }

    fn overview(&self, filter: Option<SimulationStatus>) -> ServerInfo {
        let platforms = self.platforms.lock();

        let status = if platforms
            .iter()
            .any(|p| p.status == SimulationStatus::Running)
        {
            SimulationStatus::Running
        } else {
            SimulationStatus::Stopped
        };

        let selected = platforms
            .iter()
            .filter(|p| filter.map_or(true, |f| p.status == f))
            .cloned()
            .collect();

        ServerInfo {
            status,
            platforms: selected,
        }
    }

    /// Look up a platform, applying the action first when one is given.
    /// Start/stop toggles the platform and all of its gateways.
    fn apply(&self, platform_name: &str, action: Option<Action>) -> Option<Platform> {
        let mut platforms = self.platforms.lock();
        let platform = platforms.iter_mut().find(|p| p.name == platform_name)?;

        if let Some(action) = action {
            let status = match action {
                Action::Start => SimulationStatus::Running,
                Action::Stop => SimulationStatus::Stopped,
            };
            platform.status = status;
            for gateway in &mut platform.gateways {
                gateway.status = status;
            }
        }

        Some(platform.clone())
    }

    fn gateway(&self, platform_name: &str, gateway_name: &str) -> Option<Gateway> {
        let platforms = self.platforms.lock();
        platforms
            .iter()
            .find(|p| p.name == platform_name)?
            .gateways
            .iter()
            .find(|g| g.name == gateway_name)
            .cloned()
    }
}

#[derive(Debug, Deserialize)]
struct OverviewQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlatformQuery {
    action: Option<String>,
}

async fn get_overview(
    State(fixture): State<SimulationFixture>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    let filter = match query.status.as_deref() {
        None | Some("") => None,
        Some(s) => match s.parse::<SimulationStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("unknown status filter: {}", s),
                )
                    .into_response();
            }
        },
    };

    Json(fixture.overview(filter)).into_response()
}

async fn get_platform(
    State(fixture): State<SimulationFixture>,
    Path(platform_name): Path<String>,
    Query(query): Query<PlatformQuery>,
) -> Response {
    let action = match query.action.as_deref() {
        None => None,
        Some(a) => match a.parse::<Action>() {
            Ok(action) => Some(action),
            Err(_) => {
                return (StatusCode::BAD_REQUEST, format!("unknown action: {}", a))
                    .into_response();
            }
        },
    };

    match fixture.apply(&platform_name, action) {
        Some(platform) => Json(platform).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("platform not found: {}", platform_name),
        )
            .into_response(),
    }
}

async fn post_platform(
    State(fixture): State<SimulationFixture>,
    Path(platform_name): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Response {
    match fixture.apply(&platform_name, Some(request.action)) {
        Some(platform) => Json(platform).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("platform not found: {}", platform_name),
        )
            .into_response(),
    }
}

async fn get_gateway(
    State(fixture): State<SimulationFixture>,
    Path((platform_name, gateway_name)): Path<(String, String)>,
) -> Response {
    match fixture.gateway(&platform_name, &gateway_name) {
        Some(gateway) => Json(gateway).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("gateway not found: {}/{}", platform_name, gateway_name),
        )
            .into_response(),
    }
}

/// Build a router mimicking the DoipSimulation server's routes
pub fn simulation_router(fixture: SimulationFixture) -> Router {
    Router::new()
        .route("/doip-simulation", get(get_overview))
        .route(
            "/doip-simulation/platform/{platform_name}",
            get(get_platform).post(post_platform),
        )
        .route(
            "/doip-simulation/platform/{platform_name}/gateway/{gateway_name}",
            get(get_gateway),
        )
        .with_state(fixture)
}

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: DoipSimClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve the given router on an ephemeral port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use doip_sim_client::testing::{simulation_router, SimulationFixture, TestServer};
    ///
    /// let fixture = SimulationFixture::single("X2024", "GW");
    /// let server = TestServer::start(simulation_router(fixture)).await?;
    ///
    /// let response = server.client.get_platform_extended("X2024").await?;
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Serve the given router with custom client timeouts
    pub async fn start_with_timeout(
        router: Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}", addr);
        let client = DoipSimClient::with_config(&base_url, timeout, connect_timeout)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &DoipSimClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_format() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[test]
    fn fixture_overview_filters_by_status() {
        let fixture = SimulationFixture::single("X2024", "GW");
        fixture.add_platform(Platform {
            name: "X2025".to_string(),
            status: SimulationStatus::Stopped,
            url: None,
            gateways: vec![],
        });

        let all = fixture.overview(None);
        assert_eq!(all.platforms.len(), 2);
        assert_eq!(all.status, SimulationStatus::Running);

        let running = fixture.overview(Some(SimulationStatus::Running));
        assert_eq!(running.platforms.len(), 1);
        assert_eq!(running.platforms[0].name, "X2024");
    }

    #[test]
    fn fixture_apply_toggles_platform_and_gateways() {
        let fixture = SimulationFixture::single("X2024", "GW");

        let stopped = fixture.apply("X2024", Some(Action::Stop)).unwrap();
        assert_eq!(stopped.status, SimulationStatus::Stopped);
        assert_eq!(stopped.gateways[0].status, SimulationStatus::Stopped);

        let started = fixture.apply("X2024", Some(Action::Start)).unwrap();
        assert_eq!(started.status, SimulationStatus::Running);
        assert_eq!(started.gateways[0].status, SimulationStatus::Running);

        assert!(fixture.apply("Unknown", Some(Action::Start)).is_none());
    }
}
