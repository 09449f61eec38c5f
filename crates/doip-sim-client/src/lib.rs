//! DoipSimulation Client Library
//!
//! Provides a typed HTTP client for the DoipSimulation management server:
//! query the server overview, inspect platforms and gateways, and start or
//! stop a platform.
//!
//! Every operation comes in two shapes:
//!
//! * a **simple** call returning the raw response body, failing on any
//!   non-success status, and
//! * an **extended** call returning a [`ServerResponse`] envelope carrying
//!   the status code, the raw body, and (on 200) the decoded result, so
//!   error statuses become data instead of errors. Callers narrow the
//!   result with [`ServerResponse::result_as`] and must check for absence.
//!
//! # Example
//!
//! ```rust,no_run
//! use doip_sim_client::{Action, DoipSimClient, Platform};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DoipSimClient::new("http://localhost:8080")?;
//!
//!     // Overview of all running platforms
//!     let overview = client.get_overview_extended(Some("RUNNING")).await?;
//!     println!("server answered with {}", overview.status());
//!
//!     // Start a platform and read back its state
//!     let response = client
//!         .execute_action_post_extended("X2024", Action::Start)
//!         .await?;
//!     if let Some(platform) = response.result_as::<Platform>() {
//!         println!("{} is {}", platform.name, platform.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides an in-process stand-in for the server:
//!
//! ```rust,ignore
//! use doip_sim_client::testing::{simulation_router, SimulationFixture, TestServer};
//!
//! let fixture = SimulationFixture::single("X2024", "GW");
//! let server = TestServer::start(simulation_router(fixture)).await?;
//! let overview = server.client.get_overview_extended(None).await?;
//! ```

mod client;
mod error;
pub mod paths;
mod response;
pub mod testing;
mod types;

pub use client::DoipSimClient;
pub use error::{DoipSimClientError, Result};
pub use response::{FromSimulationResult, ServerResponse, SimulationResult};
pub use types::*;
