//! Wire types exchanged with the DoipSimulation server

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state reported for the server, a platform, or a gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimulationStatus {
    Running,
    Stopped,
    Error,
}

impl SimulationStatus {
    /// Textual form as used in the `?status=` query and in JSON bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Running => "RUNNING",
            SimulationStatus::Stopped => "STOPPED",
            SimulationStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUNNING" => Ok(SimulationStatus::Running),
            "STOPPED" => Ok(SimulationStatus::Stopped),
            "ERROR" => Ok(SimulationStatus::Error),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Control action accepted by the platform endpoint
///
/// The lowercase textual form is what the `?action=` query parameter and
/// the POST request body carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            other => Err(format!("unknown action: {}", other)),
        }
    }
}

/// JSON body of the POST action request: `{"action": "start"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: Action,
}

/// Server overview returned by `GET /doip-simulation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub status: SimulationStatus,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

/// Platform record returned by the platform and action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub status: SimulationStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub gateways: Vec<Gateway>,
}

/// Gateway record returned by the gateway endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gateway {
    pub name: String,
    pub status: SimulationStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ecus: Vec<Ecu>,
}

/// ECU entry embedded in a gateway record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecu {
    pub name: String,
}
