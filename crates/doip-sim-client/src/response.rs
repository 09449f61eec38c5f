//! Response envelope returned by the extended client calls

use tracing::warn;

use crate::types::{Gateway, Platform, ServerInfo};

/// Canonical success status; results are only decoded on this code
const STATUS_OK: u16 = 200;

/// Decoded payload of a successful simulation response.
///
/// The server returns one of a fixed set of shapes, so the payload is a
/// closed sum type rather than a dynamically typed value.
#[derive(Debug, Clone)]
pub enum SimulationResult {
    Overview(ServerInfo),
    Platform(Platform),
    Gateway(Gateway),
}

/// Shapes that can be extracted from a [`SimulationResult`].
///
/// Implemented for [`ServerInfo`], [`Platform`] and [`Gateway`]; used by
/// [`ServerResponse::result_as`] to narrow the payload without panicking
/// on a mismatch.
pub trait FromSimulationResult: Sized {
    /// Shape name used in diagnostics
    const TYPE_NAME: &'static str;

    fn from_result(result: &SimulationResult) -> Option<&Self>;
}

impl FromSimulationResult for ServerInfo {
    const TYPE_NAME: &'static str = "ServerInfo";

    fn from_result(result: &SimulationResult) -> Option<&Self> {
        match result {
            SimulationResult::Overview(info) => Some(info),
            _ => None,
        }
    }
}

impl FromSimulationResult for Platform {
    const TYPE_NAME: &'static str = "Platform";

    fn from_result(result: &SimulationResult) -> Option<&Self> {
        match result {
            SimulationResult::Platform(platform) => Some(platform),
            _ => None,
        }
    }
}

impl FromSimulationResult for Gateway {
    const TYPE_NAME: &'static str = "Gateway";

    fn from_result(result: &SimulationResult) -> Option<&Self> {
        match result {
            SimulationResult::Gateway(gateway) => Some(gateway),
            _ => None,
        }
    }
}

/// HTTP response envelope returned by the extended client methods.
///
/// Carries the transport status code, the raw response body, and the
/// decoded result when the call succeeded. Error statuses arrive as a
/// populated envelope with an absent result instead of an error, so
/// callers can inspect status and body unconditionally.
#[derive(Debug, Clone)]
pub struct ServerResponse {
    status: u16,
    result: Option<SimulationResult>,
    body: Option<String>,
}

impl ServerResponse {
    /// Construct an envelope; fields are stored verbatim
    pub fn new(status: u16, result: Option<SimulationResult>, body: Option<String>) -> Self {
        Self {
            status,
            result,
            body,
        }
    }

    /// Transport status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status code is the canonical success code
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Raw response body exactly as received, also populated on failure
    /// statuses
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Decoded result without narrowing
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// Narrow the decoded result to a concrete shape.
    ///
    /// Returns `None` when the status code is not 200, when no result was
    /// decoded, or when the stored shape does not match the requested one.
    /// A miss logs a warning instead of failing, so callers can probe for
    /// an unexpected shape without error-driven control flow.
    pub fn result_as<T: FromSimulationResult>(&self) -> Option<&T> {
        let narrowed = if self.is_ok() {
            self.result.as_ref().and_then(T::from_result)
        } else {
            None
        };

        if narrowed.is_none() {
            warn!(
                status = self.status,
                expected = T::TYPE_NAME,
                "no decoded result of the requested type"
            );
        }
        narrowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SimulationStatus;

    fn platform() -> Platform {
        Platform {
            name: "X2024".to_string(),
            status: SimulationStatus::Running,
            url: None,
            gateways: vec![],
        }
    }

    #[test]
    fn result_as_narrows_to_matching_shape() {
        let envelope = ServerResponse::new(
            200,
            Some(SimulationResult::Platform(platform())),
            Some("{}".to_string()),
        );

        let narrowed = envelope.result_as::<Platform>().unwrap();
        assert_eq!(narrowed.name, "X2024");
        assert_eq!(narrowed.status, SimulationStatus::Running);
    }

    #[test]
    fn result_as_returns_none_on_shape_mismatch() {
        let envelope = ServerResponse::new(
            200,
            Some(SimulationResult::Platform(platform())),
            Some("{}".to_string()),
        );

        assert!(envelope.result_as::<Gateway>().is_none());
        assert!(envelope.result_as::<ServerInfo>().is_none());
        // The stored result is untouched by the failed narrowing
        assert!(envelope.result_as::<Platform>().is_some());
    }

    #[test]
    fn result_as_returns_none_on_failure_status() {
        // Even a present result is hidden when the status is not 200
        let envelope = ServerResponse::new(
            404,
            Some(SimulationResult::Platform(platform())),
            Some("platform not found".to_string()),
        );

        assert!(envelope.result_as::<Platform>().is_none());
        assert_eq!(envelope.status(), 404);
        assert_eq!(envelope.body(), Some("platform not found"));
    }

    #[test]
    fn result_as_returns_none_on_absent_result() {
        let envelope = ServerResponse::new(200, None, Some("".to_string()));
        assert!(envelope.result_as::<ServerInfo>().is_none());
        assert!(envelope.is_ok());
    }
}
