//! Request path construction for the simulation server routes
//!
//! Pure string building, no I/O. The server routes on the literal path,
//! so the rules here must match its routing scheme exactly: names and
//! status tokens are concatenated verbatim, without percent-encoding.
//! Callers must not pass characters that would require encoding.

use crate::types::Action;

/// Base path of the simulation overview endpoint
pub const SIMULATION_PATH: &str = "/doip-simulation";

/// Base path of the platform endpoints
pub const PLATFORM_PATH: &str = "/doip-simulation/platform";

/// Path for `GET /doip-simulation`, with the status filter appended only
/// when it is present and non-empty.
pub fn overview_path(status: Option<&str>) -> String {
    match status {
        Some(s) if !s.is_empty() => format!("{}?status={}", SIMULATION_PATH, s),
        _ => SIMULATION_PATH.to_string(),
    }
}

/// Path for `GET /doip-simulation/platform/{name}`
pub fn platform_path(platform_name: &str) -> String {
    format!("{}/{}", PLATFORM_PATH, platform_name)
}

/// Path for `GET /doip-simulation/platform/{p}/gateway/{g}`
pub fn gateway_path(platform_name: &str, gateway_name: &str) -> String {
    format!("{}/gateway/{}", platform_path(platform_name), gateway_name)
}

/// Path for the action-via-GET call; the action token rides in the query
/// string in its lowercase form.
pub fn action_get_path(platform_name: &str, action: Action) -> String {
    format!("{}?action={}", platform_path(platform_name), action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn overview_path_without_filter() {
        assert_eq!(overview_path(None), "/doip-simulation");
        assert_eq!(overview_path(Some("")), "/doip-simulation");
    }

    #[test]
    fn overview_path_with_filter() {
        assert_eq!(
            overview_path(Some("RUNNING")),
            "/doip-simulation?status=RUNNING"
        );
    }

    #[test]
    fn platform_and_gateway_paths_concatenate_names() {
        assert_eq!(platform_path("X2024"), "/doip-simulation/platform/X2024");
        assert_eq!(
            gateway_path("X2024", "GW"),
            "/doip-simulation/platform/X2024/gateway/GW"
        );
    }

    #[test]
    fn action_path_is_platform_path_plus_lowercase_action() {
        for action in [Action::Start, Action::Stop] {
            assert_eq!(
                action_get_path("X2024", action),
                format!("{}?action={}", platform_path("X2024"), action.as_str())
            );
        }
        assert_eq!(
            action_get_path("X2024", Action::Start),
            "/doip-simulation/platform/X2024?action=start"
        );
    }
}
