//! Settings diagnostics.
//!
//! Nothing here rejects a configuration: malformed route settings are
//! resolved by default substitution and stale routes are muted at
//! processing time. These checks only describe what will happen, so a host
//! can log or display it.

use std::fmt;

use rematrix_core::{MAX_CHANNELS, Route};

use crate::route_config::{parse_route_key, route_key};
use crate::settings::Settings;

/// One observation about a settings object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsIssue {
    /// A route key holds a non-integer value; the identity route is used.
    WrongType {
        /// The offending key.
        key: String,
        /// Type name of the stored value.
        found: &'static str,
    },
    /// A route key names an output beyond `MAX_CHANNELS`; it is never read.
    UnusedRouteKey {
        /// The offending key.
        key: String,
        /// Output index parsed from the key.
        output: usize,
    },
    /// A route points outside the current channel layout; the output is muted.
    InertRoute {
        /// Output channel.
        output: usize,
        /// Stored route value.
        route: i64,
        /// Channel count it was checked against.
        channel_count: usize,
    },
}

impl fmt::Display for SettingsIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { key, found } => {
                write!(f, "'{key}' holds a {found}, using identity route")
            }
            Self::UnusedRouteKey { key, output } => write!(
                f,
                "'{key}' targets output {output}, beyond the {MAX_CHANNELS}-channel limit"
            ),
            Self::InertRoute {
                output,
                route,
                channel_count,
            } => write!(
                f,
                "output {output} routed from {route}, which does not exist in a \
                 {channel_count}-channel layout; output is muted"
            ),
        }
    }
}

/// Lists every issue with the route settings under `channel_count` channels.
///
/// Explicit mutes (`-1`) are not reported.
pub fn check_settings(settings: &Settings, channel_count: usize) -> Vec<SettingsIssue> {
    let mut issues = Vec::new();

    for (key, value) in settings.iter() {
        let Some(output) = parse_route_key(key) else {
            continue;
        };
        if output >= MAX_CHANNELS {
            issues.push(SettingsIssue::UnusedRouteKey {
                key: key.to_string(),
                output,
            });
        } else if value.as_int().is_none() {
            issues.push(SettingsIssue::WrongType {
                key: key.to_string(),
                found: value.type_name(),
            });
        }
    }

    for output in 0..channel_count.min(MAX_CHANNELS) {
        let Some(route) = settings.get_int(&route_key(output)) else {
            continue;
        };
        let route = Route::new(route);
        if !route.is_mute() && route.resolve(channel_count).is_none() {
            issues.push(SettingsIssue::InertRoute {
                output,
                route: route.value(),
                channel_count,
            });
        }
    }

    issues
}
