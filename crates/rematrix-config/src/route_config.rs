//! Typed route configuration.
//!
//! The host stores one integer per output channel under the keys
//! `route 0` .. `route 7`. [`RouteConfig`] reads those keys once at the
//! configuration boundary so the audio path never touches string lookups.

use rematrix_core::{MAX_CHANNELS, RoutingTable};

use crate::settings::Settings;

/// Prefix of every route key.
pub const ROUTE_KEY_PREFIX: &str = "route ";

/// Settings key holding the route for `output`.
///
/// ```rust
/// assert_eq!(rematrix_config::route_key(3), "route 3");
/// ```
pub fn route_key(output: usize) -> String {
    format!("{ROUTE_KEY_PREFIX}{output}")
}

/// Parses the output index out of a route key.
///
/// Returns `None` for keys that are not of the form `route {index}`. The
/// index is not checked against [`MAX_CHANNELS`].
pub fn parse_route_key(key: &str) -> Option<usize> {
    key.strip_prefix(ROUTE_KEY_PREFIX)?.parse().ok()
}

/// Installs the identity defaults (`route {i} = i`) for every output.
///
/// User values already present are left untouched.
pub fn apply_defaults(settings: &mut Settings) {
    for output in 0..MAX_CHANNELS {
        settings.set_default_int(route_key(output), output as i64);
    }
}

/// Route values for all outputs, read from [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteConfig {
    /// Raw route per output channel; `-1` mutes.
    pub routes: [i64; MAX_CHANNELS],
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self::from(RoutingTable::identity())
    }
}

impl From<RoutingTable> for RouteConfig {
    fn from(table: RoutingTable) -> Self {
        Self {
            routes: table.values(),
        }
    }
}

impl RouteConfig {
    /// Reads every route key, substituting the identity route for any key
    /// that is missing or not an integer.
    ///
    /// Values are copied as stored; out-of-range routes are kept and only
    /// resolved against the channel count at processing time.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut routes = [0i64; MAX_CHANNELS];
        for (output, route) in routes.iter_mut().enumerate() {
            *route = settings
                .get_int(&route_key(output))
                .unwrap_or(output as i64);
        }
        Self { routes }
    }

    /// Writes every route as a user value.
    pub fn write_to(&self, settings: &mut Settings) {
        for (output, &route) in self.routes.iter().enumerate() {
            settings.set_int(route_key(output), route);
        }
    }

    /// Builder-style route assignment. Outputs beyond `MAX_CHANNELS` are ignored.
    pub fn with_route(mut self, output: usize, route: i64) -> Self {
        if let Some(slot) = self.routes.get_mut(output) {
            *slot = route;
        }
        self
    }

    /// Route stored for `output`.
    pub fn route(&self, output: usize) -> Option<i64> {
        self.routes.get(output).copied()
    }

    /// Converts to a routing table.
    pub fn table(&self) -> RoutingTable {
        RoutingTable::from_routes(self.routes)
    }
}
