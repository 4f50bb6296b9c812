//! Configuration and preset management for the rematrix filter.
//!
//! The host hands the filter a flat, string-keyed configuration object. This
//! crate models that object ([`Settings`]), converts it once into typed route
//! values ([`RouteConfig`]), and persists it as presets or state blobs.
//!
//! # Features
//!
//! - **Settings**: User values layered over defaults, loosely typed
//! - **Routes**: `route {i}` keys read into a fixed-size [`RouteConfig`]
//! - **Diagnostics**: Describe wrongly typed or inert routes without rejecting them
//! - **Presets**: Save and load named settings as TOML files
//! - **State**: JSON state blobs for host session save/restore
//!
//! # Example
//!
//! ```rust
//! use rematrix_config::{RouteConfig, Settings, apply_defaults};
//!
//! let mut settings = Settings::new();
//! apply_defaults(&mut settings);
//! settings.set_int("route 0", 1);
//! settings.set_int("route 1", 0);
//!
//! let routes = RouteConfig::from_settings(&settings);
//! assert_eq!(routes.routes[..3], [1, 0, 2]);
//! ```

mod error;
mod preset;
mod route_config;
mod settings;

/// Settings diagnostics.
pub mod validation;

pub use error::ConfigError;
pub use preset::Preset;
pub use route_config::{
    ROUTE_KEY_PREFIX, RouteConfig, apply_defaults, parse_route_key, route_key,
};
pub use settings::{SettingValue, Settings};
pub use validation::{SettingsIssue, check_settings};

/// Re-export commonly used types from rematrix-core
pub use rematrix_core::{MAX_CHANNELS, Route, RoutingTable};
