//! The Rematrix audio filter, as exposed to a host application.
//!
//! Rematrix rewrites each output channel of an audio source as a copy of a
//! chosen input channel, or as silence. Typical uses are swapping left and
//! right, feeding a mono microphone to both speakers, or muting one channel
//! of a multichannel capture.
//!
//! # Architecture
//!
//! ```text
//! control thread                         audio thread
//! ──────────────                         ────────────
//! Settings ─► RouteConfig ─► SharedRoutes ─► snapshot ─► Rematrixer::process
//!                 ▲              ▲
//!  RematrixFilter::update   RouteController::apply
//! ```
//!
//! - [`RematrixFilter`]: one filter instance (create, update, process, destroy)
//! - [`SharedRoutes`] / [`RouteController`]: lock-free route publication
//! - [`AudioHost`]: what the filter asks the host about its output layout
//! - [`properties`] / [`defaults`]: UI description and default settings
//! - [`FilterRegistry`]: descriptors and factories for module registration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rematrix_filter::{FixedHost, RematrixFilter, Settings};
//!
//! let mut settings = Settings::new();
//! settings.set_int("route 0", 1);
//! settings.set_int("route 1", 0);
//!
//! let mut filter = RematrixFilter::create(&settings, Arc::new(FixedHost::new(2))).unwrap();
//!
//! let mut left = [1.0_f32, 2.0, 3.0, 4.0];
//! let mut right = [5.0_f32, 6.0, 7.0, 8.0];
//! filter.process(&mut [&mut left[..], &mut right[..]], 4);
//!
//! assert_eq!(left, [5.0, 6.0, 7.0, 8.0]);
//! assert_eq!(right, [1.0, 2.0, 3.0, 4.0]);
//! ```

mod error;
mod filter;
mod host;
mod properties;
mod registry;
mod shared;

pub use error::FilterError;
pub use filter::RematrixFilter;
pub use host::{AudioHost, FixedHost, SharedHost};
pub use properties::{
    MUTE_LABEL, RouteChoice, RouteProperty, TOOLTIP_KEY, defaults, properties, route_choices,
};
pub use registry::{FilterDescriptor, FilterKind, FilterRegistry, REMATRIX_FILTER_ID};
pub use shared::{RouteController, SharedRoutes};

/// Re-export commonly used types from the lower crates
pub use rematrix_config::{Preset, RouteConfig, Settings, route_key};
pub use rematrix_core::{MAX_CHANNELS, PlanarBuffer, Route, RoutingTable, TICK_FRAMES};
