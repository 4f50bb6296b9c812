//! Routing table mapping output channels to source channels.
//!
//! A [`RoutingTable`] holds one [`Route`] per possible output channel
//! (`MAX_CHANNELS` entries). Each route names the input channel whose
//! samples replace the output channel, or [`Route::MUTE`] for silence.
//!
//! ## Lazy validation
//!
//! Route values are stored exactly as configured. Whether a route is usable
//! depends on the channel count at the moment of use, which can change
//! independently of the routing configuration (the host's speaker layout
//! may shrink and grow again). [`Route::resolve`] performs that check; a
//! route that does not resolve is treated as mute.
//!
//! ```rust
//! use rematrix_core::{Route, RoutingTable};
//!
//! let mut table = RoutingTable::identity();
//! table.set_route(0, Route::new(5));
//!
//! // Channel 5 exists in a 6-channel layout...
//! assert_eq!(table.resolve(0, 6), Some(5));
//! // ...but not after the layout shrinks to stereo.
//! assert_eq!(table.resolve(0, 2), None);
//! ```

use core::fmt;

use crate::MAX_CHANNELS;

/// Source assignment for a single output channel.
///
/// Wraps the raw integer from the host configuration. `-1` means mute; any
/// value in `[0, channel_count)` names an input channel; everything else is
/// inert and also resolves to silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Route(pub i64);

impl Route {
    /// Explicit silence.
    pub const MUTE: Self = Self(-1);

    /// Creates a route from a raw configuration value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw stored value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns `true` for the explicit mute value (`-1`).
    #[inline]
    pub const fn is_mute(self) -> bool {
        self.0 == Self::MUTE.0
    }

    /// Resolves the route against the current channel count.
    ///
    /// Returns the source channel index if it lies in `[0, channel_count)`,
    /// `None` otherwise.
    #[inline]
    pub fn resolve(self, channel_count: usize) -> Option<usize> {
        usize::try_from(self.0)
            .ok()
            .filter(|&source| source < channel_count)
    }
}

impl From<i64> for Route {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Route> for i64 {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mute() {
            write!(f, "mute")
        } else {
            write!(f, "in.ch.{}", self.0)
        }
    }
}

/// Fixed-capacity routing table, one [`Route`] per output channel.
///
/// The table is `Copy`: the audio thread takes a by-value snapshot at the
/// start of every tick and works from that local copy for the whole call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingTable {
    routes: [Route; MAX_CHANNELS],
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl RoutingTable {
    /// Identity routing: every output channel reads its own input channel.
    pub const fn identity() -> Self {
        let mut routes = [Route::MUTE; MAX_CHANNELS];
        let mut i = 0;
        while i < MAX_CHANNELS {
            routes[i] = Route(i as i64);
            i += 1;
        }
        Self { routes }
    }

    /// Every output channel muted.
    pub const fn muted() -> Self {
        Self {
            routes: [Route::MUTE; MAX_CHANNELS],
        }
    }

    /// Builds a table from raw configuration values.
    pub fn from_routes(values: [i64; MAX_CHANNELS]) -> Self {
        Self {
            routes: values.map(Route),
        }
    }

    /// Identity routing with outputs `a` and `b` exchanged.
    ///
    /// Indices outside `0..MAX_CHANNELS` are ignored.
    pub fn swap(a: usize, b: usize) -> Self {
        let mut table = Self::identity();
        if a < MAX_CHANNELS && b < MAX_CHANNELS {
            table.routes.swap(a, b);
        }
        table
    }

    /// Returns the route stored for `output`.
    ///
    /// Outputs beyond `MAX_CHANNELS` report [`Route::MUTE`].
    #[inline]
    pub fn route(&self, output: usize) -> Route {
        self.routes.get(output).copied().unwrap_or(Route::MUTE)
    }

    /// Stores a route for `output` without validating it.
    ///
    /// Returns `false` if `output >= MAX_CHANNELS` (nothing is stored).
    pub fn set_route(&mut self, output: usize, route: impl Into<Route>) -> bool {
        match self.routes.get_mut(output) {
            Some(slot) => {
                *slot = route.into();
                true
            }
            None => false,
        }
    }

    /// Resolves the source channel for `output` under `channel_count`.
    #[inline]
    pub fn resolve(&self, output: usize, channel_count: usize) -> Option<usize> {
        self.route(output).resolve(channel_count)
    }

    /// Copies every configured value into the table.
    ///
    /// Returns `true` if any entry differs from the previous table. The flag
    /// is informational; callers may ignore it.
    pub fn rebuild(&mut self, values: &[i64; MAX_CHANNELS]) -> bool {
        let mut changed = false;
        for (slot, &value) in self.routes.iter_mut().zip(values.iter()) {
            if slot.0 != value {
                slot.0 = value;
                changed = true;
            }
        }
        changed
    }

    /// Raw values of all entries, in output order.
    pub fn values(&self) -> [i64; MAX_CHANNELS] {
        self.routes.map(Route::value)
    }

    /// Borrow all entries.
    pub fn as_array(&self) -> &[Route; MAX_CHANNELS] {
        &self.routes
    }

    /// Iterates over the routes in output order.
    pub fn iter(&self) -> impl Iterator<Item = Route> + '_ {
        self.routes.iter().copied()
    }

    /// Outputs in `0..channel_count` whose route is not an explicit mute
    /// but still resolves to silence (stale or out-of-range source).
    pub fn inert_outputs(&self, channel_count: usize) -> impl Iterator<Item = usize> + '_ {
        let active = channel_count.min(MAX_CHANNELS);
        self.routes[..active]
            .iter()
            .enumerate()
            .filter(move |(_, route)| !route.is_mute() && route.resolve(channel_count).is_none())
            .map(|(output, _)| output)
    }

    /// Returns `true` if every output in `0..channel_count` reads itself.
    pub fn is_identity_for(&self, channel_count: usize) -> bool {
        let active = channel_count.min(MAX_CHANNELS);
        self.routes[..active]
            .iter()
            .enumerate()
            .all(|(output, route)| route.resolve(channel_count) == Some(output))
    }
}
