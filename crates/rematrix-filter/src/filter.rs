//! The Rematrix filter instance.
//!
//! Lifecycle follows the host's filter contract:
//!
//! | Host call | Thread | Method |
//! |-----------|--------|--------|
//! | create | control | [`RematrixFilter::create`] |
//! | update | control | [`RematrixFilter::update`] |
//! | filter audio | audio | [`RematrixFilter::process`] |
//! | destroy | control | [`RematrixFilter::destroy`] / `Drop` |
//!
//! The host serializes `update` and `process` on one instance. Route changes
//! from any other thread go through a [`RouteController`].

use std::fmt;
use std::sync::Arc;

use rematrix_config::{Preset, RouteConfig, Settings, check_settings};
use rematrix_core::{MAX_CHANNELS, PlanarBuffer, Rematrixer, RoutingTable};

use crate::error::FilterError;
use crate::host::AudioHost;
use crate::properties::defaults;
use crate::shared::{RouteController, SharedRoutes};

/// One instance of the Rematrix audio filter.
pub struct RematrixFilter {
    host: Arc<dyn AudioHost>,
    rematrixer: Rematrixer,
    routes: SharedRoutes,
    /// Last applied settings, with defaults installed.
    settings: Settings,
}

impl RematrixFilter {
    /// Creates a filter for the host's current output layout.
    ///
    /// Scratch buffers are allocated here. Fails if the host reports no
    /// channels or more than [`MAX_CHANNELS`], or if allocation fails; no
    /// partially initialized filter is returned.
    pub fn create(settings: &Settings, host: Arc<dyn AudioHost>) -> Result<Self, FilterError> {
        let channels = host.output_channels();
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(FilterError::UnsupportedChannelCount {
                count: channels,
                max: MAX_CHANNELS,
            });
        }

        let rematrixer = Rematrixer::with_tick_frames(channels, host.tick_frames())?;

        let mut settings = settings.clone();
        defaults(&mut settings);
        let routes = SharedRoutes::new(RouteConfig::from_settings(&settings).table());

        tracing::info!(
            channels,
            tick_frames = rematrixer.tick_frames(),
            "rematrix filter created"
        );
        warn_on_issues(&settings, channels);

        Ok(Self {
            host,
            rematrixer,
            routes,
            settings,
        })
    }

    /// Applies new settings and picks up any change in the host's layout.
    ///
    /// Returns whether any route changed. When the channel count changed,
    /// scratch buffers are reallocated first; if that fails the filter keeps
    /// its previous routes, scratch, and settings.
    pub fn update(&mut self, settings: &Settings) -> Result<bool, FilterError> {
        let channels = self.query_channels();
        if self.rematrixer.resize(channels)? {
            tracing::info!(channels, "rematrix filter channel layout changed");
        }

        let mut settings = settings.clone();
        defaults(&mut settings);
        let changed = self
            .routes
            .rebuild(&RouteConfig::from_settings(&settings).routes);

        tracing::debug!(changed, channels, "rematrix routes updated");
        warn_on_issues(&settings, channels);

        self.settings = settings;
        Ok(changed)
    }

    /// Rewrites one tick of planar audio in place.
    ///
    /// `channels` holds one region per output channel, each with at least
    /// `frame_count` samples. Never allocates, locks, or fails.
    pub fn process<C>(&mut self, channels: &mut [C], frame_count: usize)
    where
        C: AsRef<[f32]> + AsMut<[f32]>,
    {
        let table = self.routes.snapshot();
        self.rematrixer.process(channels, frame_count, &table);
    }

    /// Rewrites an owned buffer over its full length.
    pub fn process_buffer(&mut self, buffer: &mut PlanarBuffer) {
        let table = self.routes.snapshot();
        self.rematrixer.process_buffer(buffer, &table);
    }

    /// Tears the filter down, releasing its scratch buffers.
    pub fn destroy(self) {
        drop(self);
    }

    /// Handle for changing routes from another thread.
    pub fn controller(&self) -> RouteController {
        RouteController::new(self.routes.clone())
    }

    /// Channel count the scratch buffers are sized for.
    pub fn channels(&self) -> usize {
        self.rematrixer.channels()
    }

    /// Routes the next tick will use.
    pub fn routes(&self) -> RoutingTable {
        self.routes.snapshot()
    }

    /// Last applied settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── State persistence ───────────────────────────────────────────────────

    /// Serializes the user's settings as a JSON state blob.
    ///
    /// Route keys are taken from the published table, so routes set through
    /// a [`RouteController`] are saved too.
    pub fn save_state(&self) -> Result<String, FilterError> {
        let mut blob = self.settings.clone();
        RouteConfig::from(self.routes()).write_to(&mut blob);
        Ok(blob.to_json()?)
    }

    /// Restores settings from a state blob written by [`save_state`](Self::save_state).
    pub fn load_state(&mut self, json: &str) -> Result<bool, FilterError> {
        let settings = Settings::from_json(json)?;
        self.update(&settings)
    }

    /// Applies a preset's settings.
    pub fn apply_preset(&mut self, preset: &Preset) -> Result<bool, FilterError> {
        tracing::debug!(preset = %preset.name, "applying rematrix preset");
        self.update(&preset.settings)
    }

    fn query_channels(&self) -> usize {
        let reported = self.host.output_channels();
        if reported > MAX_CHANNELS {
            tracing::warn!(
                reported,
                max = MAX_CHANNELS,
                "host layout exceeds rematrix capacity, extra channels pass through"
            );
            return MAX_CHANNELS;
        }
        if reported == 0 {
            tracing::warn!("host reports no output channels, rematrix is idle");
        }
        reported
    }
}

impl Drop for RematrixFilter {
    fn drop(&mut self) {
        tracing::info!(channels = self.rematrixer.channels(), "rematrix filter destroyed");
    }
}

impl fmt::Debug for RematrixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RematrixFilter")
            .field("rematrixer", &self.rematrixer)
            .field("routes", &self.routes.snapshot())
            .finish_non_exhaustive()
    }
}

fn warn_on_issues(settings: &Settings, channels: usize) {
    for issue in check_settings(settings, channels) {
        tracing::warn!("rematrix: {issue}");
    }
}
