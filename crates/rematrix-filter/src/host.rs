//! The host audio environment as seen by the filter.
//!
//! The filter never caches the output layout across control calls: it asks
//! the host again on every `create`, `update`, and property query.

use std::sync::atomic::{AtomicUsize, Ordering};

use rematrix_core::TICK_FRAMES;

/// Query interface to the host's audio output.
pub trait AudioHost: Send + Sync {
    /// Number of channels in the current output layout.
    fn output_channels(&self) -> usize;

    /// Frames per processing tick.
    fn tick_frames(&self) -> usize {
        TICK_FRAMES
    }
}

/// A host whose layout never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHost {
    channels: usize,
    tick_frames: usize,
}

impl FixedHost {
    /// Host with `channels` outputs and the standard tick length.
    pub const fn new(channels: usize) -> Self {
        Self {
            channels,
            tick_frames: TICK_FRAMES,
        }
    }

    /// Override the tick length.
    pub const fn with_tick_frames(mut self, tick_frames: usize) -> Self {
        self.tick_frames = tick_frames;
        self
    }
}

impl AudioHost for FixedHost {
    fn output_channels(&self) -> usize {
        self.channels
    }

    fn tick_frames(&self) -> usize {
        self.tick_frames
    }
}

/// A host whose output layout can be changed at runtime, e.g. when the user
/// switches speaker configuration. Filters pick up the change on their next
/// `update`.
#[derive(Debug)]
pub struct SharedHost {
    channels: AtomicUsize,
    tick_frames: usize,
}

impl SharedHost {
    /// Host starting with `channels` outputs.
    pub fn new(channels: usize) -> Self {
        Self {
            channels: AtomicUsize::new(channels),
            tick_frames: TICK_FRAMES,
        }
    }

    /// Change the reported output layout.
    pub fn set_output_channels(&self, channels: usize) {
        self.channels.store(channels, Ordering::Release);
    }
}

impl AudioHost for SharedHost {
    fn output_channels(&self) -> usize {
        self.channels.load(Ordering::Acquire)
    }

    fn tick_frames(&self) -> usize {
        self.tick_frames
    }
}
