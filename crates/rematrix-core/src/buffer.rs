//! Owned planar audio buffer.
//!
//! [`PlanarBuffer`] stores one `Vec<f32>` region per channel, all of the same
//! length. It matches the shape hosts hand to the rematrixer each tick and
//! is used wherever the crate needs to own such a buffer (tests, benches,
//! offline processing).

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Multichannel buffer with one contiguous region per channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarBuffer {
    channels: Vec<Vec<f32>>,
    frames: usize,
}

impl PlanarBuffer {
    /// Creates a zeroed buffer with `channels` regions of `frames` samples.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
            frames,
        }
    }

    /// Wraps existing channel data.
    ///
    /// The frame count is that of the shortest region; longer regions are
    /// truncated so every channel has the same length.
    pub fn from_channels(mut channels: Vec<Vec<f32>>) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        for region in &mut channels {
            region.truncate(frames);
        }
        Self { channels, frames }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Returns `true` if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Mutable samples of one channel.
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    /// All channel regions.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// All channel regions, mutably. Region lengths must not be changed.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Fills every channel with zeros.
    pub fn clear(&mut self) {
        for region in &mut self.channels {
            region.fill(0.0);
        }
    }

    /// Consumes the buffer and returns its channel regions.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}
