//! Frame rematrixer: the per-tick channel rewrite.
//!
//! [`Rematrixer::process`] replaces every output channel of a planar buffer
//! with a copy of the input channel named by the [`RoutingTable`], or with
//! silence when the route does not resolve.
//!
//! ## Two-phase chunks
//!
//! The buffer is rewritten in place, so a naive single pass would corrupt
//! any routing where one channel reads another that was already overwritten
//! (e.g. swapping channels 0 and 1). Each chunk is therefore processed in two
//! phases:
//!
//! 1. **Stage**: every output channel's new content is copied (or zeroed)
//!    into that channel's scratch buffer, reading only original input.
//! 2. **Write back**: every scratch buffer is copied over its channel.
//!
//! Frames are handled in chunks of at most `tick_frames`, which bounds the
//! scratch memory to one chunk per channel regardless of buffer length.
//!
//! ## Real-time safety
//!
//! `process` never allocates, locks, or fails. Scratch buffers are allocated
//! up front by [`Rematrixer::new`] and [`Rematrixer::resize`], both of which
//! run on the control path and report allocation failure as
//! [`RematrixError::Allocation`].

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::buffer::PlanarBuffer;
use crate::error::RematrixError;
use crate::routing::RoutingTable;
use crate::{MAX_CHANNELS, TICK_FRAMES};

/// Per-instance channel rematrixer with preallocated scratch buffers.
///
/// One scratch buffer of `tick_frames` samples exists per channel. The
/// rematrixer is owned by exactly one filter instance and is not shared
/// between threads while processing.
///
/// # Example
///
/// ```rust
/// use rematrix_core::{Rematrixer, Route, RoutingTable};
///
/// let mut rematrixer = Rematrixer::new(3).unwrap();
/// let mut table = RoutingTable::identity();
/// table.set_route(1, 0); // fan channel 0 out to channel 1
/// table.set_route(2, Route::MUTE);
///
/// let mut channels = [[0.5_f32; 16], [0.25; 16], [1.0; 16]];
/// rematrixer.process(&mut channels, 16, &table);
///
/// assert_eq!(channels[1], [0.5; 16]);
/// assert_eq!(channels[2], [0.0; 16]);
/// ```
#[derive(Debug)]
pub struct Rematrixer {
    scratch: Vec<Vec<f32>>,
    tick_frames: usize,
}

impl Rematrixer {
    /// Creates a rematrixer for `channels` channels using [`TICK_FRAMES`] chunks.
    pub fn new(channels: usize) -> Result<Self, RematrixError> {
        Self::with_tick_frames(channels, TICK_FRAMES)
    }

    /// Creates a rematrixer with a custom chunk size.
    ///
    /// Hosts with a different native block size pass it here; tests use it
    /// to exercise chunk boundaries with small buffers.
    pub fn with_tick_frames(channels: usize, tick_frames: usize) -> Result<Self, RematrixError> {
        if tick_frames == 0 {
            return Err(RematrixError::ZeroTickFrames);
        }
        let mut rematrixer = Self {
            scratch: Vec::new(),
            tick_frames,
        };
        rematrixer.resize(channels)?;
        Ok(rematrixer)
    }

    /// Reallocates scratch buffers for a new channel count.
    ///
    /// Returns `Ok(true)` if the scratch set was replaced and `Ok(false)` if
    /// the channel count was unchanged. On error the previous scratch set is
    /// kept intact, so the rematrixer remains usable at its old size.
    pub fn resize(&mut self, channels: usize) -> Result<bool, RematrixError> {
        if channels > MAX_CHANNELS {
            return Err(RematrixError::TooManyChannels(channels));
        }
        if channels == self.scratch.len() {
            return Ok(false);
        }

        self.scratch = allocate_scratch(channels, self.tick_frames)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "rematrix_resize: {channels} scratch buffers of {} frames",
            self.tick_frames
        );

        Ok(true)
    }

    /// Number of channels with scratch buffers.
    pub fn channels(&self) -> usize {
        self.scratch.len()
    }

    /// Maximum frames processed per chunk.
    pub fn tick_frames(&self) -> usize {
        self.tick_frames
    }

    /// Rewrites `channels` in place according to `table`.
    ///
    /// `channels.len()` is the current channel count and every region must
    /// hold at least `frame_count` samples. Routes are resolved against that
    /// channel count, so stale routes from a larger layout become silence.
    ///
    /// Inputs outside the preconditions degrade instead of panicking: only
    /// the first [`channels()`](Self::channels) regions are touched, and
    /// frames past the shortest region are left alone.
    pub fn process<C>(&mut self, channels: &mut [C], frame_count: usize, table: &RoutingTable)
    where
        C: AsRef<[f32]> + AsMut<[f32]>,
    {
        // Local copy: the caller's table may be republished mid-tick.
        let routes = *table;

        let channel_count = channels.len().min(self.scratch.len());
        if channel_count == 0 || frame_count == 0 {
            return;
        }
        let channels = &mut channels[..channel_count];
        let frames = channels
            .iter()
            .map(|region| region.as_ref().len())
            .fold(frame_count, usize::min);

        let mut offset = 0;
        while offset < frames {
            let len = (frames - offset).min(self.tick_frames);
            self.stage(channels, &routes, offset, len);
            self.write_back(channels, offset, len);
            offset += len;
        }
    }

    /// Rewrites an owned [`PlanarBuffer`] over its full length.
    pub fn process_buffer(&mut self, buffer: &mut PlanarBuffer, table: &RoutingTable) {
        let frames = buffer.frames();
        self.process(buffer.channels_mut(), frames, table);
    }

    /// Fills each channel's scratch buffer with its routed source chunk.
    fn stage<C>(&mut self, channels: &[C], routes: &RoutingTable, offset: usize, len: usize)
    where
        C: AsRef<[f32]>,
    {
        let channel_count = channels.len();
        for (output, scratch) in self.scratch[..channel_count].iter_mut().enumerate() {
            match routes.resolve(output, channel_count) {
                Some(source) => {
                    let src = &channels[source].as_ref()[offset..offset + len];
                    scratch[..len].copy_from_slice(src);
                }
                None => scratch.fill(0.0),
            }
        }
    }

    /// Copies staged chunks back over their channels.
    fn write_back<C>(&self, channels: &mut [C], offset: usize, len: usize)
    where
        C: AsMut<[f32]>,
    {
        for (region, scratch) in channels.iter_mut().zip(&self.scratch) {
            region.as_mut()[offset..offset + len].copy_from_slice(&scratch[..len]);
        }
    }
}

/// Allocates a zeroed scratch set, reporting failure instead of aborting.
fn allocate_scratch(channels: usize, frames: usize) -> Result<Vec<Vec<f32>>, RematrixError> {
    let err = |_| RematrixError::Allocation { channels, frames };

    let mut set = Vec::new();
    set.try_reserve_exact(channels).map_err(err)?;
    for _ in 0..channels {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(frames).map_err(err)?;
        buffer.resize(frames, 0.0);
        set.push(buffer);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Route;

    #[test]
    fn swaps_two_channels() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        let mut channels = vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]];

        rematrixer.process(&mut channels, 4, &RoutingTable::from_routes([1, 0, 2, 3, 4, 5, 6, 7]));

        assert_eq!(channels[0], [5.0, 6.0, 7.0, 8.0]);
        assert_eq!(channels[1], [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_frames_is_noop() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        let mut channels = vec![vec![1.0; 8], vec![2.0; 8]];
        rematrixer.process(&mut channels, 0, &RoutingTable::muted());
        assert_eq!(channels, vec![vec![1.0; 8], vec![2.0; 8]]);
    }

    #[test]
    fn zero_channels_is_noop() {
        let mut rematrixer = Rematrixer::new(0).unwrap();
        let mut channels: Vec<Vec<f32>> = Vec::new();
        rematrixer.process(&mut channels, 128, &RoutingTable::muted());
        assert!(channels.is_empty());
    }

    #[test]
    fn tail_chunk_stops_at_frame_count() {
        let mut rematrixer = Rematrixer::with_tick_frames(2, 4).unwrap();
        // Regions are longer than frame_count; samples past it must survive.
        let mut channels = vec![vec![1.0; 10], vec![2.0; 10]];

        rematrixer.process(&mut channels, 6, &RoutingTable::swap(0, 1));

        assert_eq!(channels[0], [2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(channels[1], [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn short_region_limits_frames() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        let mut channels = vec![vec![1.0; 3], vec![2.0; 5]];

        rematrixer.process(&mut channels, 5, &RoutingTable::swap(0, 1));

        assert_eq!(channels[0], [2.0, 2.0, 2.0]);
        assert_eq!(channels[1], [1.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn channels_beyond_scratch_are_untouched() {
        let mut rematrixer = Rematrixer::new(1).unwrap();
        let mut channels = vec![vec![1.0; 4], vec![2.0; 4]];
        let mut table = RoutingTable::identity();
        table.set_route(0, 1);

        rematrixer.process(&mut channels, 4, &table);

        // Only one channel is processed, so source 1 is out of range.
        assert_eq!(channels[0], [0.0; 4]);
        assert_eq!(channels[1], [2.0; 4]);
    }

    #[test]
    fn mute_clears_channel() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        let mut channels = [[0.7_f32; 32], [0.3; 32]];
        let mut table = RoutingTable::identity();
        table.set_route(0, Route::MUTE);

        rematrixer.process(&mut channels, 32, &table);

        assert_eq!(channels[0], [0.0; 32]);
        assert_eq!(channels[1], [0.3; 32]);
    }

    #[test]
    fn resize_only_reallocates_on_change() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        assert!(!rematrixer.resize(2).unwrap());
        assert!(rematrixer.resize(6).unwrap());
        assert_eq!(rematrixer.channels(), 6);
        assert_eq!(rematrixer.tick_frames(), TICK_FRAMES);
    }

    #[test]
    fn resize_rejects_too_many_channels() {
        let mut rematrixer = Rematrixer::new(2).unwrap();
        assert_eq!(
            rematrixer.resize(MAX_CHANNELS + 1),
            Err(RematrixError::TooManyChannels(MAX_CHANNELS + 1))
        );
        assert_eq!(rematrixer.channels(), 2);
    }

    #[test]
    fn zero_tick_frames_rejected() {
        assert_eq!(
            Rematrixer::with_tick_frames(2, 0).unwrap_err(),
            RematrixError::ZeroTickFrames
        );
    }

    #[test]
    fn process_buffer_covers_all_frames() {
        let mut rematrixer = Rematrixer::with_tick_frames(2, 3).unwrap();
        let mut buffer = PlanarBuffer::from_channels(vec![vec![1.0; 7], vec![2.0; 7]]);

        rematrixer.process_buffer(&mut buffer, &RoutingTable::swap(0, 1));

        assert_eq!(buffer.channel(0), Some(&[2.0; 7][..]));
        assert_eq!(buffer.channel(1), Some(&[1.0; 7][..]));
    }
}
