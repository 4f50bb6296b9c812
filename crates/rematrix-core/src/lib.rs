//! Rematrix Core - channel routing primitives for real-time audio
//!
//! This crate provides the pieces of the rematrix filter that run on the
//! audio thread: a fixed-capacity routing table and the frame rematrixer
//! that rewrites a multichannel buffer in place according to that table.
//!
//! # Core Abstractions
//!
//! ## Routing
//!
//! - [`Route`] - Source channel assignment for one output channel (or mute)
//! - [`RoutingTable`] - Fixed-size map from output channel to [`Route`]
//!
//! ## Processing
//!
//! - [`Rematrixer`] - Chunked, two-phase in-place channel rewrite
//! - [`PlanarBuffer`] - Owned per-channel sample regions
//!
//! ## Constants
//!
//! - [`MAX_CHANNELS`] - Ceiling on the number of channels in a buffer
//! - [`TICK_FRAMES`] - Native processing chunk size in frames
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for scratch buffers).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rematrix-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use rematrix_core::{Rematrixer, RoutingTable};
//!
//! let mut rematrixer = Rematrixer::new(2).unwrap();
//! let mut channels = vec![vec![1.0_f32, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]];
//!
//! rematrixer.process(&mut channels, 4, &RoutingTable::swap(0, 1));
//!
//! assert_eq!(channels[0], [5.0, 6.0, 7.0, 8.0]);
//! assert_eq!(channels[1], [1.0, 2.0, 3.0, 4.0]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks, or logging in [`Rematrixer::process`]
//! - **Never fails on the audio path**: Bad routes degrade to silence
//! - **Alias-free**: Every chunk is staged through per-channel scratch before writeback

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod error;
pub mod rematrix;
pub mod routing;

pub use buffer::PlanarBuffer;
pub use error::RematrixError;
pub use rematrix::Rematrixer;
pub use routing::{Route, RoutingTable};

/// Maximum number of audio channels a buffer may carry.
///
/// Matches the host's speaker-layout ceiling (7.1 surround).
pub const MAX_CHANNELS: usize = 8;

/// Native processing chunk size in frames.
///
/// Buffers longer than this are rematrixed in chunks of at most
/// `TICK_FRAMES` frames, which also sizes each per-channel scratch buffer.
pub const TICK_FRAMES: usize = 1024;
