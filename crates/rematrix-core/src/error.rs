//! Errors raised while setting up a [`Rematrixer`](crate::Rematrixer).
//!
//! Processing itself never fails; these only surface from construction and
//! resizing, which happen outside the audio callback.

use crate::MAX_CHANNELS;

/// Errors that can occur while allocating rematrixer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RematrixError {
    /// Scratch memory for the requested channel layout could not be reserved.
    Allocation {
        /// Channel count being allocated for.
        channels: usize,
        /// Samples per scratch buffer.
        frames: usize,
    },
    /// The requested channel count exceeds [`MAX_CHANNELS`].
    TooManyChannels(usize),
    /// A tick size of zero frames was requested.
    ZeroTickFrames,
}

impl core::fmt::Display for RematrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Allocation { channels, frames } => write!(
                f,
                "failed to allocate scratch buffers for {channels} channels of {frames} frames"
            ),
            Self::TooManyChannels(n) => {
                write!(f, "{n} channels requested, at most {MAX_CHANNELS} supported")
            }
            Self::ZeroTickFrames => write!(f, "tick size must be at least one frame"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RematrixError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_display() {
        let err = RematrixError::Allocation {
            channels: 6,
            frames: 1024,
        };
        assert_eq!(
            err.to_string(),
            "failed to allocate scratch buffers for 6 channels of 1024 frames"
        );
    }

    #[test]
    fn too_many_channels_display() {
        let msg = RematrixError::TooManyChannels(12).to_string();
        assert!(msg.contains("12"), "got: {msg}");
        assert!(msg.contains(&MAX_CHANNELS.to_string()), "got: {msg}");
    }
}
