//! Error types for filter lifecycle operations.

use rematrix_config::ConfigError;
use rematrix_core::RematrixError;
use thiserror::Error;

/// Errors surfaced to the host by [`RematrixFilter`](crate::RematrixFilter).
///
/// Route values never produce an error. Only setup (scratch allocation,
/// unusable channel layouts) and state persistence can fail.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The host's output layout cannot be rematrixed.
    #[error("host reports {count} output channels, supported range is 1..={max}")]
    UnsupportedChannelCount {
        /// Channel count reported by the host.
        count: usize,
        /// Largest supported channel count.
        max: usize,
    },

    /// Scratch setup failed.
    #[error("rematrixer setup failed: {0}")]
    Rematrix(#[from] RematrixError),

    /// Settings could not be serialized or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No filter with the given id is registered.
    #[error("unknown filter id '{0}'")]
    UnknownFilter(String),
}
