//! Error types for lpframe.

use thiserror::Error;

/// Main error type for all decoding operations.
#[derive(Debug, Error)]
pub enum FrameError {
    /// I/O error while reading from the chunk source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while loading configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Declared frame length exceeds the configured maximum.
    #[error("Frame size {declared} exceeds maximum {max}")]
    FrameTooLarge { declared: u32, max: u32 },

    /// Decoder hit a fatal error earlier and must be replaced.
    #[error("Decoder is poisoned by an earlier error")]
    Poisoned,

    /// Chunk source ended in the middle of a frame.
    #[error("Stream ended mid-frame with {buffered} bytes buffered")]
    TruncatedStream { buffered: usize },

    /// Receiving side of a channel sink was dropped.
    #[error("Frame sink closed")]
    SinkClosed,

    /// No frame arrived within the requested timeout.
    #[error("Timed out waiting for frame")]
    Timeout,
}

/// Result type alias using FrameError.
pub type Result<T> = std::result::Result<T, FrameError>;
