//! Transport module - driving the decoder from an async byte source.
//!
//! Provides an adapter over any `tokio::io::AsyncRead` (socket, pipe,
//! in-memory buffer) that acts as the chunk source for one decoder.

mod reader;

pub use reader::{spawn_frame_reader, FrameReader};
