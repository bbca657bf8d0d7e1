//! # lpframe
//!
//! Incremental decoder for length-prefixed frames.
//!
//! Each frame on the wire is a 4-byte little-endian length followed by that
//! many payload bytes. Bytes arrive in chunks of any size and alignment; the
//! decoder reassembles frames across chunk boundaries (including inside the
//! length prefix) and hands each complete payload to a sink.
//!
//! ## Architecture
//!
//! - **Decoder** ([`protocol::FrameDecoder`]): synchronous state machine, one per stream
//! - **Sinks** ([`sink`]): closures, `Vec<Frame>`, or a channel to another task
//! - **Reader** ([`transport::FrameReader`]): async read loop over any `AsyncRead`
//!
//! ## Example
//!
//! ```
//! use lpframe::protocol::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//! let mut frames = Vec::new();
//!
//! // Two frames, the second split across chunks
//! decoder.feed(&[1, 0, 0, 0, b'a', 2, 0], &mut frames).unwrap();
//! decoder.feed(&[0, 0, b'b', b'c'], &mut frames).unwrap();
//!
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[0].payload(), b"a");
//! assert_eq!(frames[1].payload(), b"bc");
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod sink;
pub mod transport;

pub use config::DecoderConfig;
pub use error::{FrameError, Result};
pub use protocol::{Frame, FrameDecoder};
pub use sink::{frame_channel, ChannelSink, FrameReceiver, FrameSink};
