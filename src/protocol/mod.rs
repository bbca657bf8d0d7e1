//! Protocol module - wire format, frame type and the incremental decoder.
//!
//! This module implements the receiving side of the length-prefixed protocol:
//! - 4-byte little-endian length prefix decoding and validation
//! - Frame decoder state machine for reassembling frames across chunks
//! - Frame struct with payload accessors

mod decoder;
mod frame;
mod wire_format;

pub use decoder::{DecoderStats, FrameDecoder};
pub use frame::Frame;
pub use wire_format::{
    decode_length_prefix, validate_frame_length, DEFAULT_MAX_FRAME_SIZE, LENGTH_PREFIX_SIZE,
};
