//! Incremental decoder for length-prefixed frames.
//!
//! Implements a state machine that survives arbitrary chunk boundaries:
//! - `AwaitingHeader`: collecting the 4 length bytes, possibly across chunks
//! - `AwaitingBody`: length known, body buffer allocated, filling it
//!
//! Each call to [`FrameDecoder::feed`] drains every complete frame present
//! in the chunk, not just the first. Only the in-progress frame is retained
//! between calls.
//!
//! # Example
//!
//! ```
//! use lpframe::protocol::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//!
//! // Header split across chunks
//! assert!(decoder.push(&[5, 0]).unwrap().is_empty());
//! assert!(decoder.push(&[0, 0, b'h', b'e']).unwrap().is_empty());
//!
//! let frames = decoder.push(b"llo").unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].payload(), b"hello");
//! assert!(decoder.is_idle());
//! ```

use bytes::{Bytes, BytesMut};

use super::wire_format::{
    decode_length_prefix, validate_frame_length, DEFAULT_MAX_FRAME_SIZE, LENGTH_PREFIX_SIZE,
};
use super::Frame;
use crate::config::DecoderConfig;
use crate::error::{FrameError, Result};
use crate::sink::FrameSink;

/// Decoding phase.
#[derive(Debug)]
enum Phase {
    /// Collecting length bytes; `length` holds the little-endian partial value.
    AwaitingHeader { collected: usize, length: u32 },
    /// Filling a body buffer sized exactly to the declared length.
    AwaitingBody { buffer: BytesMut, filled: usize },
}

impl Phase {
    fn idle() -> Self {
        Phase::AwaitingHeader {
            collected: 0,
            length: 0,
        }
    }
}

/// Running totals for one decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames delivered to the sink.
    pub frames_decoded: u64,
    /// Payload bytes delivered (length prefixes excluded).
    pub payload_bytes: u64,
    /// Bytes consumed from chunks (length prefixes included).
    pub bytes_consumed: u64,
    /// Largest payload delivered so far.
    pub largest_frame: u32,
}

/// Decoder for one stream of `u32`-LE length-prefixed frames.
///
/// Feed chunks in arrival order from a single writer. After an error the
/// decoder is poisoned and every later `feed` fails with
/// [`FrameError::Poisoned`]; replace the instance.
pub struct FrameDecoder {
    /// Current parsing phase.
    phase: Phase,
    /// Maximum accepted declared length.
    max_frame_size: u32,
    /// Set after a fatal error.
    poisoned: bool,
    /// Accounting.
    stats: DecoderStats,
}

impl FrameDecoder {
    /// Create a decoder with the default maximum frame size (16 MiB).
    pub fn new() -> Self {
        Self::with_max_frame_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Create a decoder with a custom maximum frame size.
    pub fn with_max_frame_size(max_frame_size: u32) -> Self {
        Self {
            phase: Phase::idle(),
            max_frame_size,
            poisoned: false,
            stats: DecoderStats::default(),
        }
    }

    /// Create a decoder from configuration.
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::with_max_frame_size(config.max_frame_size)
    }

    /// Feed one chunk and deliver every frame it completes to `sink`.
    ///
    /// Partial header or body bytes are kept for the next call. Returns the
    /// number of frames delivered by this call.
    ///
    /// # Errors
    ///
    /// - `FrameTooLarge` if a declared length exceeds the maximum; nothing
    ///   is allocated for it.
    /// - Any error returned by the sink.
    /// - `Poisoned` if an earlier call failed.
    pub fn feed<S>(&mut self, chunk: &[u8], sink: &mut S) -> Result<usize>
    where
        S: FrameSink + ?Sized,
    {
        if self.poisoned {
            return Err(FrameError::Poisoned);
        }

        let mut cursor = 0;
        let mut delivered = 0;

        while cursor < chunk.len() {
            cursor += self.step(&chunk[cursor..])?;

            // Checked after every step so a zero-length body completes
            // right after its header.
            if let Some(buffer) = self.take_completed() {
                self.deliver(buffer.freeze(), sink)?;
                delivered += 1;
            }
        }

        Ok(delivered)
    }

    /// Feed one chunk and collect the completed frames.
    ///
    /// # Errors
    ///
    /// Same as [`feed`](Self::feed).
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        self.feed(chunk, &mut frames)?;
        Ok(frames)
    }

    /// Consume bytes for the current phase. Returns the number consumed.
    ///
    /// Consumed bytes are counted even when the header they complete is
    /// rejected.
    fn step(&mut self, input: &[u8]) -> Result<usize> {
        match &mut self.phase {
            Phase::AwaitingHeader { collected, length } => {
                let mut consumed = 0;

                // Whole prefix in this chunk: read it in one go.
                if *collected == 0 {
                    if let Some(declared) = decode_length_prefix(input) {
                        *collected = LENGTH_PREFIX_SIZE;
                        *length = declared;
                        consumed = LENGTH_PREFIX_SIZE;
                    }
                }

                while *collected < LENGTH_PREFIX_SIZE && consumed < input.len() {
                    *length |= u32::from(input[consumed]) << (8 * *collected);
                    *collected += 1;
                    consumed += 1;
                }

                let complete = *collected == LENGTH_PREFIX_SIZE;
                let declared = *length;
                self.stats.bytes_consumed += consumed as u64;

                if complete {
                    self.start_body(declared)?;
                }

                Ok(consumed)
            }

            Phase::AwaitingBody { buffer, filled } => {
                let take = (buffer.len() - *filled).min(input.len());
                buffer[*filled..*filled + take].copy_from_slice(&input[..take]);
                *filled += take;
                self.stats.bytes_consumed += take as u64;
                Ok(take)
            }
        }
    }

    /// Validate the declared length and allocate the body buffer.
    fn start_body(&mut self, declared: u32) -> Result<()> {
        if let Err(e) = validate_frame_length(declared, self.max_frame_size) {
            tracing::warn!("Rejecting frame, decoder poisoned: {}", e);
            self.poisoned = true;
            return Err(e);
        }

        self.phase = Phase::AwaitingBody {
            buffer: BytesMut::zeroed(declared as usize),
            filled: 0,
        };
        Ok(())
    }

    /// If the body is full, reset to `AwaitingHeader` and return it.
    fn take_completed(&mut self) -> Option<BytesMut> {
        match &self.phase {
            Phase::AwaitingBody { buffer, filled } if *filled == buffer.len() => {}
            _ => return None,
        }

        match std::mem::replace(&mut self.phase, Phase::idle()) {
            Phase::AwaitingBody { buffer, .. } => Some(buffer),
            Phase::AwaitingHeader { .. } => None,
        }
    }

    fn deliver<S>(&mut self, payload: Bytes, sink: &mut S) -> Result<()>
    where
        S: FrameSink + ?Sized,
    {
        let len = payload.len();
        let frame = Frame::new(self.stats.frames_decoded, payload);

        self.stats.frames_decoded += 1;
        self.stats.payload_bytes += len as u64;
        self.stats.largest_frame = self.stats.largest_frame.max(len as u32);

        tracing::trace!("Decoded frame {} ({} bytes)", frame.sequence, len);

        if let Err(e) = sink.on_frame(frame) {
            tracing::warn!("Frame sink failed, decoder poisoned: {}", e);
            self.poisoned = true;
            return Err(e);
        }
        Ok(())
    }

    /// Check if no partial frame is held (header or body).
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::AwaitingHeader { collected: 0, .. })
    }

    /// Bytes held for the in-progress frame: partial header bytes while
    /// awaiting the header, body bytes filled so far otherwise.
    pub fn buffered_len(&self) -> usize {
        match &self.phase {
            Phase::AwaitingHeader { collected, .. } => *collected,
            Phase::AwaitingBody { filled, .. } => *filled,
        }
    }

    /// Declared length of the frame being assembled, once its header is known.
    pub fn pending_frame_len(&self) -> Option<u32> {
        match &self.phase {
            Phase::AwaitingHeader { .. } => None,
            Phase::AwaitingBody { buffer, .. } => Some(buffer.len() as u32),
        }
    }

    /// Check if an earlier error poisoned this decoder.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Maximum accepted declared length.
    pub fn max_frame_size(&self) -> u32 {
        self.max_frame_size
    }

    /// Running totals.
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Get the current phase for debugging.
    #[cfg(test)]
    fn phase_name(&self) -> &'static str {
        match &self.phase {
            Phase::AwaitingHeader { .. } => "AwaitingHeader",
            Phase::AwaitingBody { .. } => "AwaitingBody",
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
