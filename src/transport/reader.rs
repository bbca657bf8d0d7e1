//! Async read loop that drives a [`FrameDecoder`] from any `AsyncRead`.
//!
//! The reader owns nothing about the connection itself: it reads into a fixed
//! buffer, feeds each read to the decoder as one chunk, and stops at EOF or
//! on the first error. Opening, reconnecting and multiplexing connections are
//! the caller's concern.
//!
//! # Architecture
//!
//! ```text
//! AsyncRead ─► read buffer ─► FrameDecoder::feed ─► FrameSink
//! ```
//!
//! # Example
//!
//! ```
//! use lpframe::transport::FrameReader;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> lpframe::Result<()> {
//! let wire: &[u8] = &[3, 0, 0, 0, b'a', b'b', b'c', 0, 0, 0, 0];
//! let mut reader = FrameReader::new(wire);
//! let mut frames = Vec::new();
//!
//! let stats = reader.run(&mut frames).await?;
//!
//! assert_eq!(stats.frames_decoded, 2);
//! assert_eq!(frames[0].payload(), b"abc");
//! assert!(frames[1].is_empty());
//! # Ok(())
//! # }
//! ```

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use crate::config::DecoderConfig;
use crate::error::{FrameError, Result};
use crate::protocol::{DecoderStats, FrameDecoder};
use crate::sink::{frame_channel, FrameReceiver, FrameSink};

/// Reads chunks from `R` and decodes them into frames.
pub struct FrameReader<R> {
    /// Chunk source.
    reader: R,
    /// Decoder for this stream.
    decoder: FrameDecoder,
    /// Buffer each read lands in.
    buf: Vec<u8>,
}

impl<R> FrameReader<R>
where
    R: AsyncRead + Unpin,
{
    /// Create a reader with default configuration.
    pub fn new(reader: R) -> Self {
        let config = DecoderConfig::default();
        Self {
            reader,
            decoder: FrameDecoder::from_config(&config),
            buf: vec![0u8; config.read_buffer_size],
        }
    }

    /// Create a reader with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid.
    pub fn with_config(reader: R, config: &DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            decoder: FrameDecoder::from_config(config),
            buf: vec![0u8; config.read_buffer_size],
        })
    }

    /// Perform one read and feed it to the decoder.
    ///
    /// Returns `Ok(Some(n))` with the number of frames delivered, or
    /// `Ok(None)` at EOF on a frame boundary.
    ///
    /// # Errors
    ///
    /// - `Poisoned` if an earlier chunk left the decoder unusable.
    /// - `TruncatedStream` if EOF arrives in the middle of a frame.
    /// - `Io` on read failure.
    /// - Any decoder or sink error.
    pub async fn read_chunk<S>(&mut self, sink: &mut S) -> Result<Option<usize>>
    where
        S: FrameSink + ?Sized,
    {
        if self.decoder.is_poisoned() {
            return Err(FrameError::Poisoned);
        }

        let n = self.reader.read(&mut self.buf).await?;

        if n == 0 {
            if self.decoder.is_idle() {
                return Ok(None);
            }
            return Err(FrameError::TruncatedStream {
                buffered: self.decoder.buffered_len(),
            });
        }

        let delivered = self.decoder.feed(&self.buf[..n], sink)?;
        Ok(Some(delivered))
    }

    /// Read until EOF, delivering every frame to `sink`.
    ///
    /// Returns the decoder statistics once the stream ends cleanly.
    pub async fn run<S>(&mut self, sink: &mut S) -> Result<DecoderStats>
    where
        S: FrameSink + ?Sized,
    {
        while self.read_chunk(sink).await?.is_some() {}

        let stats = self.decoder.stats();
        tracing::debug!(
            "Stream closed after {} frames ({} bytes)",
            stats.frames_decoded,
            stats.bytes_consumed
        );
        Ok(stats)
    }

    /// Get the decoder.
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Unwrap the underlying reader, discarding any partial frame.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Spawn a task that decodes `reader` and forwards frames over a channel.
///
/// # Returns
///
/// A tuple of `(FrameReceiver, JoinHandle)`. The receiver yields `None` once
/// the task has finished; the JoinHandle carries the final statistics or the
/// error that stopped the task.
///
/// # Errors
///
/// Returns `Config` if the configuration is invalid.
pub fn spawn_frame_reader<R>(
    reader: R,
    config: DecoderConfig,
) -> Result<(FrameReceiver, JoinHandle<Result<DecoderStats>>)>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut frame_reader = FrameReader::with_config(reader, &config)?;
    let (mut sink, rx) = frame_channel();

    let task = tokio::spawn(async move {
        let result = frame_reader.run(&mut sink).await;
        if let Err(e) = &result {
            tracing::error!("Frame reader error: {}", e);
        }
        result
    });

    Ok((rx, task))
}
