//! Frame sinks: where decoded frames go.
//!
//! The decoder invokes its sink synchronously, once per completed frame, from
//! inside [`FrameDecoder::feed`](crate::protocol::FrameDecoder::feed). A sink
//! must not block for long. Sinks that forward to slow application logic hand
//! the frame off to another task instead, which is what [`ChannelSink`] does:
//!
//! ```text
//! feed() ─► ChannelSink ─► mpsc ─► FrameReceiver (consumer task)
//! ```
//!
//! # Example
//!
//! ```
//! use lpframe::protocol::{Frame, FrameDecoder};
//! use lpframe::Result;
//!
//! let mut decoder = FrameDecoder::new();
//! let mut lengths = Vec::new();
//!
//! decoder
//!     .feed(&[2, 0, 0, 0, b'h', b'i'], &mut |frame: Frame| -> Result<()> {
//!         lengths.push(frame.len());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(lengths, vec![2]);
//! ```

use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::{FrameError, Result};
use crate::protocol::Frame;

/// Consumer of decoded frames.
///
/// Returning an error stops the current `feed` call and poisons the decoder,
/// since the rest of the chunk has not been consumed.
pub trait FrameSink {
    /// Take ownership of one complete frame.
    fn on_frame(&mut self, frame: Frame) -> Result<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(Frame) -> Result<()>,
{
    fn on_frame(&mut self, frame: Frame) -> Result<()> {
        self(frame)
    }
}

impl FrameSink for Vec<Frame> {
    fn on_frame(&mut self, frame: Frame) -> Result<()> {
        self.push(frame);
        Ok(())
    }
}

/// Create a connected sink/receiver pair.
///
/// The channel is unbounded: `feed` is synchronous and cannot wait for
/// capacity, so memory is bounded by how quickly the receiver drains.
pub fn frame_channel() -> (ChannelSink, FrameReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink { tx }, FrameReceiver { rx })
}

/// Sink that forwards frames to a [`FrameReceiver`] on another task.
///
/// Cheaply cloneable.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelSink {
    /// Check if the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl FrameSink for ChannelSink {
    fn on_frame(&mut self, frame: Frame) -> Result<()> {
        self.tx.send(frame).map_err(|_| FrameError::SinkClosed)
    }
}

/// Receiving half of [`frame_channel`].
#[derive(Debug)]
pub struct FrameReceiver {
    rx: mpsc::UnboundedReceiver<Frame>,
}

impl FrameReceiver {
    /// Wait for the next frame.
    ///
    /// Returns `None` once every sink has been dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<Frame> {
        self.rx.recv().await
    }

    /// Wait for the next frame, giving up after `timeout`.
    ///
    /// Returns `Ok(None)` if the channel closed, `Err(Timeout)` if nothing
    /// arrived in time.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Frame>> {
        tokio::time::timeout(timeout, self.rx.recv())
            .await
            .map_err(|_| FrameError::Timeout)
    }

    /// Take a frame if one is already queued.
    pub fn try_recv(&mut self) -> Option<Frame> {
        self.rx.try_recv().ok()
    }

    /// Close the channel; further sends fail with `SinkClosed`.
    ///
    /// Frames already queued can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn frame(seq: u64, payload: &'static [u8]) -> Frame {
        Frame::new(seq, Bytes::from_static(payload))
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Frame> = Vec::new();
        sink.on_frame(frame(0, b"a")).unwrap();
        sink.on_frame(frame(1, b"b")).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].payload(), b"a");
        assert_eq!(sink[1].payload(), b"b");
    }

    #[test]
    fn test_closure_sink_error_propagates() {
        let mut sink = |_frame: Frame| -> Result<()> { Err(FrameError::SinkClosed) };
        let result = sink.on_frame(frame(0, b"x"));
        assert!(matches!(result, Err(FrameError::SinkClosed)));
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (mut sink, mut rx) = frame_channel();

        sink.on_frame(frame(0, b"first")).unwrap();
        sink.on_frame(frame(1, b"second")).unwrap();
        drop(sink);

        assert_eq!(rx.recv().await.unwrap().payload(), b"first");
        assert_eq!(rx.recv().await.unwrap().payload(), b"second");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_channel_sink_closed_receiver() {
        let (mut sink, rx) = frame_channel();
        drop(rx);

        assert!(sink.is_closed());
        let result = sink.on_frame(frame(0, b"lost"));
        assert!(matches!(result, Err(FrameError::SinkClosed)));
    }

    #[test]
    fn test_receiver_close_rejects_new_frames() {
        let (mut sink, mut rx) = frame_channel();
        sink.on_frame(frame(0, b"kept")).unwrap();

        rx.close();

        assert!(matches!(
            sink.on_frame(frame(1, b"late")),
            Err(FrameError::SinkClosed)
        ));
        assert_eq!(rx.try_recv().unwrap().payload(), b"kept");
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recv_timeout_times_out() {
        let (_sink, mut rx) = frame_channel();

        let result = rx.recv_timeout(Duration::from_millis(50)).await;
        assert!(matches!(result, Err(FrameError::Timeout)));
    }

    #[tokio::test]
    async fn test_recv_timeout_receives() {
        let (mut sink, mut rx) = frame_channel();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            sink.on_frame(frame(0, b"late but ok")).unwrap();
        });

        let received = rx.recv_timeout(Duration::from_secs(5)).await.unwrap();
        assert_eq!(received.unwrap().payload(), b"late but ok");
    }

    #[tokio::test]
    async fn test_recv_timeout_closed_channel() {
        let (sink, mut rx) = frame_channel();
        drop(sink);

        let result = rx.recv_timeout(Duration::from_secs(1)).await.unwrap();
        assert!(result.is_none());
    }
}
