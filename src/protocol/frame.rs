//! Frame struct with payload accessors.
//!
//! Represents a complete decoded frame: the payload with its length prefix
//! already stripped. Uses `bytes::Bytes` so the payload can be shared with
//! other tasks without copying.
//!
//! # Example
//!
//! ```
//! use lpframe::protocol::Frame;
//! use bytes::Bytes;
//!
//! let frame = Frame::new(0, Bytes::from_static(b"hello"));
//!
//! assert_eq!(frame.sequence(), 0);
//! assert_eq!(frame.payload(), b"hello");
//! assert_eq!(frame.len(), 5);
//! ```

use bytes::Bytes;

/// A complete length-prefixed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position of this frame in the decoder's delivery order (0-based).
    pub sequence: u64,
    /// Payload bytes (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from a sequence number and payload.
    pub fn new(sequence: u64, payload: Bytes) -> Self {
        Self { sequence, payload }
    }

    /// Get the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get a clone of the payload as Bytes (cheap, zero-copy).
    #[inline]
    pub fn payload_bytes(&self) -> Bytes {
        self.payload.clone()
    }

    /// Consume the frame and return its payload.
    #[inline]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty (a zero-length frame).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(7, Bytes::from_static(b"data"));

        assert_eq!(frame.sequence(), 7);
        assert_eq!(frame.payload(), b"data");
        assert_eq!(frame.len(), 4);
        assert!(!frame.is_empty());
        assert_eq!(frame.as_ref(), b"data");
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new(0, Bytes::new());
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
    }

    #[test]
    fn test_payload_bytes_shares_buffer() {
        let frame = Frame::new(0, Bytes::from(vec![1u8, 2, 3]));
        let shared = frame.payload_bytes();

        assert_eq!(shared.as_ptr(), frame.payload().as_ptr());
        assert_eq!(frame.into_payload(), shared);
    }
}
