//! Wire format constants and length-prefix helpers.
//!
//! Every frame is a 4-byte length prefix followed by the payload:
//! ```text
//! ┌──────────────────┬────────────────────┐
//! │ Length           │ Payload            │
//! │ 4 bytes          │ `Length` bytes     │
//! │ uint32 LE        │                    │
//! └──────────────────┴────────────────────┘
//! ```
//!
//! There is no magic number, version or checksum at this layer.

use crate::error::{FrameError, Result};

/// Length prefix size in bytes (fixed, exactly 4).
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default maximum frame size (16 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

/// Decode a length prefix from the first 4 bytes of `buf` (Little Endian).
///
/// Returns `None` if buffer is too short.
///
/// # Example
///
/// ```
/// use lpframe::protocol::decode_length_prefix;
///
/// assert_eq!(decode_length_prefix(&[10, 0, 0, 0]), Some(10));
/// assert_eq!(decode_length_prefix(&[0, 1, 0, 0]), Some(256));
/// assert_eq!(decode_length_prefix(&[1, 2, 3]), None);
/// ```
pub fn decode_length_prefix(buf: &[u8]) -> Option<u32> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return None;
    }
    Some(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
}

/// Check a declared frame length against a maximum.
pub fn validate_frame_length(declared: u32, max_frame_size: u32) -> Result<()> {
    if declared > max_frame_size {
        return Err(FrameError::FrameTooLarge {
            declared,
            max: max_frame_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_little_endian() {
        let bytes = [0x0B, 0x0A, 0x09, 0x08];
        assert_eq!(decode_length_prefix(&bytes), Some(0x08090A0B));
    }

    #[test]
    fn test_prefix_ignores_trailing_bytes() {
        let bytes = [5, 0, 0, 0, 0xFF, 0xFF];
        assert_eq!(decode_length_prefix(&bytes), Some(5));
    }

    #[test]
    fn test_prefix_too_short() {
        assert!(decode_length_prefix(&[]).is_none());
        assert!(decode_length_prefix(&[1, 2, 3]).is_none());
    }

    #[test]
    fn test_prefix_matches_std_encoding() {
        for len in [0u32, 1, 255, 256, 65_535, 1 << 24, u32::MAX] {
            assert_eq!(decode_length_prefix(&len.to_le_bytes()), Some(len));
        }
    }

    #[test]
    fn test_validate_at_limit() {
        assert!(validate_frame_length(100, 100).is_ok());
        assert!(validate_frame_length(0, 0).is_ok());
    }

    #[test]
    fn test_validate_over_limit() {
        let result = validate_frame_length(101, 100);
        assert!(matches!(
            result,
            Err(FrameError::FrameTooLarge {
                declared: 101,
                max: 100
            })
        ));
        assert!(validate_frame_length(101, 100)
            .unwrap_err()
            .to_string()
            .contains("exceeds maximum"));
    }

    #[test]
    fn test_full_range_limit_accepts_everything() {
        assert!(validate_frame_length(u32::MAX, u32::MAX).is_ok());
    }
}
