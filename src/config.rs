//! Decoder and reader configuration.
//!
//! Defaults come from named constants; every field can be overridden with a
//! builder-style setter or loaded from JSON. Missing JSON fields keep their
//! defaults.
//!
//! # Example
//!
//! ```
//! use lpframe::config::DecoderConfig;
//!
//! let config = DecoderConfig::from_json_str(r#"{ "max_frame_size": 1024 }"#).unwrap();
//! assert_eq!(config.max_frame_size, 1024);
//! assert_eq!(config.read_buffer_size, lpframe::config::DEFAULT_READ_BUFFER_SIZE);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{FrameError, Result};
use crate::protocol::DEFAULT_MAX_FRAME_SIZE;

/// Default size of the buffer each transport read lands in (64 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for a [`FrameDecoder`](crate::protocol::FrameDecoder) and
/// the [`FrameReader`](crate::transport::FrameReader) driving it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Largest declared frame length accepted before failing with
    /// `FrameTooLarge`.
    pub max_frame_size: u32,
    /// Size of the buffer used for each read from the chunk source.
    pub read_buffer_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl DecoderConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted frame size.
    pub fn max_frame_size(mut self, max: u32) -> Self {
        self.max_frame_size = max;
        self
    }

    /// Set the read buffer size.
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_size == 0 {
            return Err(FrameError::Config(
                "read_buffer_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
        assert_eq!(config.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = DecoderConfig::new()
            .max_frame_size(4096)
            .read_buffer_size(512);

        assert_eq!(config.max_frame_size, 4096);
        assert_eq!(config.read_buffer_size, 512);
    }

    #[test]
    fn test_json_partial_keeps_defaults() {
        let config = DecoderConfig::from_json_str(r#"{ "read_buffer_size": 8 }"#).unwrap();
        assert_eq!(config.read_buffer_size, 8);
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
    }

    #[test]
    fn test_json_empty_object() {
        let config = DecoderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DecoderConfig::default());
    }

    #[test]
    fn test_json_unknown_field_rejected() {
        let result = DecoderConfig::from_json_str(r#"{ "max_size": 1 }"#);
        assert!(matches!(result, Err(FrameError::Json(_))));
    }

    #[test]
    fn test_json_channel_capacity_not_a_setting() {
        // Frames go through an unbounded channel; there is nothing to size.
        let result = DecoderConfig::from_json_str(r#"{ "channel_capacity": 0 }"#);
        assert!(matches!(result, Err(FrameError::Json(_))));
    }

    #[test]
    fn test_json_zero_read_buffer_rejected() {
        let result = DecoderConfig::from_json_str(r#"{ "read_buffer_size": 0 }"#);
        assert!(matches!(result, Err(FrameError::Config(_))));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("read_buffer_size"));
    }

    #[test]
    fn test_json_full_u32_range() {
        let config =
            DecoderConfig::from_json_str(r#"{ "max_frame_size": 4294967295 }"#).unwrap();
        assert_eq!(config.max_frame_size, u32::MAX);
    }

    #[test]
    fn test_from_missing_file() {
        let result = DecoderConfig::from_json_file("/nonexistent/lpframe-config.json");
        assert!(matches!(result, Err(FrameError::Io(_))));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!(
            "lpframe-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "max_frame_size": 77 }"#).unwrap();

        let config = DecoderConfig::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.max_frame_size, 77);
    }
}
