//! Input size limits for decoding.
//!
//! Decoders reject oversized buffers before parsing them. The default limit of
//! 4 MB matches gRPC's default receive limit.

use up_cloudevent_core::CodecError;

/// Default maximum encoded envelope size (4 MB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Configuration for decode input limits.
///
/// # Example
///
/// ```rust
/// use up_cloudevent::DecodeLimits;
///
/// // Use default 4 MB limit
/// let limits = DecodeLimits::default();
///
/// // Custom 64 KB limit for constrained transports
/// let limits = DecodeLimits::new(64 * 1024);
///
/// // No limit
/// let limits = DecodeLimits::unlimited();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    /// `None` means unlimited.
    max_message_size: Option<usize>,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_message_size: Some(DEFAULT_MAX_MESSAGE_SIZE),
        }
    }
}

impl DecodeLimits {
    /// Create new limits with the specified maximum size in bytes.
    pub fn new(max_message_size: usize) -> Self {
        Self {
            max_message_size: Some(max_message_size),
        }
    }

    /// Create limits with no maximum.
    pub fn unlimited() -> Self {
        Self {
            max_message_size: None,
        }
    }

    /// Returns the maximum size, or `None` if unlimited.
    pub fn max_message_size(&self) -> Option<usize> {
        self.max_message_size
    }

    /// Check if an input size exceeds the configured limit.
    pub fn check_size(&self, size: usize) -> Result<(), CodecError> {
        match self.max_message_size {
            Some(max) if size > max => Err(CodecError::MessageTooLarge { size, max }),
            _ => Ok(()),
        }
    }
}
