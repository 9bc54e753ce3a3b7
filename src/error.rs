//! Error types for the screenshot-native crate.

use crate::probe::ProbeStatus;

/// Errors that can occur while loading images or checking library compatibility.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The linked image library does not match this build's expectations.
    #[error("incompatible image library: {0}")]
    Incompatible(ProbeStatus),

    /// A raw pixel buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Byte count required by the dimensions.
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// The requested quantum depth is not one this crate can store.
    #[error("unsupported quantum depth: {0}")]
    UnsupportedDepth(u32),

    /// An I/O error occurred while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image library failed to decode or convert an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let size = Error::BufferSize {
            width: 2,
            height: 3,
            expected: 24,
            actual: 7,
        };
        let msg = size.to_string();
        assert!(msg.contains("2x3"));
        assert!(msg.contains("24"));
        assert!(msg.contains('7'));

        let incompatible = Error::Incompatible(ProbeStatus::DepthMismatch);
        assert!(incompatible.to_string().contains("quantum depth"));

        assert!(Error::UnsupportedDepth(12).to_string().contains("12"));
    }
}
