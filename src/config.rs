//! Build and scan configuration.
//!
//! The sample format this binary expects is fixed at compile time through the
//! `q8` and `hdri` cargo features, but every routine takes it as a value so
//! that either mode can be exercised from a single build.

use crate::types::{AlphaChannelOption, CompositeOperator};

/// Alpha values strictly above this count as non-transparent (native quantum scale).
pub const ALPHA_THRESHOLD: f64 = 100.0;

/// Bit depth and sample kind used to store pixel channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantumFormat {
    /// Bits per channel sample (8 or 16).
    pub depth: u32,
    /// Samples are floats on the `0..=range()` scale rather than integers.
    pub hdri: bool,
}

impl QuantumFormat {
    /// 8-bit integer samples.
    pub const Q8: Self = Self {
        depth: 8,
        hdri: false,
    };
    /// 16-bit integer samples.
    pub const Q16: Self = Self {
        depth: 16,
        hdri: false,
    };
    /// Floating-point samples on the 8-bit scale.
    pub const Q8_HDRI: Self = Self {
        depth: 8,
        hdri: true,
    };
    /// Floating-point samples on the 16-bit scale.
    pub const Q16_HDRI: Self = Self {
        depth: 16,
        hdri: true,
    };

    /// The format selected by this build's cargo features.
    pub const COMPILED: Self = Self {
        depth: if cfg!(feature = "q8") { 8 } else { 16 },
        hdri: cfg!(feature = "hdri"),
    };

    /// Largest sample value, `2^depth - 1`.
    #[must_use]
    pub fn range(self) -> f64 {
        f64::from(self.depth).exp2() - 1.0
    }
}

impl Default for QuantumFormat {
    fn default() -> Self {
        Self::COMPILED
    }
}

/// What this binary was built and tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Expected sample format of the linked library.
    pub format: QuantumFormat,
    /// Expected value of the source compositing operator.
    pub composite_default: CompositeOperator,
    /// Expected value of the "alpha on" channel option.
    pub alpha_default: AlphaChannelOption,
}

impl BuildConfig {
    /// The configuration baked into this binary.
    #[must_use]
    pub const fn compiled() -> Self {
        Self {
            format: QuantumFormat::COMPILED,
            composite_default: CompositeOperator::Src,
            alpha_default: AlphaChannelOption::On,
        }
    }

    /// Same expectations with a different HDRI mode.
    #[must_use]
    pub const fn with_hdri(mut self, hdri: bool) -> Self {
        self.format.hdri = hdri;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::compiled()
    }
}

/// Options controlling a pixel scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOptions {
    /// Alpha cutoff on the image's native quantum scale.
    pub threshold: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threshold: ALPHA_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_follows_depth() {
        assert!((QuantumFormat::Q8.range() - 255.0).abs() < f64::EPSILON);
        assert!((QuantumFormat::Q16_HDRI.range() - 65535.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compiled_format_tracks_features() {
        let expected_depth = if cfg!(feature = "q8") { 8 } else { 16 };
        assert_eq!(QuantumFormat::COMPILED.depth, expected_depth);
        assert_eq!(QuantumFormat::COMPILED.hdri, cfg!(feature = "hdri"));
    }

    #[test]
    fn compiled_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.composite_default, CompositeOperator::Src);
        assert_eq!(config.alpha_default, AlphaChannelOption::On);
        assert!(config.with_hdri(true).format.hdri);
        assert!(!config.with_hdri(false).format.hdri);
    }

    #[test]
    fn default_threshold_is_100() {
        assert!((ScanOptions::default().threshold - 100.0).abs() < f64::EPSILON);
    }
}
