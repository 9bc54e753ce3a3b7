//! Compatibility check between this binary and the linked image library.
//!
//! A mismatch in quantum depth or HDRI mode changes the range and layout of
//! every pixel sample, so a host must refuse to run image operations unless
//! the probe reports [`ProbeStatus::Compatible`]. Checks run in a fixed order
//! and the first failure is reported:
//!
//! 1. quantum depth (`-1`)
//! 2. default compositing operator (`-2`)
//! 3. default alpha-channel option (`-3`)
//! 4. HDRI mode (`1` on match, `0` otherwise)

use std::fmt;

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::library::LibraryInfo;
use crate::types::{AlphaChannelOption, CompositeOperator};

/// Feature token the library advertises when built with float samples.
const HDRI_FEATURE: &str = "HDRI";

/// Outcome of [`probe`], convertible to the integer code C callers receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ProbeStatus {
    /// The library stores samples at a different bit depth.
    DepthMismatch = -1,
    /// The caller's source compositing operator differs from ours.
    CompositeMismatch = -2,
    /// The caller's "alpha on" option differs from ours.
    AlphaChannelMismatch = -3,
    /// The library's HDRI mode differs from ours.
    HdriMismatch = 0,
    /// Every check passed.
    Compatible = 1,
}

impl ProbeStatus {
    /// Integer code handed across the C boundary.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether image operations may proceed.
    #[must_use]
    pub const fn is_compatible(self) -> bool {
        matches!(self, Self::Compatible)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::DepthMismatch => "quantum depth mismatch",
            Self::CompositeMismatch => "compositing-operator default mismatch",
            Self::AlphaChannelMismatch => "alpha-channel default mismatch",
            Self::HdriMismatch => "HDRI mode mismatch",
            Self::Compatible => "compatible",
        };
        write!(f, "{msg} ({})", self.code())
    }
}

/// Compare the linked library and the caller's constants against `config`.
///
/// `composite` and `alpha` are raw enum values as the caller compiled them;
/// values outside the known enums count as mismatches.
#[must_use]
pub fn probe(
    library: &impl LibraryInfo,
    config: &BuildConfig,
    composite: i32,
    alpha: i32,
) -> ProbeStatus {
    let depth = library.quantum_depth();
    if depth != config.format.depth {
        log::debug!(
            "library quantum depth {depth} does not match expected {}",
            config.format.depth
        );
        return ProbeStatus::DepthMismatch;
    }

    if CompositeOperator::try_from(composite) != Ok(config.composite_default) {
        log::debug!(
            "composite operator {composite} does not match expected {:?}",
            config.composite_default
        );
        return ProbeStatus::CompositeMismatch;
    }

    if AlphaChannelOption::try_from(alpha) != Ok(config.alpha_default) {
        log::debug!(
            "alpha channel option {alpha} does not match expected {:?}",
            config.alpha_default
        );
        return ProbeStatus::AlphaChannelMismatch;
    }

    let has_hdri = library.features().contains(HDRI_FEATURE);
    if has_hdri == config.format.hdri {
        ProbeStatus::Compatible
    } else {
        log::debug!(
            "library HDRI={has_hdri}, expected HDRI={}",
            config.format.hdri
        );
        ProbeStatus::HdriMismatch
    }
}

/// Like [`probe`] with typed constants, failing unless fully compatible.
///
/// # Errors
///
/// Returns [`Error::Incompatible`] carrying the first failed check.
pub fn verify(
    library: &impl LibraryInfo,
    config: &BuildConfig,
    composite: CompositeOperator,
    alpha: AlphaChannelOption,
) -> Result<()> {
    match probe(library, config, composite as i32, alpha as i32) {
        ProbeStatus::Compatible => Ok(()),
        status => Err(Error::Incompatible(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuantumFormat;
    use crate::library::LinkedLibrary;

    struct FakeLibrary {
        depth: u32,
        features: &'static str,
    }

    impl LibraryInfo for FakeLibrary {
        fn quantum_depth(&self) -> u32 {
            self.depth
        }

        fn features(&self) -> String {
            self.features.to_string()
        }
    }

    const SRC: i32 = CompositeOperator::Src as i32;
    const ON: i32 = AlphaChannelOption::On as i32;

    fn config(format: QuantumFormat) -> BuildConfig {
        BuildConfig {
            format,
            ..BuildConfig::compiled()
        }
    }

    #[test]
    fn depth_mismatch_wins_over_everything() {
        let lib = FakeLibrary {
            depth: 8,
            features: "PNG",
        };
        // Every other check would also fail here.
        let status = probe(&lib, &config(QuantumFormat::Q16_HDRI), -7, -7);
        assert_eq!(status, ProbeStatus::DepthMismatch);
        assert_eq!(status.code(), -1);
    }

    #[test]
    fn composite_mismatch_checked_before_alpha() {
        let lib = FakeLibrary {
            depth: 16,
            features: "PNG",
        };
        let status = probe(
            &lib,
            &config(QuantumFormat::Q16),
            CompositeOperator::Over as i32,
            -7,
        );
        assert_eq!(status.code(), -2);
    }

    #[test]
    fn unknown_composite_value_is_a_mismatch() {
        let lib = FakeLibrary {
            depth: 16,
            features: "PNG",
        };
        let status = probe(&lib, &config(QuantumFormat::Q16), 9999, ON);
        assert_eq!(status, ProbeStatus::CompositeMismatch);
    }

    #[test]
    fn alpha_mismatch() {
        let lib = FakeLibrary {
            depth: 16,
            features: "PNG",
        };
        let status = probe(
            &lib,
            &config(QuantumFormat::Q16),
            SRC,
            AlphaChannelOption::Off as i32,
        );
        assert_eq!(status.code(), -3);
    }

    #[test]
    fn hdri_required_and_present() {
        let lib = FakeLibrary {
            depth: 16,
            features: "Cipher DPC HDRI OpenMP",
        };
        assert_eq!(
            probe(&lib, &config(QuantumFormat::Q16_HDRI), SRC, ON).code(),
            1
        );
    }

    #[test]
    fn hdri_required_but_absent() {
        let lib = FakeLibrary {
            depth: 16,
            features: "Cipher DPC OpenMP",
        };
        assert_eq!(
            probe(&lib, &config(QuantumFormat::Q16_HDRI), SRC, ON).code(),
            0
        );
    }

    #[test]
    fn hdri_forbidden_but_present() {
        let lib = FakeLibrary {
            depth: 8,
            features: "HDRI",
        };
        assert_eq!(
            probe(&lib, &config(QuantumFormat::Q8), SRC, ON),
            ProbeStatus::HdriMismatch
        );
    }

    #[test]
    fn hdri_forbidden_and_absent() {
        let lib = FakeLibrary {
            depth: 8,
            features: "",
        };
        assert!(probe(&lib, &config(QuantumFormat::Q8), SRC, ON).is_compatible());
    }

    #[test]
    fn linked_library_matches_compiled_config() {
        assert_eq!(
            probe(&LinkedLibrary, &BuildConfig::compiled(), SRC, ON),
            ProbeStatus::Compatible
        );
    }

    #[test]
    fn verify_surfaces_first_failure() {
        let lib = FakeLibrary {
            depth: 16,
            features: "",
        };
        let err = verify(
            &lib,
            &config(QuantumFormat::Q16),
            CompositeOperator::Src,
            AlphaChannelOption::Set,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Incompatible(ProbeStatus::AlphaChannelMismatch)
        ));

        assert!(verify(
            &lib,
            &config(QuantumFormat::Q16),
            CompositeOperator::Src,
            AlphaChannelOption::On,
        )
        .is_ok());
    }
}
