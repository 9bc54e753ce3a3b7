//! Build information about the linked image library.

use image::ImageFormat;

use crate::config::QuantumFormat;

/// Build-time facts the compatibility probe queries from an image library.
pub trait LibraryInfo {
    /// Bits per channel sample the library stores pixels with.
    fn quantum_depth(&self) -> u32;

    /// Space-separated list of compiled-in features, e.g. `"PNG JPEG HDRI"`.
    fn features(&self) -> String;
}

/// The image library this crate is linked against.
///
/// Samples are converted to [`QuantumFormat::COMPILED`] on load, so this
/// always agrees with [`BuildConfig::compiled()`](crate::BuildConfig::compiled)
/// on depth and HDRI mode and can never trip those two checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedLibrary;

impl LinkedLibrary {
    /// Sample format pixels are converted to when loaded.
    #[must_use]
    pub const fn format(self) -> QuantumFormat {
        QuantumFormat::COMPILED
    }
}

impl LibraryInfo for LinkedLibrary {
    fn quantum_depth(&self) -> u32 {
        self.format().depth
    }

    fn features(&self) -> String {
        let mut features: Vec<String> = ImageFormat::all()
            .filter(|f| f.reading_enabled())
            .map(|f| format!("{f:?}").to_uppercase())
            .collect();
        if self.format().hdri {
            features.push("HDRI".to_string());
        }
        features.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_matches_compiled_format() {
        assert_eq!(LinkedLibrary.quantum_depth(), QuantumFormat::COMPILED.depth);
    }

    #[test]
    fn features_list_hdri_only_when_enabled() {
        let features = LinkedLibrary.features();
        assert_eq!(features.contains("HDRI"), cfg!(feature = "hdri"));
    }

    #[test]
    fn features_include_png_decoder() {
        assert!(LinkedLibrary.features().split(' ').any(|f| f == "PNG"));
    }
}
