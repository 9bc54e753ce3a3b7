//! Decoded images stored at a fixed quantum format, and row cursors over them.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::config::QuantumFormat;
use crate::error::{Error, Result};

/// Channels per stored pixel (RGBA).
const CHANNELS: usize = 4;
/// Index of the alpha sample within a pixel.
const ALPHA: usize = 3;

enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

/// A fully decoded RGBA image.
///
/// Samples are kept at the bit depth of the [`QuantumFormat`] the image was
/// created with, so alpha values read back through [`Row::alpha`] are on that
/// format's native scale (`0..=format.range()`).
pub struct Image {
    width: u32,
    height: u32,
    format: QuantumFormat,
    samples: Samples,
}

impl Image {
    /// Decode an image file and store it at `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the file cannot be read or decoded, or
    /// [`Error::UnsupportedDepth`] for a depth other than 8 or 16.
    pub fn open(path: impl AsRef<Path>, format: QuantumFormat) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("decoding {}", path.display());
        Self::from_dynamic(&image::open(path)?, format)
    }

    /// Convert an already decoded image into `format`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for a depth other than 8 or 16.
    pub fn from_dynamic(img: &DynamicImage, format: QuantumFormat) -> Result<Self> {
        #[allow(clippy::cast_possible_truncation)]
        let samples = match (format.depth, format.hdri) {
            (8 | 16, true) => {
                let scale = format.range() as f32;
                Samples::F32(
                    img.to_rgba32f()
                        .into_raw()
                        .into_iter()
                        .map(|v| v * scale)
                        .collect(),
                )
            }
            (8, false) => Samples::U8(img.to_rgba8().into_raw()),
            (16, false) => Samples::U16(img.to_rgba16().into_raw()),
            (depth, _) => return Err(Error::UnsupportedDepth(depth)),
        };

        Ok(Self {
            width: img.width(),
            height: img.height(),
            format,
            samples,
        })
    }

    /// Build an image from tightly packed 8-bit RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        data: Vec<u8>,
        format: QuantumFormat,
    ) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS));
        let actual = data.len();
        let size_error = || Error::BufferSize {
            width,
            height,
            expected: expected.unwrap_or(usize::MAX),
            actual,
        };
        if expected != Some(actual) {
            return Err(size_error());
        }

        let buffer = RgbaImage::from_raw(width, height, data).ok_or_else(size_error)?;
        Self::from_dynamic(&DynamicImage::ImageRgba8(buffer), format)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format the samples are stored in.
    #[must_use]
    pub fn format(&self) -> QuantumFormat {
        self.format
    }

    /// Start a row cursor at the top of the image.
    #[must_use]
    pub fn pixel_iter(&self) -> PixelIterator<'_> {
        PixelIterator { image: self, y: 0 }
    }

    fn row(&self, y: u32) -> Row<'_> {
        let stride = self.width as usize * CHANNELS;
        let range = y as usize * stride..(y as usize + 1) * stride;
        match &self.samples {
            Samples::U8(s) => Row::U8(&s[range]),
            Samples::U16(s) => Row::U16(&s[range]),
            Samples::F32(s) => Row::F32(&s[range]),
        }
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// One row of RGBA samples.
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    /// 8-bit integer samples.
    U8(&'a [u8]),
    /// 16-bit integer samples.
    U16(&'a [u16]),
    /// Float samples on the quantum scale.
    F32(&'a [f32]),
}

impl Row<'_> {
    /// Number of pixels in the row.
    #[must_use]
    pub fn width(&self) -> usize {
        let len = match self {
            Row::U8(s) => s.len(),
            Row::U16(s) => s.len(),
            Row::F32(s) => s.len(),
        };
        len / CHANNELS
    }

    /// Alpha sample of pixel `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.width()`.
    #[must_use]
    pub fn alpha(&self, x: usize) -> f64 {
        let i = x * CHANNELS + ALPHA;
        match self {
            Row::U8(s) => f64::from(s[i]),
            Row::U16(s) => f64::from(s[i]),
            Row::F32(s) => f64::from(s[i]),
        }
    }
}

/// A cursor handing out rows from top to bottom.
pub trait RowCursor {
    /// The next row, or `None` once every row has been visited.
    fn next_row(&mut self) -> Option<Row<'_>>;
}

/// Row cursor over an [`Image`]; borrowing the image keeps it alive and
/// unmodified until the cursor is dropped.
#[derive(Debug)]
pub struct PixelIterator<'a> {
    image: &'a Image,
    y: u32,
}

impl RowCursor for PixelIterator<'_> {
    fn next_row(&mut self) -> Option<Row<'_>> {
        if self.y >= self.image.height {
            return None;
        }
        let row = self.image.row(self.y);
        self.y += 1;
        Some(row)
    }
}
