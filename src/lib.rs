//! Native bridge for a screenshot-comparison host.
//!
//! Two routines are exposed, both to Rust and over a C ABI (see [`ffi`]):
//!
//! - a **compatibility probe** that checks the linked image library was built
//!   with the quantum depth, default enum values and HDRI mode this binary
//!   expects, and
//! - a **non-transparent pixel scan** that walks a decoded image in row-major
//!   order and records every pixel whose alpha exceeds 100 on the native
//!   quantum scale, into a caller-owned buffer with one slot held in reserve.
//!
//! # Quick Start
//!
//! ```no_run
//! use screenshot_native::{probe, scan, BuildConfig, Image, LinkedLibrary, Pixel, QuantumFormat};
//! use screenshot_native::{AlphaChannelOption, CompositeOperator};
//!
//! probe::verify(
//!     &LinkedLibrary,
//!     &BuildConfig::compiled(),
//!     CompositeOperator::Src,
//!     AlphaChannelOption::On,
//! )
//! .expect("incompatible image library");
//!
//! let img = Image::open("screenshot.png", QuantumFormat::COMPILED).unwrap();
//! let mut found = vec![Pixel::default(); 1024];
//! let n = scan::scan(&img, &mut found);
//! for p in &found[..n] {
//!     println!("{},{}", p.x, p.y);
//! }
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod ffi;
mod library;
mod pixels;
pub mod probe;
pub mod scan;
mod types;

pub use config::{BuildConfig, QuantumFormat, ScanOptions, ALPHA_THRESHOLD};
pub use error::{Error, Result};
pub use library::{LibraryInfo, LinkedLibrary};
pub use pixels::{Image, PixelIterator, Row, RowCursor};
pub use probe::ProbeStatus;
pub use types::{AlphaChannelOption, CompositeOperator, Pixel};
