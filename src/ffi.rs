//! C entry points.
//!
//! Only primitive integers, opaque [`Image`] handles and caller-owned
//! [`Pixel`] buffers cross this boundary. Failures come back as null handles
//! or zero counts; nothing here panics into the caller.

use std::ffi::{c_char, c_int, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use crate::config::{BuildConfig, QuantumFormat, ALPHA_THRESHOLD};
use crate::library::LinkedLibrary;
use crate::pixels::Image;
use crate::probe::probe;
use crate::scan;
use crate::types::Pixel;

/// Run `f`, turning a panic into `fallback`.
fn guard<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        log::error!("panic caught at the C boundary");
        fallback
    })
}

fn into_handle(result: crate::Result<Image>) -> *mut Image {
    match result {
        Ok(image) => Box::into_raw(Box::new(image)),
        Err(e) => {
            log::debug!("image creation failed: {e}");
            ptr::null_mut()
        }
    }
}

/// Check the linked image library against this binary's build configuration.
///
/// `composite` and `alpha` are the caller's values for the source compositing
/// operator and the "alpha on" channel option. Returns `-1` on a quantum depth
/// mismatch, `-2` or `-3` when the caller's constants differ from ours, and
/// otherwise `1` if the HDRI modes agree or `0` if they do not. Anything but
/// `1` means image operations must not be used.
///
/// The linked library reports the same depth and HDRI mode this binary was
/// compiled with, so `-1` and `0` cannot come back from this entry point; it
/// only catches mismatched caller constants. Depth and HDRI mismatches surface
/// through [`probe`] with a custom [`LibraryInfo`](crate::LibraryInfo).
#[no_mangle]
pub extern "C" fn screenshot_verify_image_library(composite: c_int, alpha: c_int) -> c_int {
    probe(&LinkedLibrary, &BuildConfig::compiled(), composite, alpha).code()
}

/// Write coordinates of pixels with alpha above 100 into `output`.
///
/// At most `max - 1` entries are written, in row-major order; the count is
/// returned. Null pointers and `max == 0` yield 0.
///
/// # Safety
///
/// `image` must be null or a live handle from this library, and `output` must
/// be null or valid for writes of `max` consecutive [`Pixel`] values.
#[no_mangle]
pub unsafe extern "C" fn screenshot_find_non_transparent_pixels(
    image: *const Image,
    output: *mut Pixel,
    max: usize,
) -> usize {
    if image.is_null() || output.is_null() || max == 0 {
        return 0;
    }
    // SAFETY: non-null and owned by the caller for the duration of this call.
    let image = unsafe { &*image };
    guard(0, || {
        scan::fill(image.pixel_iter(), ALPHA_THRESHOLD, max - 1, |i, pixel| {
            // SAFETY: `fill` hands out indices below `max - 1`.
            unsafe { output.add(i).write(pixel) };
        })
    })
}

/// Decode the image file at `path`; null on failure.
///
/// The handle must be released with [`screenshot_image_destroy`].
///
/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn screenshot_image_read(path: *const c_char) -> *mut Image {
    if path.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: caller guarantees a valid C string.
    let Ok(path) = unsafe { CStr::from_ptr(path) }.to_str() else {
        log::debug!("image path is not valid UTF-8");
        return ptr::null_mut();
    };
    guard(ptr::null_mut(), || {
        into_handle(Image::open(path, QuantumFormat::COMPILED))
    })
}

/// Wrap `len` bytes of packed 8-bit RGBA data; null on failure.
///
/// The bytes are copied, so `data` may be freed once this returns.
///
/// # Safety
///
/// `data` must be null or valid for reads of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn screenshot_image_from_rgba8(
    width: u32,
    height: u32,
    data: *const u8,
    len: usize,
) -> *mut Image {
    if data.is_null() {
        return ptr::null_mut();
    }
    // SAFETY: caller guarantees `len` readable bytes.
    let bytes = unsafe { std::slice::from_raw_parts(data, len) }.to_vec();
    guard(ptr::null_mut(), || {
        into_handle(Image::from_rgba8(
            width,
            height,
            bytes,
            QuantumFormat::COMPILED,
        ))
    })
}

/// Width of `image` in pixels, 0 for null.
///
/// # Safety
///
/// `image` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn screenshot_image_width(image: *const Image) -> u32 {
    // SAFETY: null or live, per contract.
    unsafe { image.as_ref() }.map_or(0, Image::width)
}

/// Height of `image` in pixels, 0 for null.
///
/// # Safety
///
/// `image` must be null or a live handle from this library.
#[no_mangle]
pub unsafe extern "C" fn screenshot_image_height(image: *const Image) -> u32 {
    // SAFETY: null or live, per contract.
    unsafe { image.as_ref() }.map_or(0, Image::height)
}

/// Release a handle. Null is ignored.
///
/// # Safety
///
/// `image` must be null or a handle from this library not yet destroyed.
#[no_mangle]
pub unsafe extern "C" fn screenshot_image_destroy(image: *mut Image) {
    if !image.is_null() {
        // SAFETY: created by `Box::into_raw` in this module.
        drop(unsafe { Box::from_raw(image) });
    }
}

/// Library version packed as `(major << 24) | (minor << 16) | (patch << 8)`.
#[no_mangle]
pub extern "C" fn screenshot_native_version() -> u32 {
    let major: u32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: u32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    let patch: u32 = env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0);
    (major << 24) | (minor << 16) | (patch << 8)
}
