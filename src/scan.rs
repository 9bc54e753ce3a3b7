//! Search for non-transparent pixels.
//!
//! Rows are visited top to bottom and pixels left to right, so results come
//! out in row-major order. The output buffer always keeps one slot in
//! reserve: a buffer of `n` entries receives at most `n - 1` coordinates.

use std::ops::ControlFlow;

use crate::config::ScanOptions;
use crate::pixels::{Image, RowCursor};
use crate::types::Pixel;

/// Record non-transparent pixels of `image` into `output`.
///
/// Returns the number of entries written, at most `output.len() - 1`.
#[must_use]
pub fn scan(image: &Image, output: &mut [Pixel]) -> usize {
    scan_with(image, output, &ScanOptions::default())
}

/// [`scan`] with an explicit alpha threshold.
#[must_use]
pub fn scan_with(image: &Image, output: &mut [Pixel], opts: &ScanOptions) -> usize {
    if output.len() <= 1 {
        return 0;
    }
    scan_rows(image.pixel_iter(), output, opts.threshold)
}

/// Scan rows handed out by `cursor`, which is dropped before this returns.
#[must_use]
pub fn scan_rows<C: RowCursor>(cursor: C, output: &mut [Pixel], threshold: f64) -> usize {
    let limit = output.len().saturating_sub(1);
    fill(cursor, threshold, limit, |i, pixel| output[i] = pixel)
}

/// Hand at most `limit` matches to `store` along with their index; returns the match count.
pub(crate) fn fill<C, F>(cursor: C, threshold: f64, limit: usize, mut store: F) -> usize
where
    C: RowCursor,
    F: FnMut(usize, Pixel),
{
    let mut count = 0;
    if limit == 0 {
        return count;
    }
    visit(cursor, threshold, |pixel| {
        store(count, pixel);
        count += 1;
        if count >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    log::trace!("found {count} non-transparent pixels (limit {limit})");
    count
}

/// Collect up to `limit` non-transparent pixels into a new vector.
///
/// Unlike [`scan`] no slot is reserved: `limit` entries may be returned.
#[must_use]
pub fn collect(image: &Image, opts: &ScanOptions, limit: usize) -> Vec<Pixel> {
    let mut found = Vec::new();
    if limit == 0 {
        return found;
    }
    visit(image.pixel_iter(), opts.threshold, |pixel| {
        found.push(pixel);
        if found.len() >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

fn visit<C, F>(mut cursor: C, threshold: f64, mut on_pixel: F)
where
    C: RowCursor,
    F: FnMut(Pixel) -> ControlFlow<()>,
{
    let mut y = 0;
    while let Some(row) = cursor.next_row() {
        for x in 0..row.width() {
            if row.alpha(x) > threshold && on_pixel(Pixel::new(x, y)).is_break() {
                return;
            }
        }
        y += 1;
    }
}
