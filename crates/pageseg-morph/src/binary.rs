//! Binary morphological operations
//!
//! A `width` x `height` brick has its origin at `(width / 2, height / 2)`.
//! Boundary conditions: pixels outside the image are OFF for dilation and
//! ON for erosion, so erosion never eats in from the image border and
//! opening stays anti-extensive.
//!
//! Each 1-D pass counts ink with a prefix sum over the row or column, which
//! makes the cost independent of the brick size.

use crate::{MorphError, MorphResult};
use pageseg_core::{Bitmap, BitmapMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Dilate,
    Erode,
}

/// Dilate a binary image with a `width` x `height` brick
///
/// # Errors
///
/// Returns [`MorphError::InvalidSel`] if either dimension is 0.
pub fn dilate_brick(bm: &Bitmap, width: u32, height: u32) -> MorphResult<Bitmap> {
    brick(bm, width, height, Op::Dilate)
}

/// Erode a binary image with a `width` x `height` brick
pub fn erode_brick(bm: &Bitmap, width: u32, height: u32) -> MorphResult<Bitmap> {
    brick(bm, width, height, Op::Erode)
}

/// Open (erode, then dilate) with a `width` x `height` brick
///
/// Removes every ink structure that cannot contain the brick.
pub fn open_brick(bm: &Bitmap, width: u32, height: u32) -> MorphResult<Bitmap> {
    let eroded = erode_brick(bm, width, height)?;
    dilate_brick(&eroded, width, height)
}

/// Close (dilate, then erode) with a `width` x `height` brick
pub fn close_brick(bm: &Bitmap, width: u32, height: u32) -> MorphResult<Bitmap> {
    let dilated = dilate_brick(bm, width, height)?;
    erode_brick(&dilated, width, height)
}

fn brick(bm: &Bitmap, width: u32, height: u32, op: Op) -> MorphResult<Bitmap> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidSel(format!(
            "brick dimensions must be positive: {}x{}",
            width, height
        )));
    }
    if width == 1 && height == 1 {
        return Ok(bm.clone());
    }

    let (w, h) = bm.dimensions();
    let mut out = bm.to_mut();
    let mut line = Vec::new();
    let mut prefix = Vec::new();

    if width > 1 {
        for y in 0..h {
            line.clear();
            line.extend_from_slice(out.row_mut(y));
            apply_line(&line, width as usize, op, &mut prefix, out.row_mut(y));
        }
    }

    if height > 1 {
        let mut col_out = vec![0u8; h as usize];
        for x in 0..w {
            line.clear();
            line.extend((0..h).map(|y| column_at(&out, x, y)));
            apply_line(&line, height as usize, op, &mut prefix, &mut col_out);
            for (y, &v) in col_out.iter().enumerate() {
                out.set_pixel_unchecked(x, y as u32, v != 0);
            }
        }
    }

    Ok(out.into())
}

#[inline]
fn column_at(bm: &BitmapMut, x: u32, y: u32) -> u8 {
    bm.data()[(y * bm.width() + x) as usize]
}

/// Apply a 1-D dilation or erosion of length `size` to `src`.
fn apply_line(src: &[u8], size: usize, op: Op, prefix: &mut Vec<u32>, dst: &mut [u8]) {
    let n = src.len() as i64;
    prefix.clear();
    prefix.push(0);
    let mut acc = 0u32;
    for &v in src {
        acc += v as u32;
        prefix.push(acc);
    }

    let size = size as i64;
    let c = size / 2;
    for (x, d) in dst.iter_mut().enumerate() {
        let x = x as i64;
        // Dilation reads the reflected brick, erosion the brick itself.
        let (lo, hi) = match op {
            Op::Dilate => (x - (size - 1 - c), x + c),
            Op::Erode => (x - c, x + (size - 1 - c)),
        };
        let lo = lo.max(0) as usize;
        let hi = hi.min(n - 1) as usize;
        let count = prefix[hi + 1] - prefix[lo];
        *d = match op {
            Op::Dilate => (count > 0) as u8,
            Op::Erode => (count as usize == hi - lo + 1) as u8,
        };
    }
}
