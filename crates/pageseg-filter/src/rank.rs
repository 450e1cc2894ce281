//! Running maximum filter
//!
//! A window of length `n` centered at `i` covers `[i - n/2, i + n - 1 - n/2]`,
//! clipped to the line. Each 1-D pass keeps a monotonic deque of candidate
//! indices, so the cost is linear in the line length.

use crate::convolve::{Axis, map_lines};
use crate::{FilterError, FilterResult};
use pageseg_core::{Bitmap, BitmapMut, FPix};
use std::collections::VecDeque;

/// Maximum of `f` over a `size_x` x `size_y` window
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if either size is 0.
pub fn maximum_filter(f: &FPix, size_x: u32, size_y: u32) -> FilterResult<FPix> {
    check_sizes(size_x, size_y)?;
    let mut out = f.clone();
    let mut deque = VecDeque::new();
    if size_x > 1 {
        out = map_lines(&out, Axis::X, |src, dst| {
            running_max(src, size_x as usize, &mut deque, dst)
        });
    }
    if size_y > 1 {
        out = map_lines(&out, Axis::Y, |src, dst| {
            running_max(src, size_y as usize, &mut deque, dst)
        });
    }
    Ok(out)
}

/// Maximum filter of a binary image (a brick dilation with the window
/// alignment of [`maximum_filter`]).
pub fn maximum_filter_bitmap(bm: &Bitmap, size_x: u32, size_y: u32) -> FilterResult<Bitmap> {
    check_sizes(size_x, size_y)?;
    let (w, h) = bm.dimensions();
    let mut out: BitmapMut = bm.to_mut();
    let mut deque = VecDeque::new();

    if size_x > 1 {
        let mut row = vec![0u8; w as usize];
        for y in 0..h {
            row.copy_from_slice(out.row_mut(y));
            running_max(&row, size_x as usize, &mut deque, out.row_mut(y));
        }
    }
    if size_y > 1 {
        let mut col = vec![0u8; h as usize];
        let mut res = vec![0u8; h as usize];
        for x in 0..w {
            for (y, v) in col.iter_mut().enumerate() {
                *v = out.data()[y * w as usize + x as usize];
            }
            running_max(&col, size_y as usize, &mut deque, &mut res);
            for (y, &v) in res.iter().enumerate() {
                out.set_pixel_unchecked(x, y as u32, v != 0);
            }
        }
    }
    Ok(out.into())
}

fn check_sizes(size_x: u32, size_y: u32) -> FilterResult<()> {
    if size_x == 0 || size_y == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window sizes must be positive: {}x{}",
            size_x, size_y
        )));
    }
    Ok(())
}

fn running_max<T: Copy + PartialOrd>(
    src: &[T],
    size: usize,
    deque: &mut VecDeque<usize>,
    dst: &mut [T],
) {
    let n = src.len();
    let before = size / 2;
    let after = size - 1 - before;
    deque.clear();

    // `next` is the first index not yet pushed.
    let mut next = 0usize;
    for (i, d) in dst.iter_mut().enumerate() {
        let hi = (i + after).min(n - 1);
        while next <= hi {
            while let Some(&back) = deque.back()
                && src[back] <= src[next]
            {
                deque.pop_back();
            }
            deque.push_back(next);
            next += 1;
        }
        let lo = i.saturating_sub(before);
        while let Some(&front) = deque.front()
            && front < lo
        {
            deque.pop_front();
        }
        if let Some(&front) = deque.front() {
            *d = src[front];
        }
    }
}
