//! pageseg-io - Image I/O for page segmentation
//!
//! Reads page images (binarized on load) and optional grayscale
//! companions, and writes line bitmaps, grayscale line crops and RGB
//! label maps. PNG is the only format.
//!
//! The generic functions in [`png`] work on any reader/writer; the
//! functions below are path-based conveniences.

mod error;
pub mod png;

pub use crate::png::{
    binarize, read_bitmap_png, read_gray_png, read_label_png, read_page_png, write_bitmap_png,
    write_gray_png, write_label_png,
};
pub use error::{IoError, IoResult};

use pageseg_core::{Bitmap, GrayImage, LabelMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read and binarize a page image.
pub fn read_bitmap<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    read_bitmap_png(BufReader::new(File::open(path)?))
}

/// Read and binarize a page image, with whether it was a color image.
pub fn read_page<P: AsRef<Path>>(path: P) -> IoResult<(Bitmap, bool)> {
    read_page_png(BufReader::new(File::open(path)?))
}

/// Read a grayscale image.
pub fn read_gray<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    read_gray_png(BufReader::new(File::open(path)?))
}

/// Read an RGB label image.
pub fn read_label_map<P: AsRef<Path>>(path: P) -> IoResult<LabelMap> {
    read_label_png(BufReader::new(File::open(path)?))
}

/// Write a bitmap as black-on-white 1-bit PNG.
pub fn write_bitmap<P: AsRef<Path>>(bm: &Bitmap, path: P) -> IoResult<()> {
    write_bitmap_png(bm, BufWriter::new(File::create(path)?))
}

/// Write an 8-bit grayscale PNG.
pub fn write_gray<P: AsRef<Path>>(img: &GrayImage, path: P) -> IoResult<()> {
    write_gray_png(img, BufWriter::new(File::create(path)?))
}

/// Write a label map as 24-bit RGB PNG.
pub fn write_label_map<P: AsRef<Path>>(labels: &LabelMap, path: P) -> IoResult<()> {
    write_label_png(labels, BufWriter::new(File::create(path)?))
}
