//! Line export
//!
//! Writes the result of [`segment_page`](crate::segment_page) the way
//! line recognizers expect it:
//!
//! ```text
//! <outdir>.pseg.png        RGB label map, 0x010000 + label per line pixel
//! <outdir>/010001.bin.png  line crops, black ink on white
//! <outdir>/010001.nrm.png  grayscale line crops (with a gray page)
//! ```
//!
//! Every file is encoded in memory first, then written into a staging
//! directory `<outdir>.partial` next to `outdir`. Only when every write
//! succeeded is the staging directory renamed to `outdir`, replacing an
//! earlier export of the page. A failed export removes what it staged, so
//! a page's line crops either all exist or none do.

use crate::options::ExportOptions;
use crate::pipeline::PageSegmentation;
use crate::{LayoutError, LayoutResult};
use pageseg_core::{Bitmap, Box, GrayImage, LabelMap};
use pageseg_filter::maximum_filter_bitmap;
use pageseg_io::{write_bitmap_png, write_gray_png, write_label_png};
use pageseg_region::{ConnectivityType, remove_small_components};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the label map inside the staging directory
const STAGED_LABELS: &str = "labels.pseg.png";

/// Label map value of background pixels
pub const BACKGROUND_ID: u32 = 0xff_ffff;

/// Exported id of the line with `label`
pub fn line_id(label: u32) -> u32 {
    0x01_0000 + label
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

/// Output directory for a page image: `book/0001.bin.png` gives `book/0001`.
pub fn output_dir_for(input: &Path) -> PathBuf {
    if let Some(name) = input.file_name().and_then(|n| n.to_str())
        && let Some(stem) = name.strip_suffix(".bin.png")
    {
        return input.with_file_name(stem);
    }
    input.with_extension("")
}

/// Grayscale companion of a page image: `book/0001.bin.png` gives
/// `book/0001.nrm.png`.
pub fn gray_path_for(input: &Path) -> PathBuf {
    with_suffix(&output_dir_for(input), ".nrm.png")
}

fn encode_labels(segmentation: &LabelMap) -> LayoutResult<Vec<u8>> {
    let ids: Vec<u32> = segmentation
        .data()
        .iter()
        .map(|&l| if l == 0 { BACKGROUND_ID } else { line_id(l) })
        .collect();
    let (w, h) = segmentation.dimensions();
    let mut buf = Vec::new();
    write_label_png(&LabelMap::from_data(w, h, ids)?, &mut buf)?;
    Ok(buf)
}

/// Line mask over the padded crop, dilated by `expand`
fn crop_mask(mask: &Bitmap, pad: i32, expand: u32) -> LayoutResult<Bitmap> {
    let (w, h) = (mask.width() as i32, mask.height() as i32);
    let padded = mask.crop(Box::new_unchecked(-pad, -pad, w + 2 * pad, h + 2 * pad), false)?;
    if expand > 1 {
        Ok(maximum_filter_bitmap(&padded, expand, expand)?)
    } else {
        Ok(padded)
    }
}

/// Gray crop with everything outside `mask` set to the crop's maximum
fn mask_gray(gray: &GrayImage, b: Box, mask: &Bitmap) -> LayoutResult<GrayImage> {
    let crop = gray.crop(b, 255)?;
    let max = crop.data().iter().copied().max().unwrap_or(255);
    let data = crop
        .data()
        .iter()
        .zip(mask.data())
        .map(|(&v, &m)| if m != 0 { v } else { max })
        .collect();
    Ok(GrayImage::from_data(crop.width(), crop.height(), data)?)
}

/// Write the lines of `result` under `outdir`
///
/// `binary` is the page the segmentation was computed from (1 = ink).
/// With `gray`, grayscale crops are written next to the binary ones.
/// Returns the number of lines written.
pub fn export_page(
    result: &PageSegmentation,
    binary: &Bitmap,
    gray: Option<&GrayImage>,
    outdir: &Path,
    options: &ExportOptions,
) -> LayoutResult<usize> {
    if binary.dimensions() != result.segmentation.dimensions() {
        return Err(LayoutError::InvalidParameter(format!(
            "page is {:?} but the segmentation is {:?}",
            binary.dimensions(),
            result.segmentation.dimensions()
        )));
    }
    if let Some(g) = gray
        && g.dimensions() != binary.dimensions()
    {
        return Err(LayoutError::InvalidParameter(format!(
            "gray page is {:?} but the page is {:?}",
            g.dimensions(),
            binary.dimensions()
        )));
    }

    let (cleaned, removed) =
        remove_small_components(binary, ConnectivityType::FourWay, options.noise)?;
    if removed > 0 {
        log::debug!("export: removed {} noise pixels", removed);
    }

    let pad = options.pad as i32;
    let labels = encode_labels(&result.segmentation)?;
    let mut crops: Vec<(String, Vec<u8>)> = Vec::with_capacity(2 * result.lines.len());
    for line in &result.lines {
        let id = line_id(line.label);
        let padded = line.bounds.expand(pad);
        let mask = crop_mask(&line.mask, pad, options.expand)?;

        let ink = cleaned.crop(padded, false)?.and(&mask)?;
        let mut buf = Vec::new();
        write_bitmap_png(&ink, &mut buf)?;
        crops.push((format!("{:06x}.bin.png", id), buf));

        if let Some(g) = gray {
            let mut buf = Vec::new();
            write_gray_png(&mask_gray(g, padded, &mask)?, &mut buf)?;
            crops.push((format!("{:06x}.nrm.png", id), buf));
        }
    }

    commit(outdir, &labels, &crops)?;
    log::debug!(
        "export: {} lines to {}",
        result.lines.len(),
        outdir.display()
    );
    Ok(result.lines.len())
}

fn io_error(e: io::Error) -> LayoutError {
    pageseg_io::IoError::from(e).into()
}

fn write_staged(staging: &Path, labels: &[u8], crops: &[(String, Vec<u8>)]) -> io::Result<()> {
    fs::create_dir(staging)?;
    fs::write(staging.join(STAGED_LABELS), labels)?;
    for (name, buf) in crops {
        fs::write(staging.join(name), buf)?;
    }
    Ok(())
}

/// Write `crops` to `outdir` and `labels` to `<outdir>.pseg.png`, all or
/// nothing
fn commit(outdir: &Path, labels: &[u8], crops: &[(String, Vec<u8>)]) -> LayoutResult<()> {
    if let Some(parent) = outdir.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let staging = with_suffix(outdir, ".partial");
    if staging.exists() {
        log::debug!("export: removing stale {}", staging.display());
        fs::remove_dir_all(&staging).map_err(io_error)?;
    }
    if let Err(e) = write_staged(&staging, labels, crops) {
        let _ = fs::remove_dir_all(&staging);
        return Err(io_error(e));
    }

    let pseg = with_suffix(outdir, ".pseg.png");
    let moved = fs::rename(staging.join(STAGED_LABELS), &pseg).and_then(|()| {
        if outdir.is_dir() {
            fs::remove_dir_all(outdir)?;
        }
        fs::rename(&staging, outdir)
    });
    if let Err(e) = moved {
        let _ = fs::remove_dir_all(&staging);
        let _ = fs::remove_file(&pseg);
        return Err(io_error(e));
    }
    Ok(())
}
