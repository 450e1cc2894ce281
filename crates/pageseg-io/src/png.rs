//! PNG image format support
//!
//! Pages may arrive in any PNG layout; the decoder expands palettes and
//! low bit depths and strips 16-bit samples, so every image is handled as
//! 8-bit gray, gray+alpha, RGB or RGBA. Outputs are written as 1-bit gray
//! (line bitmaps), 8-bit gray (grayscale crops) or 8-bit RGB (label maps).

use crate::{IoError, IoResult};
use pageseg_core::{Bitmap, GrayImage, LabelMap};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// An 8-bit image straight out of the decoder
struct Decoded {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<Decoded> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth {:?}",
            bit_depth
        )));
    }
    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (width, height) = (info.width, info.height);
    let row_bytes = width as usize * channels;
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let start = y * info.line_size;
        data.extend_from_slice(&buf[start..start + row_bytes]);
    }

    Ok(Decoded {
        width,
        height,
        channels,
        data,
    })
}

impl Decoded {
    /// Gray values, converting color by luminance
    fn to_gray(&self) -> IoResult<GrayImage> {
        let gray = self
            .data
            .chunks_exact(self.channels)
            .map(|px| match self.channels {
                1 | 2 => px[0],
                _ => {
                    let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
                }
            })
            .collect();
        Ok(GrayImage::from_data(self.width, self.height, gray)?)
    }

    /// True when some pixel has unequal color channels. RGB files holding
    /// only grays are not color images.
    fn has_color(&self) -> bool {
        self.channels >= 3
            && self
                .data
                .chunks_exact(self.channels)
                .any(|px| px[0] != px[1] || px[1] != px[2])
    }
}

/// Read a PNG as 8-bit gray, converting color by luminance.
pub fn read_gray_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    decode(reader)?.to_gray()
}

/// Read a PNG page and binarize it.
///
/// See [`binarize`] for the ink rule.
pub fn read_bitmap_png<R: BufRead + Seek>(reader: R) -> IoResult<Bitmap> {
    let gray = read_gray_png(reader)?;
    Ok(binarize(&gray)?)
}

/// Read a PNG page, binarize it and tell whether it was a color image.
pub fn read_page_png<R: BufRead + Seek>(reader: R) -> IoResult<(Bitmap, bool)> {
    let d = decode(reader)?;
    let color = d.has_color();
    Ok((binarize(&d.to_gray()?)?, color))
}

/// Ink is every pixel darker than the midpoint between the darkest and
/// the brightest pixel. A uniform image has no ink.
pub fn binarize(gray: &GrayImage) -> pageseg_core::Result<Bitmap> {
    let lo = gray.data().iter().copied().min().unwrap_or(0) as u32;
    let hi = gray.data().iter().copied().max().unwrap_or(0) as u32;
    let data = gray
        .data()
        .iter()
        .map(|&v| ((v as u32) * 2 < lo + hi) as u8)
        .collect();
    Bitmap::from_data(gray.width(), gray.height(), data)
}

/// Read an RGB label image: each pixel value is `r << 16 | g << 8 | b`.
pub fn read_label_png<R: BufRead + Seek>(reader: R) -> IoResult<LabelMap> {
    let d = decode(reader)?;
    if d.channels < 3 {
        return Err(IoError::UnsupportedFormat(
            "label images must be RGB".to_string(),
        ));
    }
    let labels = d
        .data
        .chunks_exact(d.channels)
        .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
        .collect();
    Ok(LabelMap::from_data(d.width, d.height, labels)?)
}

fn encode<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: ColorType,
    bit_depth: BitDepth,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;
    Ok(())
}

/// Write a bitmap as a 1-bit PNG with black ink on white.
pub fn write_bitmap_png<W: Write>(bm: &Bitmap, writer: W) -> IoResult<()> {
    let (width, height) = bm.dimensions();
    let bytes_per_row = width.div_ceil(8) as usize;
    // Start all white, then clear the ink bits.
    let mut data = vec![0xffu8; bytes_per_row * height as usize];
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        for (x, &v) in bm.row(y).iter().enumerate() {
            if v != 0 {
                data[row_start + x / 8] &= !(1 << (7 - (x % 8)));
            }
        }
    }
    encode(
        writer,
        width,
        height,
        ColorType::Grayscale,
        BitDepth::One,
        &data,
    )
}

/// Write an 8-bit grayscale PNG.
pub fn write_gray_png<W: Write>(img: &GrayImage, writer: W) -> IoResult<()> {
    encode(
        writer,
        img.width(),
        img.height(),
        ColorType::Grayscale,
        BitDepth::Eight,
        img.data(),
    )
}

/// Write labels as 24-bit RGB, one label per pixel.
///
/// Labels above `0xffffff` do not fit and are rejected.
pub fn write_label_png<W: Write>(labels: &LabelMap, writer: W) -> IoResult<()> {
    let mut data = Vec::with_capacity(labels.data().len() * 3);
    for &l in labels.data() {
        if l > 0xff_ffff {
            return Err(IoError::EncodeError(format!(
                "label {:#x} does not fit in 24 bits",
                l
            )));
        }
        data.extend_from_slice(&[(l >> 16) as u8, (l >> 8) as u8, l as u8]);
    }
    encode(
        writer,
        labels.width(),
        labels.height(),
        ColorType::Rgb,
        BitDepth::Eight,
        &data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bitmap_roundtrip() {
        let bm = Bitmap::from_fn(13, 5, |x, y| (x + y) % 3 == 0).unwrap();
        let mut buffer = Vec::new();
        write_bitmap_png(&bm, &mut buffer).unwrap();
        let bm2 = read_bitmap_png(Cursor::new(buffer)).unwrap();
        assert_eq!(bm2, bm);
    }

    #[test]
    fn test_gray_roundtrip() {
        let data: Vec<u8> = (0..40).map(|v| (v * 6) as u8).collect();
        let img = GrayImage::from_data(8, 5, data).unwrap();
        let mut buffer = Vec::new();
        write_gray_png(&img, &mut buffer).unwrap();
        let img2 = read_gray_png(Cursor::new(buffer)).unwrap();
        assert_eq!(img2, img);
    }

    #[test]
    fn test_label_roundtrip() {
        let labels = LabelMap::from_data(3, 1, vec![0xffffff, 0x010001, 0x010203]).unwrap();
        let mut buffer = Vec::new();
        write_label_png(&labels, &mut buffer).unwrap();
        let back = read_label_png(Cursor::new(buffer)).unwrap();
        assert_eq!(back, labels);
    }

    #[test]
    fn test_label_overflow_rejected() {
        let labels = LabelMap::from_data(1, 1, vec![0x1000000]).unwrap();
        assert!(write_label_png(&labels, Vec::new()).is_err());
    }

    #[test]
    fn test_binarize_midpoint() {
        let img = GrayImage::from_data(4, 1, vec![0, 127, 128, 255]).unwrap();
        assert_eq!(binarize(&img).unwrap().data(), &[1, 1, 0, 0]);
        let flat = GrayImage::new_with_value(2, 2, 200).unwrap();
        assert!(binarize(&flat).unwrap().is_zero());
    }
}
