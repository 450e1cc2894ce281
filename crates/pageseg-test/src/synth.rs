//! Synthetic pages with known line geometry
//!
//! Text is drawn as rows of solid rectangular "glyphs". Every glyph is its
//! own connected component, so the character height of a page is exactly
//! the glyph height, and the ground-truth bounds of each line are known.

use crate::TestResult;
use pageseg_core::{Bitmap, BitmapMut, Box, GrayImage};

/// Width of a page in pixels
pub const PAGE_WIDTH: u32 = 800;
/// Height of a page in pixels
pub const PAGE_HEIGHT: u32 = 1000;
/// Glyph width of the regular pages
pub const GLYPH_WIDTH: u32 = 12;
/// Glyph height of the regular pages (the expected scale)
pub const GLYPH_HEIGHT: u32 = 20;
/// Horizontal distance between glyph origins
pub const GLYPH_ADVANCE: u32 = 18;
/// Vertical distance between line tops
pub const LINE_PITCH: u32 = 40;
/// Top of the first line
pub const FIRST_LINE_TOP: u32 = 200;

/// A page image together with the bounds of the lines drawn on it
#[derive(Debug, Clone)]
pub struct SynthPage {
    /// The page, 1 = ink
    pub image: Bitmap,
    /// Line bounds in reading order (column by column, top to bottom)
    pub lines: Vec<Box>,
}

/// Glyph geometry of one text line
#[derive(Debug, Clone, Copy)]
pub struct GlyphStyle {
    pub width: u32,
    pub height: u32,
    pub advance: u32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
            advance: GLYPH_ADVANCE,
        }
    }
}

/// Draw glyphs from `x0` while they fit before `x1`, with their tops at `top`.
///
/// Returns the bounds of the drawn line, or `None` if no glyph fits.
pub fn draw_text_line(
    page: &mut BitmapMut,
    x0: u32,
    x1: u32,
    top: u32,
    style: GlyphStyle,
) -> Option<Box> {
    let mut bounds: Option<Box> = None;
    let mut x = x0;
    while x + style.width <= x1 {
        let glyph = Box::new_unchecked(
            x as i32,
            top as i32,
            style.width as i32,
            style.height as i32,
        );
        page.fill_rect(glyph, true);
        bounds = Some(bounds.map_or(glyph, |b| b.union(&glyph)));
        x += style.advance;
    }
    bounds
}

fn text_block(
    page: &mut BitmapMut,
    x0: u32,
    x1: u32,
    nlines: usize,
    style: GlyphStyle,
    pitch: u32,
) -> Vec<Box> {
    (0..nlines as u32)
        .filter_map(|i| draw_text_line(page, x0, x1, FIRST_LINE_TOP + i * pitch, style))
        .collect()
}

/// A single column of `nlines` lines spanning x in [100, 700).
pub fn single_column_page(nlines: usize) -> TestResult<SynthPage> {
    let mut page = BitmapMut::new(PAGE_WIDTH, PAGE_HEIGHT)?;
    let lines = text_block(
        &mut page,
        100,
        700,
        nlines,
        GlyphStyle::default(),
        LINE_PITCH,
    );
    Ok(SynthPage {
        image: page.into(),
        lines,
    })
}

/// Two columns of `rows` lines each, separated by a gutter about
/// three glyph heights wide.
///
/// The left column spans x in [50, 370), the right one [430, 750).
pub fn two_column_page(rows: usize) -> TestResult<SynthPage> {
    let mut page = BitmapMut::new(PAGE_WIDTH, PAGE_HEIGHT)?;
    let style = GlyphStyle::default();
    let mut lines = text_block(&mut page, 50, 370, rows, style, LINE_PITCH);
    lines.extend(text_block(&mut page, 430, 750, rows, style, LINE_PITCH));
    Ok(SynthPage {
        image: page.into(),
        lines,
    })
}

/// A single column of `nlines` lines of 6x8 glyphs spanning x in [100, 400).
pub fn tiny_glyph_page(nlines: usize) -> TestResult<SynthPage> {
    let mut page = BitmapMut::new(PAGE_WIDTH, PAGE_HEIGHT)?;
    let style = GlyphStyle {
        width: 6,
        height: 8,
        advance: 10,
    };
    let lines = text_block(&mut page, 100, 400, nlines, style, 16);
    Ok(SynthPage {
        image: page.into(),
        lines,
    })
}

/// Render a bitmap as a grayscale page: ink 0, background 255.
pub fn render_gray(bm: &Bitmap) -> TestResult<GrayImage> {
    let data = bm.data().iter().map(|&v| if v != 0 { 0 } else { 255 }).collect();
    Ok(GrayImage::from_data(bm.width(), bm.height(), data)?)
}
