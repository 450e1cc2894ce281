//! Binary morphology regression test
//!
//! Checks dilation, erosion, opening and closing with brick structuring
//! elements on a synthetic text page.
//!
//! Run with:
//! ```
//! cargo test -p pageseg-morph --test binmorph_reg
//! ```

use pageseg_core::{Bitmap, BitmapMut, Box};
use pageseg_morph::{close_brick, dilate_brick, erode_brick, open_brick};
use pageseg_test::{RegParams, synth};

fn contains(outer: &Bitmap, inner: &Bitmap) -> bool {
    inner
        .data()
        .iter()
        .zip(outer.data())
        .all(|(&i, &o)| i == 0 || o != 0)
}

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");
    let page = synth::single_column_page(3).unwrap();
    let bm = &page.image;
    let nglyphs = 3 * 33;

    // Dilation is extensive, erosion anti-extensive
    let dilated = dilate_brick(bm, 7, 5).unwrap();
    let eroded = erode_brick(bm, 7, 5).unwrap();
    rp.compare_values(1.0, contains(&dilated, bm) as u8 as f64, 0.0);
    rp.compare_values(1.0, contains(bm, &eroded) as u8 as f64, 0.0);

    // A glyph-sized brick erodes every glyph to a single pixel
    let cores = erode_brick(bm, 12, 20).unwrap();
    rp.compare_values(nglyphs as f64, cores.count_pixels() as f64, 0.0);

    // Opening keeps glyphs intact for small bricks, removes them for tall ones
    let opened = open_brick(bm, 3, 3).unwrap();
    rp.compare_bitmaps(bm, &opened);
    let opened = open_brick(bm, 1, 30).unwrap();
    rp.compare_values(1.0, opened.is_zero() as u8 as f64, 0.0);

    // Closing across the 6 px glyph gaps merges each line into one bar
    let closed = close_brick(bm, 7, 1).unwrap();
    rp.compare_values(1.0, contains(&closed, bm) as u8 as f64, 0.0);
    let expected = 3 * (688 - 100) * 20;
    rp.compare_values(expected as f64, closed.count_pixels() as f64, 0.0);

    // close == erode(dilate)
    let manual = erode_brick(&dilate_brick(bm, 7, 1).unwrap(), 7, 1).unwrap();
    rp.compare_bitmaps(&closed, &manual);

    rp.write_bitmap(&closed, "closed").unwrap();
    assert!(rp.cleanup(), "binmorph regression test failed");
}

#[test]
fn binmorph_single_pixel_reg() {
    let mut rp = RegParams::new("binmorph_pixel");
    let mut bm = BitmapMut::new(20, 20).unwrap();
    bm.fill_rect(Box::new_unchecked(10, 10, 1, 1), true);
    let bm: Bitmap = bm.into();

    let dilated = dilate_brick(&bm, 5, 3).unwrap();
    rp.compare_values(15.0, dilated.count_pixels() as f64, 0.0);
    let back = erode_brick(&dilated, 5, 3).unwrap();
    rp.compare_bitmaps(&bm, &back);

    assert!(rp.cleanup(), "binmorph single pixel regression test failed");
}
