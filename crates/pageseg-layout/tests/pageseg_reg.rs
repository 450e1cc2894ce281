//! Page segmentation regression test
//!
//! Segments synthetic pages with known line geometry and checks the
//! invariants every segmentation must satisfy, then exports the lines.
//!
//! Run with:
//! ```
//! cargo test -p pageseg-layout --test pageseg_reg
//! ```

use pageseg_core::{Bitmap, BitmapMut, Box, LabelMap};
use pageseg_layout::spread::spread_labels;
use pageseg_layout::{
    ColumnOptions, ExportOptions, LayoutError, LineOptions, OrderMode, OrderOptions, PageOptions,
    PageSegmentation, export_page, extract_lines, line_id, segment_page,
};
use pageseg_region::get_component_bounds;
use pageseg_test::{RegParams, synth};

/// Ink pixels that carry a line label but are not ink of `ink`
fn labels_off_ink(seg: &PageSegmentation, ink: &Bitmap) -> usize {
    seg.segmentation
        .data()
        .iter()
        .zip(ink.data())
        .filter(|&(&l, &v)| l != 0 && v == 0)
        .count()
}

/// Ink pixels of the working binary without a label
fn unlabeled_ink(seg: &PageSegmentation) -> usize {
    seg.segmentation
        .data()
        .iter()
        .zip(seg.binary.data())
        .filter(|&(&l, &v)| l == 0 && v != 0)
        .count()
}

/// Column mask pixels that carry a line label
fn labeled_separators(seg: &PageSegmentation) -> usize {
    seg.segmentation
        .data()
        .iter()
        .zip(seg.column_mask.data())
        .filter(|&(&l, &m)| l != 0 && m != 0)
        .count()
}

/// Checks shared by every segmentation
fn check_invariants(rp: &mut RegParams, seg: &PageSegmentation, page: &Bitmap) {
    rp.compare_values(0.0, labels_off_ink(seg, &seg.binary) as f64, 0.0);
    rp.compare_values(0.0, labels_off_ink(seg, page) as f64, 0.0);
    rp.compare_values(0.0, labeled_separators(seg) as f64, 0.0);
    rp.compare_values(seg.noise as f64, unlabeled_ink(seg) as f64, 0.0);

    // Labels are 1..=n in reading order and every line has pixels
    for (rank, line) in seg.lines.iter().enumerate() {
        rp.compare_values((rank + 1) as f64, line.label as f64, 0.0);
        rp.compare_values(1.0, (line.pixel_count > 0) as u8 as f64, 0.0);
        rp.compare_values(
            line.pixel_count as f64,
            line.mask.count_pixels() as f64,
            0.0,
        );
    }
    rp.compare_values(
        seg.lines.len() as f64,
        seg.segmentation.max_label() as f64,
        0.0,
    );

    // Bounds re-derived from the renumbered segmentation
    let bounds = get_component_bounds(&seg.segmentation, seg.segmentation.max_label());
    let same = seg
        .lines
        .iter()
        .zip(&bounds)
        .all(|(line, b)| *b == Some(line.bounds));
    rp.compare_values(1.0, same as u8 as f64, 0.0);
}

#[test]
fn pageseg_single_column_reg() {
    let mut rp = RegParams::new("pageseg_single_column");
    let page = synth::single_column_page(3).unwrap();
    let seg = segment_page(&page.image, &PageOptions::default()).unwrap();

    rp.compare_values(synth::GLYPH_HEIGHT as f64, seg.scale as f64, 0.0);
    rp.compare_values(3.0, seg.lines.len() as f64, 0.0);
    for (line, expected) in seg.lines.iter().zip(&page.lines) {
        rp.compare_values(1.0, (line.bounds == *expected) as u8 as f64, 0.0);
    }
    // Top to bottom
    let tops: Vec<i32> = seg.lines.iter().map(|l| l.bounds.y).collect();
    rp.compare_values(1.0, tops.windows(2).all(|w| w[0] < w[1]) as u8 as f64, 0.0);
    check_invariants(&mut rp, &seg, &page.image);

    // Both reading orders agree on a single column
    let opts = PageOptions::default().with_order(OrderOptions::default().with_mode(OrderMode::Columns));
    let cols = segment_page(&page.image, &opts).unwrap();
    rp.compare_label_maps(&seg.segmentation, &cols.segmentation);

    assert!(rp.cleanup(), "pageseg single column regression test failed");
}

#[test]
fn pageseg_two_columns_reg() {
    let mut rp = RegParams::new("pageseg_two_columns");
    let page = synth::two_column_page(10).unwrap();
    let seg = segment_page(&page.image, &PageOptions::default()).unwrap();
    rp.write_bitmap(&seg.column_mask, "colmask").unwrap();

    // The gutter is marked
    let gutter = Box::from_extents(370, 200, 430, 580);
    let marked = seg.column_mask.crop(gutter, false).unwrap().count_pixels();
    rp.compare_values(1.0, (marked > 0) as u8 as f64, 0.0);

    // No line crosses the gutter
    let crossing = seg
        .lines
        .iter()
        .filter(|l| l.bounds.x < 370 && l.bounds.right() > 430)
        .count();
    rp.compare_values(0.0, crossing as f64, 0.0);
    rp.compare_values(20.0, seg.lines.len() as f64, 0.0);

    // Left lines precede the right lines they share rows with
    let mut violations = 0;
    for (i, left) in seg.lines.iter().enumerate() {
        for (j, right) in seg.lines.iter().enumerate() {
            if left.bounds.right() <= 370
                && right.bounds.x >= 430
                && left.bounds.vertical_overlap(&right.bounds) > 0
                && i > j
            {
                violations += 1;
            }
        }
    }
    rp.compare_values(0.0, violations as f64, 0.0);
    check_invariants(&mut rp, &seg, &page.image);

    // Column order reads the whole left column first
    let opts = PageOptions::default().with_order(OrderOptions::default().with_mode(OrderMode::Columns));
    let cols = segment_page(&page.image, &opts).unwrap();
    let firsts: Vec<bool> = cols.lines.iter().map(|l| l.bounds.right() <= 370).collect();
    let left_first = firsts.iter().take(10).all(|&l| l) && firsts.iter().skip(10).all(|&l| !l);
    rp.compare_values(1.0, left_first as u8 as f64, 0.0);
    check_invariants(&mut rp, &cols, &page.image);

    assert!(rp.cleanup(), "pageseg two columns regression test failed");
}

#[test]
fn pageseg_determinism_reg() {
    let mut rp = RegParams::new("pageseg_determinism");
    let page = synth::two_column_page(6).unwrap();
    let opts = PageOptions::default();
    let a = segment_page(&page.image, &opts).unwrap();
    let b = segment_page(&page.image, &opts).unwrap();
    rp.compare_label_maps(&a.segmentation, &b.segmentation);
    rp.compare_label_maps(&a.seeds, &b.seeds);
    rp.compare_bitmaps(&a.column_mask, &b.column_mask);
    rp.compare_values(1.0, (a.lines == b.lines) as u8 as f64, 0.0);
    rp.compare_values(a.noise as f64, b.noise as f64, 0.0);
    assert!(rp.cleanup(), "pageseg determinism regression test failed");
}

#[test]
fn pageseg_black_rule_reg() {
    let mut rp = RegParams::new("pageseg_black_rule");
    let page = synth::two_column_page(10).unwrap();
    let mut bm = page.image.to_mut();
    bm.fill_rect(Box::new_unchecked(398, 150, 3, 500), true);
    let ruled: Bitmap = bm.into();

    let opts = PageOptions::default().with_columns(ColumnOptions::default().with_black_seps(true));
    let seg = segment_page(&ruled, &opts).unwrap();
    rp.compare_values(1.0, seg.column_mask.get_pixel(399, 400).unwrap() as f64, 0.0);
    rp.compare_values(0.0, seg.segmentation.get(399, 400).unwrap() as f64, 0.0);
    rp.compare_values(0.0, seg.binary.get_pixel(399, 400).unwrap() as f64, 0.0);
    check_invariants(&mut rp, &seg, &ruled);

    assert!(rp.cleanup(), "pageseg black rule regression test failed");
}

#[test]
fn pageseg_failures_reg() {
    let mut rp = RegParams::new("pageseg_failures");

    // Glyphs 8 px tall are below the minimum scale of 12
    let tiny = synth::tiny_glyph_page(20).unwrap();
    let err = segment_page(&tiny.image, &PageOptions::default());
    rp.compare_values(
        1.0,
        matches!(err, Err(LayoutError::ScaleOutOfRange { .. })) as u8 as f64,
        0.0,
    );
    // ... but fine with a lower minimum
    let opts = PageOptions::default().with_scale(
        pageseg_layout::ScaleOptions::default().with_min_scale(6.0),
    );
    let seg = segment_page(&tiny.image, &opts).unwrap();
    rp.compare_values(8.0, seg.scale as f64, 0.0);

    // Invalid options are rejected before any work
    let bad = PageOptions::default().with_order(OrderOptions::default().with_overlap_fraction(0.0));
    let err = segment_page(&tiny.image, &bad);
    rp.compare_values(
        1.0,
        matches!(err, Err(LayoutError::InvalidParameter(_))) as u8 as f64,
        0.0,
    );

    // A blank page fails the page check
    let blank = Bitmap::new(800, 1000).unwrap();
    let err = segment_page(&blank, &PageOptions::default());
    rp.compare_values(1.0, matches!(err, Err(LayoutError::PageCheck(_))) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pageseg failures regression test failed");
}

#[test]
fn pageseg_solid_bands_reg() {
    let mut rp = RegParams::new("pageseg_solid_bands");
    // Three solid 600x20 ink bands, one per line
    let tops = [200, 400, 600];
    let mut bm = BitmapMut::new(800, 1000).unwrap();
    for &y in &tops {
        bm.fill_rect(Box::new_unchecked(100, y, 600, 20), true);
    }
    let page: Bitmap = bm.into();

    // Three components are too few for the page check
    let opts = PageOptions::default().with_check_page(false);
    let seg = segment_page(&page, &opts).unwrap();
    rp.compare_values(20.0, seg.scale as f64, 0.0);
    rp.compare_values(3.0, seg.lines.len() as f64, 0.0);
    for (line, &y) in seg.lines.iter().zip(&tops) {
        let center = y + 10;
        rp.compare_values(
            1.0,
            (line.bounds.y <= center && line.bounds.bottom() > center) as u8 as f64,
            0.0,
        );
        rp.compare_values(12000.0, line.pixel_count as f64, 600.0);
    }
    check_invariants(&mut rp, &seg, &page);

    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("0001");
    let n = export_page(&seg, &page, None, &outdir, &ExportOptions::default()).unwrap();
    rp.compare_values(3.0, n as f64, 0.0);
    let crops = std::fs::read_dir(&outdir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".bin.png"))
        .count();
    rp.compare_values(3.0, crops as f64, 0.0);

    assert!(rp.cleanup(), "pageseg solid bands regression test failed");
}

#[test]
fn pageseg_degenerate_lines_reg() {
    let mut rp = RegParams::new("pageseg_degenerate_lines");
    let page = synth::single_column_page(3).unwrap();
    let seg = segment_page(&page.image, &PageOptions::default()).unwrap();

    // Re-extracting with a huge minimum size drops every line
    let none = extract_lines(&seg.segmentation, seg.scale, &LineOptions::default().with_min_size(100.0, 1.0))
        .unwrap();
    rp.compare_values(0.0, none.len() as f64, 0.0);

    // One box map component holds two words and three seeds. Seed 2
    // sits on no ink, further than one scale unit from both words.
    let scale = 10.0;
    let mut boxmap = BitmapMut::new(120, 60).unwrap();
    boxmap.fill_rect(Box::new_unchecked(0, 5, 120, 40), true);
    let boxmap: Bitmap = boxmap.into();
    let mut ink = BitmapMut::new(120, 60).unwrap();
    ink.fill_rect(Box::new_unchecked(5, 10, 30, 25), true);
    ink.fill_rect(Box::new_unchecked(85, 10, 30, 25), true);
    let ink: Bitmap = ink.into();
    let mut seeds = LabelMap::new(120, 60).unwrap();
    for (label, r) in [
        (1, Box::new_unchecked(8, 15, 24, 15)),
        (2, Box::new_unchecked(58, 20, 4, 2)),
        (3, Box::new_unchecked(88, 15, 24, 15)),
    ] {
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                seeds.set_unchecked(x as u32, y as u32, label);
            }
        }
    }

    let labels = spread_labels(&boxmap, &seeds, &ink, scale).unwrap();
    let with_two = labels.data().iter().filter(|&&l| l == 2).count();
    rp.compare_values(0.0, with_two as f64, 0.0);
    let lines = extract_lines(&labels, scale, &LineOptions::default()).unwrap();
    let found: Vec<u32> = lines.iter().map(|l| l.label).collect();
    rp.compare_values(1.0, (found == [1, 3]) as u8 as f64, 0.0);
    for line in &lines {
        rp.compare_values(750.0, line.pixel_count as f64, 0.0);
    }

    assert!(rp.cleanup(), "pageseg degenerate lines regression test failed");
}

#[test]
fn pageseg_export_reg() {
    let mut rp = RegParams::new("pageseg_export");
    let page = synth::single_column_page(3).unwrap();
    let gray = synth::render_gray(&page.image).unwrap();
    let seg = segment_page(&page.image, &PageOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let outdir = dir.path().join("0001");
    let opts = ExportOptions::default().with_pad(5);
    let n = export_page(&seg, &page.image, Some(&gray), &outdir, &opts).unwrap();
    rp.compare_values(3.0, n as f64, 0.0);

    for line in &seg.lines {
        let id = line_id(line.label);
        let bin = pageseg_io::read_bitmap(outdir.join(format!("{:06x}.bin.png", id))).unwrap();
        rp.compare_values((line.bounds.w + 10) as f64, bin.width() as f64, 0.0);
        rp.compare_values((line.bounds.h + 10) as f64, bin.height() as f64, 0.0);
        rp.compare_values(line.pixel_count as f64, bin.count_pixels() as f64, 0.0);

        let nrm = pageseg_io::read_gray(outdir.join(format!("{:06x}.nrm.png", id))).unwrap();
        rp.compare_values(1.0, (nrm.dimensions() == bin.dimensions()) as u8 as f64, 0.0);
    }
    let names: Vec<String> = ["010001", "010002", "010003"]
        .iter()
        .map(|s| format!("{}.bin.png", s))
        .collect();
    for name in &names {
        rp.compare_values(1.0, outdir.join(name).exists() as u8 as f64, 0.0);
    }

    let pseg = pageseg_io::read_label_map(dir.path().join("0001.pseg.png")).unwrap();
    let ids: Vec<u32> = seg
        .segmentation
        .data()
        .iter()
        .map(|&l| if l == 0 { 0xffffff } else { line_id(l) })
        .collect();
    rp.compare_values(1.0, (pseg.data() == ids.as_slice()) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pageseg export regression test failed");
}
