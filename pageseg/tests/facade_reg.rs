//! Facade regression test
//!
//! Runs a page from disk to line files through the top-level crate only,
//! the way the command line tool does.
//!
//! Run with:
//! ```
//! cargo test -p pageseg --test facade_reg
//! ```

use pageseg::layout::{gray_path_for, output_dir_for};
use pageseg::{ExportOptions, PageOptions, export_page, segment_page};
use pageseg_test::{RegParams, synth};

#[test]
fn facade_reg() {
    let mut rp = RegParams::new("facade");
    let dir = tempfile::tempdir().unwrap();

    let page = synth::two_column_page(10).unwrap();
    let input = dir.path().join("0001.bin.png");
    pageseg::io::write_bitmap(&page.image, &input).unwrap();
    let gray = synth::render_gray(&page.image).unwrap();
    pageseg::io::write_gray(&gray, gray_path_for(&input)).unwrap();

    let binary = pageseg::io::read_bitmap(&input).unwrap();
    rp.compare_bitmaps(&page.image, &binary);
    let gray = pageseg::io::read_gray(gray_path_for(&input)).unwrap();

    let seg = segment_page(&binary, &PageOptions::default()).unwrap();
    let outdir = output_dir_for(&input);
    let n = export_page(
        &seg,
        &binary,
        Some(&gray),
        &outdir,
        &ExportOptions::default(),
    )
    .unwrap();
    rp.compare_values(seg.lines.len() as f64, n as f64, 0.0);

    let bins = std::fs::read_dir(&outdir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".bin.png"))
        .count();
    rp.compare_values(n as f64, bins as f64, 0.0);
    rp.compare_values(1.0, dir.path().join("0001.pseg.png").exists() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "facade regression test failed");
}
