//! Whole-page segmentation

use crate::check::check_page;
use crate::colseps::{detect_columns, remove_hlines};
use crate::lines::{Line, extract_lines};
use crate::options::PageOptions;
use crate::order::reading_order;
use crate::scale::resolve_scale;
use crate::seeds::{compute_boxmap, compute_gradmaps, compute_line_seeds};
use crate::spread::spread_labels;
use crate::{LayoutError, LayoutResult};
use pageseg_core::{Bitmap, LabelMap};

/// Result of segmenting one page
#[derive(Debug, Clone)]
pub struct PageSegmentation {
    /// Page scale
    pub scale: f32,
    /// Column separator pixels
    pub column_mask: Bitmap,
    /// Ink used for line detection: the page without rules and separators
    pub binary: Bitmap,
    /// Filled boxes of character-sized components
    pub boxmap: Bitmap,
    /// Line seeds
    pub seeds: LabelMap,
    /// Line labels in reading order: rank `r` has label `r + 1`
    pub segmentation: LabelMap,
    /// Lines in reading order
    pub lines: Vec<Line>,
    /// Ink pixels not assigned to any line, including removed rules
    pub noise: usize,
}

/// Segment a binary page (1 = ink) into text lines in reading order
pub fn segment_page(binary: &Bitmap, options: &PageOptions) -> LayoutResult<PageSegmentation> {
    options.validate()?;
    if options.check_page {
        check_page(binary)?;
    }

    let scale = resolve_scale(binary, &options.scale)?;
    let (page, rule_px) = remove_hlines(binary, scale, &options.columns)?;
    let (column_mask, working) = detect_columns(&page, scale, &options.columns)?;

    let boxmap = compute_boxmap(&working, scale, &options.seeds)?;
    let grad = compute_gradmaps(&working, &boxmap, scale, &options.seeds)?;
    let seeds = compute_line_seeds(&grad, &column_mask, scale, &options.seeds)?;
    let nseeds = seeds.max_label() as usize;
    if nseeds > options.max_lines {
        return Err(LayoutError::TooManyLines {
            count: nseeds,
            max: options.max_lines,
        });
    }

    let labels = spread_labels(&boxmap, &seeds, &working, scale)?;
    let lines = extract_lines(&labels, scale, &options.lines)?;
    let order = reading_order(&lines, &options.order);

    // Renumber by rank; dropped lines map to 0.
    let mut table = vec![0u32; nseeds + 1];
    let mut ordered = Vec::with_capacity(lines.len());
    for (rank, &i) in order.iter().enumerate() {
        let label = rank as u32 + 1;
        table[lines[i].label as usize] = label;
        ordered.push(Line {
            label,
            ..lines[i].clone()
        });
    }
    let segmentation = labels.relabel(&table);
    let noise = working.count_pixels() - segmentation.count_labeled() + rule_px;

    log::debug!(
        "page: scale {}, {} seeds, {} lines, {} noise px",
        scale,
        nseeds,
        ordered.len(),
        noise
    );

    Ok(PageSegmentation {
        scale,
        column_mask,
        binary: working,
        boxmap,
        seeds,
        segmentation,
        lines: ordered,
        noise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ScaleOptions;
    use pageseg_test::synth;

    #[test]
    fn test_three_lines() {
        let page = synth::single_column_page(3).unwrap();
        let seg = segment_page(&page.image, &PageOptions::default()).unwrap();
        assert_eq!(seg.scale, 20.0);
        assert_eq!(seg.lines.len(), 3);
        for (rank, line) in seg.lines.iter().enumerate() {
            assert_eq!(line.label, rank as u32 + 1);
            assert_eq!(line.bounds, page.lines[rank]);
        }
        assert_eq!(seg.noise, 0);
    }

    #[test]
    fn test_scale_below_minimum() {
        let page = synth::tiny_glyph_page(20).unwrap();
        let err = segment_page(&page.image, &PageOptions::default()).unwrap_err();
        assert!(matches!(err, LayoutError::ScaleOutOfRange { .. }));
    }

    #[test]
    fn test_too_many_lines() {
        let page = synth::single_column_page(3).unwrap();
        let opts = PageOptions::default().with_max_lines(2);
        let err = segment_page(&page.image, &opts).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::TooManyLines { count, max: 2 } if count >= 3
        ));
    }

    #[test]
    fn test_page_check_can_be_skipped() {
        // A 200 px strip is too short for the page check.
        let page = synth::single_column_page(3).unwrap();
        let small = page
            .image
            .crop(pageseg_core::Box::new_unchecked(0, 150, 800, 200), false)
            .unwrap();
        assert!(matches!(
            segment_page(&small, &PageOptions::default()),
            Err(LayoutError::PageCheck(_))
        ));
        let opts = PageOptions::default()
            .with_check_page(false)
            .with_scale(ScaleOptions::default().with_fixed_scale(Some(20.0)));
        let seg = segment_page(&small, &opts).unwrap();
        assert_eq!(seg.lines.len(), 3);
    }
}
