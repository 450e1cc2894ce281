//! Segmentation options
//!
//! Every stage takes its own options struct; [`PageOptions`] bundles them
//! for [`segment_page`](crate::segment_page). All lengths given as `f32`
//! factors are multiples of the page scale.

use crate::{LayoutError, LayoutResult};

fn invalid(msg: impl Into<String>) -> LayoutError {
    LayoutError::InvalidParameter(msg.into())
}

fn check_positive(name: &str, v: f32) -> LayoutResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be positive, got {}", name, v)))
    }
}

/// Options for scale estimation
#[derive(Debug, Clone)]
pub struct ScaleOptions {
    /// Smallest acceptable scale (default: 12.0)
    pub min_scale: f32,
    /// Use this scale instead of estimating one (default: None)
    pub fixed_scale: Option<f32>,
    /// Components must be taller than this to vote (default: 3)
    pub min_component_height: u32,
    /// Components must be shorter than this to vote (default: 100)
    pub max_component_height: u32,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            min_scale: 12.0,
            fixed_scale: None,
            min_component_height: 3,
            max_component_height: 100,
        }
    }
}

impl ScaleOptions {
    /// Set the minimum acceptable scale
    pub fn with_min_scale(mut self, min_scale: f32) -> Self {
        self.min_scale = min_scale;
        self
    }

    /// Use a fixed scale instead of estimating it
    pub fn with_fixed_scale(mut self, scale: Option<f32>) -> Self {
        self.fixed_scale = scale;
        self
    }

    /// Set the component height band used for estimation
    pub fn with_component_heights(mut self, min: u32, max: u32) -> Self {
        self.min_component_height = min;
        self.max_component_height = max;
        self
    }

    /// Check that the options are usable
    pub fn validate(&self) -> LayoutResult<()> {
        check_positive("min_scale", self.min_scale)?;
        if let Some(s) = self.fixed_scale {
            check_positive("fixed_scale", s)?;
        }
        if self.min_component_height >= self.max_component_height {
            return Err(invalid(format!(
                "component height band ({}, {}) is empty",
                self.min_component_height, self.max_component_height
            )));
        }
        Ok(())
    }
}

/// Options for column separator detection
#[derive(Debug, Clone)]
pub struct ColumnOptions {
    /// Maximum number of black rule separators (default: 0, disabled)
    pub max_black_seps: u32,
    /// Look for black rules even if `max_black_seps` is 0 (default: false)
    pub black_seps: bool,
    /// Minimum black rule height, in scale units (default: 20.0)
    pub black_sep_min_height: f32,
    /// Horizontal widening of black rules, in pixels (default: 10)
    pub sep_widen: u32,
    /// Maximum number of whitespace separators (default: 3)
    pub max_col_seps: u32,
    /// Minimum whitespace separator height, in scale units (default: 10.0)
    pub col_sep_min_height: f32,
    /// Components wider than this many scale units may be rules (default: 10.0)
    pub hline_max_width: f32,
    /// ... if they are also shorter than this many scale units (default: 0.5)
    pub hline_max_height: f32,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            max_black_seps: 0,
            black_seps: false,
            black_sep_min_height: 20.0,
            sep_widen: 10,
            max_col_seps: 3,
            col_sep_min_height: 10.0,
            hline_max_width: 10.0,
            hline_max_height: 0.5,
        }
    }
}

impl ColumnOptions {
    /// Set the maximum number of black rule separators
    pub fn with_max_black_seps(mut self, n: u32) -> Self {
        self.max_black_seps = n;
        self
    }

    /// Force black rule detection
    pub fn with_black_seps(mut self, on: bool) -> Self {
        self.black_seps = on;
        self
    }

    /// Set the horizontal widening of black rules
    pub fn with_sep_widen(mut self, widen: u32) -> Self {
        self.sep_widen = widen;
        self
    }

    /// Set the maximum number of whitespace separators
    pub fn with_max_col_seps(mut self, n: u32) -> Self {
        self.max_col_seps = n;
        self
    }

    /// Set the minimum whitespace separator height
    pub fn with_col_sep_min_height(mut self, h: f32) -> Self {
        self.col_sep_min_height = h;
        self
    }

    /// Set the size limits of horizontal rules
    pub fn with_hline_size(mut self, max_width: f32, max_height: f32) -> Self {
        self.hline_max_width = max_width;
        self.hline_max_height = max_height;
        self
    }

    /// Number of black rules to look for; `black_seps` asks for at least two.
    pub fn black_sep_count(&self) -> u32 {
        if self.black_seps {
            self.max_black_seps.max(2)
        } else {
            self.max_black_seps
        }
    }

    /// Check that the options are usable
    pub fn validate(&self) -> LayoutResult<()> {
        check_positive("black_sep_min_height", self.black_sep_min_height)?;
        check_positive("col_sep_min_height", self.col_sep_min_height)?;
        check_positive("hline_max_width", self.hline_max_width)?;
        check_positive("hline_max_height", self.hline_max_height)?;
        if self.black_sep_count() > 0 && self.sep_widen == 0 {
            return Err(invalid("sep_widen must be positive"));
        }
        Ok(())
    }
}

/// Filter used to compute the vertical gradient of the box map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientFilter {
    /// Narrow Gaussian derivative followed by a wide uniform filter
    #[default]
    Box,
    /// A single wide Gaussian derivative
    Gaussian,
}

/// Options for line seed detection
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Horizontal kernel multiplier (default: 1.0)
    pub hscale: f32,
    /// Vertical kernel multiplier (default: 1.0)
    pub vscale: f32,
    /// Baseline threshold, relative to the gradient maximum (default: 0.2)
    pub threshold: f32,
    /// Gradient filter (default: Box)
    pub gradient: GradientFilter,
    /// Smallest component kept in the box map, in scale units (default: 0.5)
    pub boxmap_min: f32,
    /// Largest component kept in the box map, in scale units (default: 4.0)
    pub boxmap_max: f32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            hscale: 1.0,
            vscale: 1.0,
            threshold: 0.2,
            gradient: GradientFilter::Box,
            boxmap_min: 0.5,
            boxmap_max: 4.0,
        }
    }
}

impl SeedOptions {
    /// Set the horizontal and vertical kernel multipliers
    pub fn with_scales(mut self, hscale: f32, vscale: f32) -> Self {
        self.hscale = hscale;
        self.vscale = vscale;
        self
    }

    /// Set the baseline threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the gradient filter
    pub fn with_gradient(mut self, gradient: GradientFilter) -> Self {
        self.gradient = gradient;
        self
    }

    /// Check that the options are usable
    pub fn validate(&self) -> LayoutResult<()> {
        check_positive("hscale", self.hscale)?;
        check_positive("vscale", self.vscale)?;
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(invalid(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        check_positive("boxmap_min", self.boxmap_min)?;
        if !(self.boxmap_max > self.boxmap_min) {
            return Err(invalid("boxmap_max must exceed boxmap_min"));
        }
        Ok(())
    }
}

/// Options for line extraction
#[derive(Debug, Clone)]
pub struct LineOptions {
    /// Narrower lines are fragments, in scale units (default: 2.0)
    pub min_width: f32,
    /// Shorter lines are fragments, in scale units (default: 1.0)
    pub min_height: f32,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            min_width: 2.0,
            min_height: 1.0,
        }
    }
}

impl LineOptions {
    /// Set the minimum line size
    pub fn with_min_size(mut self, min_width: f32, min_height: f32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Check that the options are usable
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.min_width >= 0.0 && self.min_height >= 0.0) {
            return Err(invalid("minimum line size must be non-negative"));
        }
        Ok(())
    }
}

/// Relation used to order lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    /// Rows first; lines sharing a row are read left to right
    #[default]
    Overlap,
    /// Columns first, split by intervening lines
    Columns,
}

/// Options for reading order
#[derive(Debug, Clone)]
pub struct OrderOptions {
    /// Ordering relation (default: Overlap)
    pub mode: OrderMode,
    /// Vertical overlap fraction at which two lines share a row (default: 0.5)
    pub overlap_fraction: f32,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            mode: OrderMode::Overlap,
            overlap_fraction: 0.5,
        }
    }
}

impl OrderOptions {
    /// Set the ordering relation
    pub fn with_mode(mut self, mode: OrderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the overlap fraction
    pub fn with_overlap_fraction(mut self, f: f32) -> Self {
        self.overlap_fraction = f;
        self
    }

    /// Check that the options are usable
    pub fn validate(&self) -> LayoutResult<()> {
        if !(self.overlap_fraction > 0.0 && self.overlap_fraction <= 1.0) {
            return Err(invalid(format!(
                "overlap_fraction must be in (0, 1], got {}",
                self.overlap_fraction
            )));
        }
        Ok(())
    }
}

/// Options for a whole page
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub scale: ScaleOptions,
    pub columns: ColumnOptions,
    pub seeds: SeedOptions,
    pub lines: LineOptions,
    pub order: OrderOptions,
    /// Maximum number of line seeds (default: 300)
    pub max_lines: usize,
    /// Run the page checks first (default: true)
    pub check_page: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            scale: ScaleOptions::default(),
            columns: ColumnOptions::default(),
            seeds: SeedOptions::default(),
            lines: LineOptions::default(),
            order: OrderOptions::default(),
            max_lines: 300,
            check_page: true,
        }
    }
}

impl PageOptions {
    pub fn with_scale(mut self, scale: ScaleOptions) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_columns(mut self, columns: ColumnOptions) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_seeds(mut self, seeds: SeedOptions) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_lines(mut self, lines: LineOptions) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_order(mut self, order: OrderOptions) -> Self {
        self.order = order;
        self
    }

    /// Set the maximum number of line seeds
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Enable or disable the page checks
    pub fn with_check_page(mut self, check: bool) -> Self {
        self.check_page = check;
        self
    }

    /// Check the options of every stage
    pub fn validate(&self) -> LayoutResult<()> {
        self.scale.validate()?;
        self.columns.validate()?;
        self.seeds.validate()?;
        self.lines.validate()?;
        self.order.validate()?;
        if self.max_lines == 0 {
            return Err(invalid("max_lines must be positive"));
        }
        Ok(())
    }
}

/// Options for writing line images
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Padding around each line crop, in pixels (default: 3)
    pub pad: u32,
    /// Dilation of the line mask, in pixels (default: 3)
    pub expand: u32,
    /// Components smaller than this many pixels are noise (default: 8)
    pub noise: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pad: 3,
            expand: 3,
            noise: 8,
        }
    }
}

impl ExportOptions {
    /// Set the crop padding
    pub fn with_pad(mut self, pad: u32) -> Self {
        self.pad = pad;
        self
    }

    /// Set the mask expansion
    pub fn with_expand(mut self, expand: u32) -> Self {
        self.expand = expand;
        self
    }

    /// Set the noise threshold
    pub fn with_noise(mut self, noise: u32) -> Self {
        self.noise = noise;
        self
    }
}
