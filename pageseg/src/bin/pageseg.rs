//! pageseg CLI - Split page images into text lines

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Parser, ValueEnum};
use rayon::prelude::*;

use pageseg::layout::{gray_path_for, output_dir_for};
use pageseg::{
    ColumnOptions, ExportOptions, GradientFilter, OrderMode, OrderOptions, PageOptions,
    ScaleOptions, SeedOptions, check_page_image, export_page, segment_page,
};

#[derive(Parser)]
#[command(name = "pageseg")]
#[command(version)]
#[command(about = "Segment scanned pages into text lines", long_about = None)]
struct Cli {
    /// Page images (black text on white); `book/0001.bin.png` writes
    /// its lines to `book/0001/`
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Also crop the grayscale page `<base>.nrm.png`
    #[arg(long)]
    gray: bool,

    /// Minimum scale permitted
    #[arg(long, default_value_t = 12.0)]
    minscale: f32,

    /// Use this scale instead of estimating one (0 = estimate)
    #[arg(long, default_value_t = 0.0)]
    scale: f32,

    /// Maximum number of lines permitted
    #[arg(long, default_value_t = 300)]
    maxlines: usize,

    /// Non-standard horizontal scaling of the seed filters
    #[arg(long, default_value_t = 1.0)]
    hscale: f32,

    /// Non-standard vertical scaling of the seed filters
    #[arg(long, default_value_t = 1.0)]
    vscale: f32,

    /// Baseline threshold, relative to the strongest gradient
    #[arg(long, default_value_t = 0.2)]
    threshold: f32,

    /// Maximum number of black column separators
    #[arg(long, default_value_t = 0)]
    maxseps: u32,

    /// Detect black column separators (at least 2)
    #[arg(long)]
    blackseps: bool,

    /// Widen black separators by this many pixels
    #[arg(long, default_value_t = 10)]
    sepwiden: u32,

    /// Maximum number of whitespace column separators
    #[arg(long, default_value_t = 3)]
    maxcolseps: u32,

    /// Minimum whitespace separator height, in multiples of the scale
    #[arg(long, default_value_t = 10.0)]
    csminheight: f32,

    /// Use a Gaussian instead of a box filter for the gradients
    #[arg(long)]
    usegauss: bool,

    /// Padding around each line crop
    #[arg(long, default_value_t = 3)]
    pad: u32,

    /// Expansion of the line mask
    #[arg(long, default_value_t = 3)]
    expand: u32,

    /// Components smaller than this many pixels are noise
    #[arg(long, default_value_t = 8)]
    noise: u32,

    /// Reading order relation
    #[arg(long, value_enum, default_value = "overlap")]
    order: Order,

    /// Vertical overlap fraction that puts two lines on one row
    #[arg(long, default_value_t = 0.5)]
    overlap: f32,

    /// Skip the page image checks
    #[arg(long)]
    nocheck: bool,

    /// Number of pages processed in parallel (0 = one per core)
    #[arg(short = 'Q', long, default_value_t = 0)]
    parallel: usize,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Order {
    /// Rows left to right, otherwise top to bottom
    Overlap,
    /// Columns top to bottom, left to right
    Columns,
}

impl From<Order> for OrderMode {
    fn from(order: Order) -> Self {
        match order {
            Order::Overlap => OrderMode::Overlap,
            Order::Columns => OrderMode::Columns,
        }
    }
}

impl Cli {
    fn page_options(&self) -> PageOptions {
        let fixed = (self.scale > 0.0).then_some(self.scale);
        let columns = ColumnOptions::default()
            .with_max_black_seps(self.maxseps)
            .with_black_seps(self.blackseps)
            .with_sep_widen(self.sepwiden)
            .with_max_col_seps(self.maxcolseps)
            .with_col_sep_min_height(self.csminheight);
        let gradient = if self.usegauss {
            GradientFilter::Gaussian
        } else {
            GradientFilter::Box
        };
        PageOptions::default()
            .with_scale(
                ScaleOptions::default()
                    .with_min_scale(self.minscale)
                    .with_fixed_scale(fixed),
            )
            .with_columns(columns)
            .with_seeds(
                SeedOptions::default()
                    .with_scales(self.hscale, self.vscale)
                    .with_threshold(self.threshold)
                    .with_gradient(gradient),
            )
            .with_order(
                OrderOptions::default()
                    .with_mode(self.order.into())
                    .with_overlap_fraction(self.overlap),
            )
            .with_max_lines(self.maxlines)
            .with_check_page(!self.nocheck)
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_pad(self.pad)
            .with_expand(self.expand)
            .with_noise(self.noise)
    }
}

fn process_page(
    path: &Path,
    page_opts: &PageOptions,
    export_opts: &ExportOptions,
    use_gray: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    let (binary, color) = pageseg::io::read_page(path)?;
    let gray = if use_gray {
        Some(pageseg::io::read_gray(gray_path_for(path))?)
    } else {
        None
    };
    // Only the file knows whether the page was a color image, so the
    // page check runs here rather than in segment_page.
    if page_opts.check_page {
        check_page_image(&binary, color)?;
    }
    let seg = segment_page(&binary, &page_opts.clone().with_check_page(false))?;
    let outdir = output_dir_for(path);
    let n = export_page(&seg, &binary, gray.as_ref(), &outdir, export_opts)?;
    log::info!(
        "{}: scale {}, {} lines -> {}",
        path.display(),
        seg.scale,
        n,
        outdir.display()
    );
    Ok(n)
}

fn run(cli: &Cli) -> Result<usize, Box<dyn std::error::Error>> {
    let page_opts = cli.page_options();
    page_opts.validate()?;
    let export_opts = cli.export_options();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.parallel)
        .build()?;

    let done = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    pool.install(|| {
        cli.files.par_iter().for_each(|path| {
            match process_page(path, &page_opts, &export_opts, cli.gray) {
                Ok(_) => {
                    done.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    log::error!("{}: {}", path.display(), e);
                    failed.fetch_add(1, Ordering::Relaxed);
                }
            }
        })
    });

    let failed = failed.into_inner();
    log::info!("{} pages done, {} failed", done.into_inner(), failed);
    Ok(failed)
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(0) => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
