//! pageseg-test - Regression test framework for pageseg
//!
//! Regression tests record every check through [`RegParams`] and report
//! all failures together at the end, supporting two modes:
//!
//! - **Compare**: run the checks only (default)
//! - **Display**: also write intermediate images to `tests/regout` for
//!   visual inspection
//!
//! The [`synth`] module builds synthetic pages with known line geometry.
//!
//! # Usage
//!
//! ```ignore
//! use pageseg_test::{RegParams, synth};
//!
//! let page = synth::single_column_page(3).unwrap();
//! let mut rp = RegParams::new("pageseg");
//! rp.compare_values(3.0, lines.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pageseg-test is at crates/pageseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
