//! Batch module
//!
//! Discovery of FITS files, output layout and resume checks, and the
//! orchestration of one extraction per file across a worker pool.

pub mod config;
pub mod discover;
mod report;
mod resume;
mod runner;
pub mod types;


pub use config::{BatchConfig, BatchConfigBuilder};
pub use discover::{SourceSet, discover_sources, is_fits_file};
pub use report::BatchReport;
pub use resume::ChannelTargets;
pub use runner::{BatchRunner, run_task};
pub use types::{ImageTask, TaskOutcome};
