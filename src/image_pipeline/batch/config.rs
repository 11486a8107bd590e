//! Batch run configuration

use std::path::PathBuf;

/// Default input directory when none is given.
pub const DEFAULT_INPUT: &str = "./data";
/// Default output directory when none is given.
pub const DEFAULT_OUTPUT: &str = "./output_rgb";

/// Available parallelism minus one, floored at one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Configuration for a batch split run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// A single FITS file or a directory searched recursively
    pub input: PathBuf,
    /// Root of the mirrored R/G/B output tree
    pub output: PathBuf,
    /// Number of worker threads, always at least one
    pub workers: usize,
    /// Whether to draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: default_workers(),
            show_progress: true,
        }
    }
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }
}

/// Builder for BatchConfig
#[derive(Default)]
pub struct BatchConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    workers: Option<usize>,
    show_progress: Option<bool>,
}

impl BatchConfigBuilder {
    pub fn input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// `None` keeps the default worker count.
    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = Some(show);
        self
    }

    pub fn build(self) -> BatchConfig {
        let default = BatchConfig::default();
        BatchConfig {
            input: self.input.unwrap_or(default.input),
            output: self.output.unwrap_or(default.output),
            workers: self.workers.unwrap_or(default.workers).max(1),
            show_progress: self.show_progress.unwrap_or(default.show_progress),
        }
    }
}
