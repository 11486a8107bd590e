//! Batch orchestration over a bounded worker pool.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::image_pipeline::{
    batch::{
        config::BatchConfig,
        discover::discover_sources,
        report::BatchReport,
        resume::ChannelTargets,
        types::{ImageTask, TaskOutcome},
    },
    common::error::{Result, SplitError},
    conversions::CfaToRgbPipeline,
    fits::{CfaImageReader, FitsioReader, FitsioWriter, PlaneWriter},
};

pub struct BatchRunner<R: CfaImageReader, W: PlaneWriter> {
    config: BatchConfig,
    pipeline: CfaToRgbPipeline<R, W>,
}

impl BatchRunner<FitsioReader, FitsioWriter> {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            pipeline: CfaToRgbPipeline::new(),
        }
    }
}

impl<R: CfaImageReader, W: PlaneWriter> BatchRunner<R, W> {
    pub fn with_pipeline(config: BatchConfig, pipeline: CfaToRgbPipeline<R, W>) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Discovers, splits and reports every eligible file under the input path.
    ///
    /// Per-file failures end up in the report; only an empty discovery or a
    /// pool that cannot start is returned as an error.
    pub fn run(&self) -> Result<BatchReport> {
        let input = std::path::absolute(&self.config.input)?;
        let output = std::path::absolute(&self.config.output)?;
        let workers = self.config.workers;

        info!("--- RGB SPLITTER ---");
        info!("Input:   {}", input.display());
        info!("Output:  {}", output.display());
        info!("Workers: {}", workers);

        let sources = discover_sources(&input);
        info!("{} files to process", sources.files.len());
        if sources.files.is_empty() {
            return Err(SplitError::NoEligibleFiles(input));
        }

        let start = Instant::now();
        let tasks: Vec<ImageTask> = sources
            .files
            .iter()
            .map(|file| ImageTask::new(file, &sources.root, &output))
            .collect();

        let progress = self.progress_bar(tasks.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let outcomes: Vec<TaskOutcome> = pool.install(|| {
            tasks
                .par_iter()
                .map(|task| run_task(&self.pipeline, task))
                .inspect(|outcome| {
                    if let TaskOutcome::Error(message) = outcome {
                        progress.suspend(|| warn!("{}", message));
                    }
                    progress.inc(1);
                })
                .collect()
        });
        progress.finish_and_clear();

        let mut report = BatchReport::new(input, output, workers);
        for outcome in outcomes {
            report.record(outcome);
        }
        report.elapsed = start.elapsed();

        info!(
            ok = report.ok,
            skipped = report.skipped,
            errors = report.error_count(),
            "Batch complete"
        );
        Ok(report)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} img ({elapsed} / {eta})")
            .map(|style| style.progress_chars("█▉▊▋▌▍▎▏ "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress = ProgressBar::new(len as u64);
        progress.set_style(style);
        progress.set_message("Splitting");
        progress
    }
}

/// Runs one task to a single outcome: skip complete outputs, otherwise
/// create the channel folders and extract. Never fails past this boundary.
pub fn run_task<R: CfaImageReader, W: PlaneWriter>(
    pipeline: &CfaToRgbPipeline<R, W>,
    task: &ImageTask,
) -> TaskOutcome {
    let targets = ChannelTargets::for_task(task);
    if targets.is_complete() {
        debug!("Skipping {}: outputs already exist", task.source_path.display());
        return TaskOutcome::Skipped;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        prepare_and_extract(pipeline, &task.source_path, &targets)
    }));

    match result {
        Ok(Ok(())) => TaskOutcome::Ok,
        Ok(Err(e)) => TaskOutcome::Error(format!("{} - {}", task.file_name(), e)),
        Err(payload) => TaskOutcome::Error(format!(
            "{} - worker panicked: {}",
            task.file_name(),
            panic_message(payload.as_ref())
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn prepare_and_extract<R: CfaImageReader, W: PlaneWriter>(
    pipeline: &CfaToRgbPipeline<R, W>,
    source: &Path,
    targets: &ChannelTargets,
) -> Result<()> {
    targets.create_dirs()?;
    pipeline.extract(source, targets)
}
