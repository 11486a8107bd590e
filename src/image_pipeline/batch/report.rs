use std::path::PathBuf;
use std::time::Duration;

use crate::image_pipeline::batch::types::TaskOutcome;

/// Aggregated outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub workers: usize,
    pub ok: usize,
    pub skipped: usize,
    /// Error messages in task submission order
    pub errors: Vec<String>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn new(input: PathBuf, output: PathBuf, workers: usize) -> Self {
        Self {
            input,
            output,
            workers,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Ok => self.ok += 1,
            TaskOutcome::Skipped => self.skipped += 1,
            TaskOutcome::Error(message) => self.errors.push(message),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn total(&self) -> usize {
        self.ok + self.skipped + self.errors.len()
    }

    /// At least one file was seen and none of them failed.
    pub fn is_success(&self) -> bool {
        self.total() > 0 && self.errors.is_empty()
    }

    pub fn print_summary(&self) {
        println!("\n--- RGB SPLITTER: DONE ---");
        println!("{:-<60}", "");
        println!("{:<12} {}", "Input:", self.input.display());
        println!("{:<12} {}", "Output:", self.output.display());
        println!("{:<12} {}", "Workers:", self.workers);
        println!("{:<12} {}", "Files:", self.total());
        println!("{:<12} {:.2} s", "Elapsed:", self.elapsed.as_secs_f64());
        println!("{:-<60}", "");
        println!("{:<12} {:>8}", "Ok:", self.ok);
        println!("{:<12} {:>8}", "Skipped:", self.skipped);
        println!("{:<12} {:>8}", "Errors:", self.error_count());

        if !self.errors.is_empty() {
            println!("\nErrors:");
            for error in &self.errors {
                println!("{}", error);
            }
        }
    }
}
