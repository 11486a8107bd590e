use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;
use rgb_splitter::image_pipeline::batch::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use rgb_splitter::image_pipeline::batch::discover::FITS_EXTENSIONS;
use rgb_splitter::image_pipeline::{BatchConfig, BatchRunner, SplitError};
use rgb_splitter::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "rgb_splitter",
    version,
    about = "Split RGGB CFA FITS files into R/G/B FITS planes (superpixel, no interpolation)."
)]
struct Args {
    /// Input FITS file or directory (searched recursively)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of worker threads (default: available cores - 1)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(if args.verbose { "debug" } else { "info" });

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let config = BatchConfig::builder()
        .input(args.input)
        .output(args.output)
        .workers(args.workers)
        .show_progress(!args.no_progress)
        .build();

    let runner = BatchRunner::new(config);
    info!("RGB splitter initialized");

    match runner.run() {
        Ok(report) => {
            report.print_summary();
            Ok(report.is_success())
        }
        Err(SplitError::NoEligibleFiles(path)) => {
            println!(
                "No eligible FITS files found in {} ({})",
                path.display(),
                FITS_EXTENSIONS.join(" / ")
            );
            Ok(false)
        }
        Err(e) => Err(anyhow!("batch run failed: {}", e)),
    }
}
