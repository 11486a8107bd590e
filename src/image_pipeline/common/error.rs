use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("no eligible FITS files found under {}", .0.display())]
    NoEligibleFiles(PathBuf),

    #[error("no data in primary image")]
    NoPayload,

    #[error("expected 2D CFA image, found {0}D")]
    WrongDimensionality(usize),

    #[error("file already processed by RGB Splitter")]
    AlreadyProcessed,

    #[error("CFA image too small for 2x2 superpixels: width={width}, height={height}")]
    TooSmall { width: usize, height: usize },

    #[error("pixel count {actual} does not match shape {width}x{height}")]
    PlaneMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("FITS error: {0}")]
    Fits(#[from] fitsio::errors::Error),

    #[error("FITS container error: {0}")]
    Container(String),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;
