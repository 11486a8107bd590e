//! Image processing pipeline module
//!
//! This module splits RGGB CFA FITS images into separate R, G and B FITS
//! files, with separate modules for the FITS container, the superpixel math,
//! the per-file conversion and the batch orchestration.

pub mod batch;
pub mod common;
pub mod conversions;
pub mod fits;
pub mod superpixel;

pub use common::{Result, SplitError};

pub use fits::{
    CfaImageReader, ContainerSlots, FitsioReader, FitsioWriter, Header, ImageSlot, PixelData,
    PlaneImage, PlaneWriter,
};

pub use superpixel::{Channel, ChannelPlanes, split_pixels, split_rggb};

pub use conversions::CfaToRgbPipeline;

pub use batch::{
    BatchConfig, BatchConfigBuilder, BatchReport, BatchRunner, ChannelTargets, ImageTask,
    TaskOutcome,
};
