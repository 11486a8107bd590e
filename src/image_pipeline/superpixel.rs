//! Superpixel module for splitting RGGB mosaics into separate color planes
//! without interpolation.

pub mod cpu_superpixel;
pub mod types;

pub use cpu_superpixel::{CfaSample, GREEN_CLAMP_MAX, split_pixels, split_rggb};
pub use types::{Channel, ChannelPlanes};
