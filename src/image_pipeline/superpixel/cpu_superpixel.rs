//! RGGB superpixel decimation.
//!
//! Each 2x2 block `[R G1; G2 B]` becomes one output pixel per channel. Red
//! and blue are copied untouched; green is the mean of the two green sites,
//! computed in f64 and cast back to the source type. A trailing odd row or
//! column has no complete block and is dropped.

use tracing::debug;

use crate::image_pipeline::common::error::{Result, SplitError};
use crate::image_pipeline::fits::PixelData;
use crate::image_pipeline::superpixel::types::ChannelPlanes;

/// Upper clamp for integer green averages, applied regardless of the integer
/// width. Narrower types can never reach it; wider ones are capped at 16 bits.
pub const GREEN_CLAMP_MAX: f64 = 65535.0;

/// A pixel type that can be averaged back into its own representation.
pub trait CfaSample: Copy {
    fn green_average(g1: Self, g2: Self) -> Self;
}

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl CfaSample for $t {
                fn green_average(g1: Self, g2: Self) -> Self {
                    let mean = (g1 as f64 + g2 as f64) / 2.0;
                    mean.round().clamp(0.0, GREEN_CLAMP_MAX) as $t
                }
            }
        )*
    };
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl CfaSample for $t {
                fn green_average(g1: Self, g2: Self) -> Self {
                    ((g1 as f64 + g2 as f64) / 2.0) as $t
                }
            }
        )*
    };
}

impl_integer_sample!(u8, i8, i16, u16, i32, u32, i64);
impl_float_sample!(f32, f64);

/// Splits a row-major RGGB mosaic of `width` x `height` into R, G and B planes.
pub fn split_rggb<T: CfaSample>(
    data: &[T],
    width: usize,
    height: usize,
) -> Result<ChannelPlanes<Vec<T>>> {
    if data.len() != width * height {
        return Err(SplitError::PlaneMismatch {
            width,
            height,
            actual: data.len(),
        });
    }
    if width < 2 || height < 2 {
        return Err(SplitError::TooSmall { width, height });
    }

    let out_width = width / 2;
    let out_height = height / 2;
    let len = out_width * out_height;
    let mut red = Vec::with_capacity(len);
    let mut green = Vec::with_capacity(len);
    let mut blue = Vec::with_capacity(len);

    for y in 0..out_height {
        let even_row = &data[2 * y * width..(2 * y + 1) * width];
        let odd_row = &data[(2 * y + 1) * width..(2 * y + 2) * width];
        for x in 0..out_width {
            red.push(even_row[2 * x]);
            green.push(T::green_average(even_row[2 * x + 1], odd_row[2 * x]));
            blue.push(odd_row[2 * x + 1]);
        }
    }

    Ok(ChannelPlanes {
        width: out_width,
        height: out_height,
        red,
        green,
        blue,
    })
}

/// Type-dispatching wrapper over [`split_rggb`] that keeps the source dtype.
pub fn split_pixels(
    pixels: &PixelData,
    width: usize,
    height: usize,
) -> Result<ChannelPlanes<PixelData>> {
    debug!(
        "Superpixel split of {}x{} {} mosaic",
        width,
        height,
        pixels.dtype_name()
    );

    let planes = match pixels {
        PixelData::U8(d) => split_rggb(d, width, height)?.map(PixelData::U8),
        PixelData::I8(d) => split_rggb(d, width, height)?.map(PixelData::I8),
        PixelData::I16(d) => split_rggb(d, width, height)?.map(PixelData::I16),
        PixelData::U16(d) => split_rggb(d, width, height)?.map(PixelData::U16),
        PixelData::I32(d) => split_rggb(d, width, height)?.map(PixelData::I32),
        PixelData::U32(d) => split_rggb(d, width, height)?.map(PixelData::U32),
        PixelData::I64(d) => split_rggb(d, width, height)?.map(PixelData::I64),
        PixelData::F32(d) => split_rggb(d, width, height)?.map(PixelData::F32),
        PixelData::F64(d) => split_rggb(d, width, height)?.map(PixelData::F64),
    };
    Ok(planes)
}
