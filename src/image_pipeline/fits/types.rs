//! Container data types

use crate::image_pipeline::fits::header::Header;

/// Pixel buffer of one image payload, row-major, in the source's native type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U8(Vec<u8>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Applies the same expression to whichever typed buffer a `PixelData` holds.
macro_rules! with_pixels {
    ($data:expr, $buf:ident => $body:expr) => {
        match $data {
            $crate::image_pipeline::fits::PixelData::U8($buf) => $body,
            $crate::image_pipeline::fits::PixelData::I8($buf) => $body,
            $crate::image_pipeline::fits::PixelData::I16($buf) => $body,
            $crate::image_pipeline::fits::PixelData::U16($buf) => $body,
            $crate::image_pipeline::fits::PixelData::I32($buf) => $body,
            $crate::image_pipeline::fits::PixelData::U32($buf) => $body,
            $crate::image_pipeline::fits::PixelData::I64($buf) => $body,
            $crate::image_pipeline::fits::PixelData::F32($buf) => $body,
            $crate::image_pipeline::fits::PixelData::F64($buf) => $body,
        }
    };
}

pub(crate) use with_pixels;

impl PixelData {
    pub fn len(&self) -> usize {
        with_pixels!(self, buf => buf.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short dtype name used in log output.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            PixelData::U8(_) => "u8",
            PixelData::I8(_) => "i8",
            PixelData::I16(_) => "i16",
            PixelData::U16(_) => "u16",
            PixelData::I32(_) => "i32",
            PixelData::U32(_) => "u32",
            PixelData::I64(_) => "i64",
            PixelData::F32(_) => "f32",
            PixelData::F64(_) => "f64",
        }
    }
}

/// One HDU of an opened container.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    /// Image axes in row-major order (`[rows, cols]` for a 2-D image).
    /// Empty when the slot carries no image array.
    pub shape: Vec<usize>,
    /// Pixel payload, `None` when the slot has no image data.
    pub pixels: Option<PixelData>,
    pub header: Header,
}

impl ImageSlot {
    pub fn empty(header: Header) -> Self {
        Self {
            shape: Vec::new(),
            pixels: None,
            header,
        }
    }

    pub fn has_payload(&self) -> bool {
        self.pixels.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// The first two slots of a container.
///
/// Tile-compressed files keep an empty primary HDU and store the image in
/// the first extension, so only those two slots are ever consulted.
#[derive(Debug, Clone)]
pub struct ContainerSlots {
    pub primary: ImageSlot,
    pub secondary: Option<ImageSlot>,
}

impl ContainerSlots {
    /// Primary slot if it carries pixels, otherwise the secondary slot if that does.
    pub fn into_payload_slot(self) -> Option<ImageSlot> {
        if self.primary.has_payload() {
            return Some(self.primary);
        }
        self.secondary.filter(ImageSlot::has_payload)
    }
}

/// A single plane ready to be written: row-major pixels plus its header.
#[derive(Debug, Clone)]
pub struct PlaneImage {
    pub width: usize,
    pub height: usize,
    pub pixels: PixelData,
    pub header: Header,
}
