//! Container reader backed by cfitsio through the `fitsio` crate.
//!
//! cfitsio decompresses gzip files and tile-compressed (`.fz`) images
//! transparently, so every recognized extension goes through the same path.

use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::images::ImageType;
use tracing::debug;

use crate::image_pipeline::common::error::{Result, SplitError};
use crate::image_pipeline::fits::ffi;
use crate::image_pipeline::fits::header::Header;
use crate::image_pipeline::fits::reader::CfaImageReader;
use crate::image_pipeline::fits::types::{ContainerSlots, ImageSlot, PixelData};

pub struct FitsioReader;

impl CfaImageReader for FitsioReader {
    fn read_slots(&self, path: &Path) -> Result<ContainerSlots> {
        let mut fptr = FitsFile::open(path)?;

        let primary = read_slot(&mut fptr, 0)?;
        let secondary = if !primary.has_payload() && fptr.hdu(1).is_ok() {
            Some(read_slot(&mut fptr, 1)?)
        } else {
            None
        };

        Ok(ContainerSlots { primary, secondary })
    }
}

fn read_slot(fptr: &mut FitsFile, index: usize) -> Result<ImageSlot> {
    let hdu = fptr.hdu(index)?;
    let header = Header::from_records(ffi::read_records(fptr)?);

    let HduInfo::ImageInfo { shape, image_type } = &hdu.info else {
        debug!(index, "HDU is not an image");
        return Ok(ImageSlot::empty(header));
    };

    if shape.is_empty() || shape.contains(&0) {
        debug!(index, ?shape, "image HDU carries no data");
        return Ok(ImageSlot::empty(header));
    }

    let pixels = read_pixels(fptr, &hdu, image_type)?;
    debug!(index, ?shape, dtype = pixels.dtype_name(), "read image HDU");

    Ok(ImageSlot {
        shape: shape.clone(),
        pixels: Some(pixels),
        header,
    })
}

fn read_pixels(fptr: &mut FitsFile, hdu: &FitsHdu, image_type: &ImageType) -> Result<PixelData> {
    let pixels = match image_type {
        ImageType::UnsignedByte => PixelData::U8(hdu.read_image(fptr)?),
        ImageType::Byte => PixelData::I8(hdu.read_image(fptr)?),
        ImageType::Short => PixelData::I16(hdu.read_image(fptr)?),
        ImageType::UnsignedShort => PixelData::U16(hdu.read_image(fptr)?),
        ImageType::Long => PixelData::I32(hdu.read_image(fptr)?),
        ImageType::UnsignedLong => PixelData::U32(hdu.read_image(fptr)?),
        ImageType::LongLong => PixelData::I64(hdu.read_image(fptr)?),
        ImageType::Float => PixelData::F32(hdu.read_image(fptr)?),
        ImageType::Double => PixelData::F64(hdu.read_image(fptr)?),
        #[allow(unreachable_patterns)]
        other => {
            return Err(SplitError::Container(format!(
                "unsupported image type {other:?}"
            )));
        }
    };
    Ok(pixels)
}
