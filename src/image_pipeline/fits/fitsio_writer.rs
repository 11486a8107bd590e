use std::collections::HashSet;
use std::path::Path;

use fitsio::FitsFile;
use fitsio::images::{ImageDescription, ImageType};
use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::ffi;
use crate::image_pipeline::fits::header::Card;
use crate::image_pipeline::fits::types::{PixelData, PlaneImage, with_pixels};
use crate::image_pipeline::fits::writer::PlaneWriter;

pub struct FitsioWriter;

fn image_type(pixels: &PixelData) -> ImageType {
    match pixels {
        PixelData::U8(_) => ImageType::UnsignedByte,
        PixelData::I8(_) => ImageType::Byte,
        PixelData::I16(_) => ImageType::Short,
        PixelData::U16(_) => ImageType::UnsignedShort,
        PixelData::I32(_) => ImageType::Long,
        PixelData::U32(_) => ImageType::UnsignedLong,
        PixelData::I64(_) => ImageType::LongLong,
        PixelData::F32(_) => ImageType::Float,
        PixelData::F64(_) => ImageType::Double,
    }
}

impl PlaneWriter for FitsioWriter {
    fn write_plane(&self, plane: &PlaneImage, path: &Path) -> Result<()> {
        debug!(
            "Writing {}x{} {} plane to {}",
            plane.width,
            plane.height,
            plane.pixels.dtype_name(),
            path.display()
        );

        let dimensions = [plane.height, plane.width];
        let description = ImageDescription {
            data_type: image_type(&plane.pixels),
            dimensions: &dimensions,
        };

        let mut fptr = FitsFile::create(path)
            .with_custom_primary(&description)
            .overwrite()
            .open()?;
        let hdu = fptr.primary_hdu()?;

        // cfitsio has already written the structural cards, EXTNAME and its
        // COMMENT banner. Source cards repeating any of them are skipped.
        let generated: Vec<Card> = ffi::read_records(&mut fptr)?
            .iter()
            .map(|record| Card::parse(record))
            .collect();
        let generated_keys: HashSet<&str> = generated
            .iter()
            .filter(|card| card.value.is_some())
            .map(|card| card.keyword.as_str())
            .collect();
        let generated_commentary: HashSet<String> = generated
            .iter()
            .filter(|card| card.value.is_none())
            .map(|card| card.to_record().trim_end().to_string())
            .collect();

        for card in plane.header.cards() {
            if card.is_history() {
                ffi::write_history(&mut fptr, card.comment.as_deref().unwrap_or_default())?;
                continue;
            }
            let record = card.to_record();
            let duplicate = match card.value {
                Some(_) => generated_keys.contains(card.keyword.as_str()),
                None => generated_commentary.contains(record.trim_end()),
            };
            if duplicate {
                debug!("Skipping {} card already present in the output", card.keyword);
                continue;
            }
            ffi::write_record(&mut fptr, &record)?;
        }

        with_pixels!(&plane.pixels, buf => hdu.write_image(&mut fptr, buf.as_slice()))?;
        ffi::write_checksum(&mut fptr)?;

        debug!("FITS plane written");
        Ok(())
    }
}
