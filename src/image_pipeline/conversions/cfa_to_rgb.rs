use std::path::Path;

use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    batch::ChannelTargets,
    common::error::{Result, SplitError},
    conversions::provenance,
    fits::{CfaImageReader, FitsioReader, FitsioWriter, PlaneImage, PlaneWriter},
    superpixel,
};

/// Turns one RGGB CFA file into three single-channel files.
///
/// Holds no per-file state, so one pipeline is shared by every worker.
pub struct CfaToRgbPipeline<R: CfaImageReader, W: PlaneWriter> {
    reader: R,
    writer: W,
}

impl CfaToRgbPipeline<FitsioReader, FitsioWriter> {
    pub fn new() -> Self {
        Self {
            reader: FitsioReader,
            writer: FitsioWriter,
        }
    }
}

impl Default for CfaToRgbPipeline<FitsioReader, FitsioWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CfaImageReader, W: PlaneWriter> CfaToRgbPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads `source`, validates it and writes the R, G and B planes to `targets`.
    ///
    /// Every rejection happens before the first write, so a rejected file
    /// leaves nothing behind.
    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn extract(&self, source: &Path, targets: &ChannelTargets) -> Result<()> {
        let slots = {
            let _span = tracing::info_span!("read_container").entered();
            self.reader.read_slots(source)?
        };

        let slot = slots.into_payload_slot().ok_or(SplitError::NoPayload)?;

        let (height, width) = match slot.shape.as_slice() {
            &[height, width] => (height, width),
            shape => return Err(SplitError::WrongDimensionality(shape.len())),
        };

        if provenance::is_already_processed(&slot.header) {
            return Err(SplitError::AlreadyProcessed);
        }

        let pixels = slot.pixels.as_ref().ok_or(SplitError::NoPayload)?;
        let planes = {
            let _span = tracing::info_span!("superpixel_split", width, height).entered();
            superpixel::split_pixels(pixels, width, height)?
        };

        let parent = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();
        let (plane_width, plane_height) = (planes.width, planes.height);

        for (channel, plane_pixels) in planes.into_channels() {
            let _span = tracing::info_span!("write_plane", %channel).entered();
            let plane = PlaneImage {
                width: plane_width,
                height: plane_height,
                pixels: plane_pixels,
                header: provenance::channel_header(&slot.header, channel, &parent, &timestamp),
            };
            let target = targets.path(channel);
            self.writer.write_plane(&plane, target)?;
            debug!(path = %target.display(), "{} plane written", channel);
        }

        info!(
            width = plane_width,
            height = plane_height,
            "Extraction complete"
        );
        Ok(())
    }
}
