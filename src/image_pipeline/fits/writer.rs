use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::PlaneImage;

pub trait PlaneWriter: Send + Sync {
    /// Writes one plane, replacing any existing file at `path`.
    fn write_plane(&self, plane: &PlaneImage, path: &Path) -> Result<()>;
}
