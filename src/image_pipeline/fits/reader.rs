use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::ContainerSlots;

pub trait CfaImageReader: Send + Sync {
    fn read_slots(&self, path: &Path) -> Result<ContainerSlots>;
}
