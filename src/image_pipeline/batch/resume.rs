//! Output path layout and resume detection
//!
//! A source at `<input_root>/<rel_dir>/<name>` maps to
//! `<output_root>/<rel_dir>/{R,G,B}/<name>`. A task is complete only when all
//! three files exist; a partial set is re-derived in full.

use std::fs;
use std::path::{Path, PathBuf};

use crate::image_pipeline::batch::types::ImageTask;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::superpixel::Channel;

/// Destination paths of the three planes of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTargets {
    pub red: PathBuf,
    pub green: PathBuf,
    pub blue: PathBuf,
}

impl ChannelTargets {
    pub fn for_task(task: &ImageTask) -> Self {
        let relative_dir = task
            .source_path
            .strip_prefix(&task.input_root)
            .ok()
            .and_then(Path::parent)
            .unwrap_or(Path::new(""));
        let base = task.output_root.join(relative_dir);
        let file_name = task.source_path.file_name().unwrap_or_default();

        let target = |channel: Channel| base.join(channel.as_str()).join(file_name);
        Self {
            red: target(Channel::Red),
            green: target(Channel::Green),
            blue: target(Channel::Blue),
        }
    }

    pub fn path(&self, channel: Channel) -> &Path {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// True when every plane is already on disk.
    pub fn is_complete(&self) -> bool {
        Channel::ALL.iter().all(|&c| self.path(c).exists())
    }

    /// Creates the R, G and B directories; existing ones are fine.
    pub fn create_dirs(&self) -> Result<()> {
        for channel in Channel::ALL {
            if let Some(dir) = self.path(channel).parent() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}
