//! Batch task and outcome types

use std::path::PathBuf;

/// One unit of independent work: a source file and the roots its outputs are
/// resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    pub source_path: PathBuf,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

impl ImageTask {
    pub fn new(
        source_path: impl Into<PathBuf>,
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Base name of the source file, used in error messages and PARENT.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }
}

/// Result of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Ok,
    /// All three outputs were already present.
    Skipped,
    /// `"<filename> - <message>"`
    Error(String),
}
