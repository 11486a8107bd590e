//! Discovery of eligible FITS files

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Recognized raw image extensions, matched case-insensitively.
pub const FITS_EXTENSIONS: &[&str] = &[
    ".fit", ".fits", ".fit.gz", ".fits.gz", ".fit.fz", ".fits.fz",
];

/// Report artifact that may sit next to the images and is never a source.
pub const SUMMARY_ARTIFACT: &str = "summary.txt";

/// Files to process and the directory their relative paths are computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub files: Vec<PathBuf>,
    pub root: PathBuf,
}

pub fn is_fits_file(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    FITS_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Collects eligible files under `path`.
///
/// A file is returned alone with its parent directory as root, or not at all
/// when its extension is not recognized. A directory is walked recursively
/// and is its own root; symlinked files and directories are followed and keep
/// their link path. A missing path yields an empty set.
pub fn discover_sources(path: &Path) -> SourceSet {
    if path.is_file() {
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let files = if is_fits_file(path) {
            vec![path.to_path_buf()]
        } else {
            debug!("Ignoring {}: not a FITS file", path.display());
            Vec::new()
        };
        return SourceSet { files, root };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name() != SUMMARY_ARTIFACT)
        .map(|entry| entry.into_path())
        .filter(|p| is_fits_file(p))
        .collect();
    files.sort();

    debug!("Discovered {} FITS files under {}", files.len(), path.display());
    SourceSet {
        files,
        root: path.to_path_buf(),
    }
}
