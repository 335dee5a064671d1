//! Module discovery: lists candidate module files in a directory.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Lists every entry of `dir` whose file name ends in `extension`.
///
/// Subdirectories are not descended into, and no filtering other than the
/// name suffix is applied. A missing or unreadable directory yields an empty
/// list. Candidates are sorted by file name so repeated scans of the same
/// directory bind modules in the same order.
pub fn discover_modules(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "Module directory not readable");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .ends_with(extension)
        })
        .map(|entry| entry.path())
        .collect();

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), candidates = found.len(), "Module directory scanned");

    found
}
