//! Project-root discovery.

use std::path::{Path, PathBuf};

/// Looks for `name` in `start` and up to `iterations - 1` of its ancestors.
pub fn find_upwards(start: &Path, name: &str, iterations: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(iterations)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// The directory holding the nearest `marker`.
pub fn base(start: &Path, marker: &str, iterations: usize) -> Option<PathBuf> {
    find_upwards(start, marker, iterations)?
        .parent()
        .map(Path::to_path_buf)
}
