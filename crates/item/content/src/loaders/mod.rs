//! Loaders for reading stowage data from files.
//!
//! All loaders use the record formats defined in [`crate::formats`] and
//! return [`LoadResult`]. A missing or invalid configuration source is never
//! fatal: callers fall back to compiled-in defaults.

pub mod config;
pub mod mounts;

pub use config::ConfigLoader;
pub use mounts::MountLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
