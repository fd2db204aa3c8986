//! Stowage configuration loader.

use std::path::Path;

use item_core::StowageConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for the stowage settings tree from RON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the configuration snapshot from a RON file.
    ///
    /// Sections absent from the file keep their compiled-in defaults.
    pub fn load(path: &Path) -> LoadResult<StowageConfig> {
        let content = read_file(path)?;
        let config: StowageConfig = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse settings RON at {:?}: {}", path, e))?;

        Ok(config)
    }

    /// Load the configuration snapshot, falling back to defaults.
    ///
    /// A missing or unparsable settings source is logged and the process
    /// continues with [`StowageConfig::default`]; it never fails the load.
    pub fn load_or_default(path: &Path) -> StowageConfig {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Settings not found or invalid, using defaults: {e:#}");
                StowageConfig::default()
            }
        }
    }
}
