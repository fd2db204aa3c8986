//! Mount definition loader.
//!
//! Converts [`MountRecord`]s into a [`MountSet`], un-escaping the reserved
//! `.` character in kind identifiers (written as `_` on disk, where `.` is
//! not representable).

use std::path::Path;

use item_core::{AttachNodeId, Mount, MountSet};

use crate::formats::MountRecord;
use crate::loaders::{LoadResult, read_file};

/// Loader for container mount definitions from RON files.
pub struct MountLoader;

impl MountLoader {
    /// Load a container's mount set from a RON file.
    pub fn load(path: &Path) -> LoadResult<MountSet> {
        let content = read_file(path)?;
        let records: Vec<MountRecord> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mount RON at {:?}: {}", path, e))?;

        Ok(Self::from_records(records))
    }

    /// Build a mount set from already-parsed records.
    pub fn from_records(records: Vec<MountRecord>) -> MountSet {
        let mounts = records
            .into_iter()
            .map(|record| {
                Mount::new(
                    AttachNodeId::new(record.attach_node),
                    record.allowed_kinds.iter().map(|k| unescape_kind_id(k)),
                )
            })
            .collect();
        MountSet::new(mounts)
    }
}

/// Un-escapes a kind identifier: `_` stands in for the reserved `.`.
pub fn unescape_kind_id(escaped: &str) -> String {
    escaped.replace('_', ".")
}
