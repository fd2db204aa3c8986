//! Structural mounts: named attach points that accept a restricted set of
//! item kinds.

use std::collections::BTreeSet;

use crate::types::{AttachNodeId, PartId};

/// One structural attach point on a container part.
///
/// A mount is occupied iff its attach node currently references an attached
/// sub-structure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mount {
    pub node: AttachNodeId,
    /// Item kind identifiers accepted by this mount.
    pub allowed_kinds: BTreeSet<String>,
    /// The part currently occupying the mount, if any.
    pub attached: Option<PartId>,
}

impl Mount {
    pub fn new(node: AttachNodeId, allowed_kinds: impl IntoIterator<Item = String>) -> Self {
        Self {
            node,
            allowed_kinds: allowed_kinds.into_iter().collect(),
            attached: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.attached.is_some()
    }

    pub fn accepts_kind(&self, kind: &str) -> bool {
        self.allowed_kinds.contains(kind)
    }
}

/// All mounts on one container part, each independently occupied or free.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountSet {
    mounts: Vec<Mount>,
    /// Whether the container exposes a release action at all.
    pub allow_release: bool,
}

impl MountSet {
    pub fn new(mounts: Vec<Mount>) -> Self {
        Self {
            mounts,
            allow_release: true,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mount> {
        self.mounts.iter()
    }

    pub fn get_mut(&mut self, node: &AttachNodeId) -> Option<&mut Mount> {
        self.mounts.iter_mut().find(|m| &m.node == node)
    }

    /// True when the given part occupies any mount on this container.
    pub fn part_is_mounted(&self, part: PartId) -> bool {
        self.mounts.iter().any(|m| m.attached == Some(part))
    }

    /// Decouples the first occupied mount, returning the released part.
    /// Mirrors the container's "Release" context action.
    pub fn release_first_occupied(&mut self) -> Option<PartId> {
        self.mounts
            .iter_mut()
            .find(|m| m.is_occupied())
            .and_then(|m| m.attached.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_mounts() -> MountSet {
        MountSet::new(vec![
            Mount::new(AttachNodeId::new("top"), ["smallCrate".to_string()]),
            Mount::new(
                AttachNodeId::new("bottom"),
                ["largeCrate".to_string(), "smallCrate".to_string()],
            ),
        ])
    }

    #[test]
    fn occupancy_is_tracked_per_mount() {
        let mut mounts = two_mounts();
        assert!(!mounts.part_is_mounted(PartId(1)));

        mounts
            .get_mut(&AttachNodeId::new("bottom"))
            .unwrap()
            .attached = Some(PartId(1));
        assert!(mounts.part_is_mounted(PartId(1)));
        assert!(!mounts.get_mut(&AttachNodeId::new("top")).unwrap().is_occupied());
    }

    #[test]
    fn release_frees_the_first_occupied_mount_only() {
        let mut mounts = two_mounts();
        mounts.get_mut(&AttachNodeId::new("top")).unwrap().attached = Some(PartId(2));
        mounts
            .get_mut(&AttachNodeId::new("bottom"))
            .unwrap()
            .attached = Some(PartId(3));

        assert_eq!(mounts.release_first_occupied(), Some(PartId(2)));
        assert!(mounts.part_is_mounted(PartId(3)));
        assert_eq!(mounts.release_first_occupied(), Some(PartId(3)));
        assert_eq!(mounts.release_first_occupied(), None);
    }

    #[test]
    fn kind_filtering() {
        let mounts = two_mounts();
        let top = mounts.iter().next().unwrap();
        assert!(top.accepts_kind("smallCrate"));
        assert!(!top.accepts_kind("largeCrate"));
    }
}
