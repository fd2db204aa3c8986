//! The canonical per-item state machine.
//!
//! Transitions are pure: instead of touching the physics simulation they
//! return an [`AttachEffect`] describing the anchor work the owning runtime
//! must perform. This keeps the state machine deterministic and directly
//! testable.

use crate::item::spec::{ItemAttachMode, ItemKindSpec};
use crate::types::JointId;

/// Mutually-exclusive classification of where an item currently is.
///
/// A ground anchor (`static_attached`) is orthogonal information that is only
/// meaningful while the item is [`ItemLocation::Free`]; the combination of
/// `Free` + anchored is what UIs present as "static attached".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemLocation {
    /// Inside a container inventory slot.
    Stored,
    /// On the agent's body, not occupying a slot.
    Carried,
    /// On the agent's body and usable via the use key.
    Equipped,
    /// Logically part of another structure.
    PartAttached,
    /// A free-standing physical object in the world.
    #[default]
    Free,
}

/// Anchor work requested by a state transition.
///
/// The runtime realizes these against the joint manager; the state machine
/// never owns physics resources directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttachEffect {
    /// Create (or recreate) the ground anchor once the body is ready.
    ScheduleAnchor { break_force: f32, break_torque: f32 },
    /// Destroy the active ground anchor.
    ReleaseAnchor,
}

/// Errors surfaced by equip/carry transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("item kind is not equippable")]
    NotEquippable,
    #[error("item kind is not carriable")]
    NotCarriable,
}

/// Runtime state of one physical item instance.
///
/// Created when the item's behavior extension awakens and destroyed with the
/// owning part. Only `static_attached` survives a save/load cycle; the joint
/// handle is rebuilt by [`ItemState::on_part_unpacked`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    /// Ground/world anchor policy for this item kind. Immutable once loaded.
    attach_mode: ItemAttachMode,
    /// Persisted flag: true iff the item currently has an active ground
    /// anchor (or one is being rebuilt after unpack).
    static_attached: bool,
    break_force: f32,
    break_torque: f32,
    /// Present iff the anchor joint has been realized. Exclusively owned by
    /// this item instance.
    #[cfg_attr(feature = "serde", serde(skip))]
    joint: Option<JointId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    location: ItemLocation,
    #[cfg_attr(feature = "serde", serde(skip))]
    equippable: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    carriable: bool,
}

impl ItemState {
    pub fn new(spec: &ItemKindSpec) -> Self {
        Self {
            attach_mode: spec.static_attach,
            static_attached: false,
            break_force: spec.static_attach_break_force,
            break_torque: spec.break_torque(),
            joint: None,
            location: ItemLocation::Free,
            equippable: spec.equippable,
            carriable: spec.carriable,
        }
    }

    /// Rebuilds an item state from its persisted flag, as read from a save.
    /// The anchor joint itself is rebuilt later by [`ItemState::on_part_unpacked`].
    pub fn with_persisted(spec: &ItemKindSpec, static_attached: bool) -> Self {
        Self {
            static_attached,
            ..Self::new(spec)
        }
    }

    pub fn attach_mode(&self) -> ItemAttachMode {
        self.attach_mode
    }

    pub fn location(&self) -> ItemLocation {
        self.location
    }

    pub fn is_static_attached(&self) -> bool {
        self.static_attached
    }

    pub fn joint(&self) -> Option<JointId> {
        self.joint
    }

    pub fn break_force(&self) -> f32 {
        self.break_force
    }

    // ===== ground anchor transitions =====

    /// Requests a ground/world anchor for this item.
    ///
    /// Silent no-op when the kind policy forbids static attach; callers are
    /// expected to have consulted the policy already, but the guard is
    /// re-checked here. Idempotent: requesting while already attached
    /// re-issues the schedule so the joint is recreated.
    pub fn request_ground_attach(&mut self) -> Option<AttachEffect> {
        if !self.attach_mode.allows_attach() {
            return None;
        }
        self.static_attached = true;
        Some(AttachEffect::ScheduleAnchor {
            break_force: self.break_force,
            break_torque: self.break_torque,
        })
    }

    /// Releases the ground anchor if present. No-op when not attached.
    pub fn request_ground_detach(&mut self) -> Option<AttachEffect> {
        if !self.static_attached {
            return None;
        }
        self.static_attached = false;
        self.joint = None;
        Some(AttachEffect::ReleaseAnchor)
    }

    /// Lifecycle hook: the item's physical representation just switched from
    /// the packed to the full simulation form. Joints do not survive a
    /// pack/unpack cycle, so a persisted anchor must be rebuilt.
    ///
    /// No-op when the kind policy is disabled, even if the persisted flag
    /// says attached: the policy may have changed between saves.
    pub fn on_part_unpacked(&mut self) -> Option<AttachEffect> {
        if !self.attach_mode.allows_attach() {
            return None;
        }
        if self.static_attached {
            return self.request_ground_attach();
        }
        None
    }

    /// The physical anchor failed under load. Always detaches; there is no
    /// retry at the same strength. A fresh attach requires a new explicit
    /// action.
    pub fn on_joint_broken(&mut self, _observed_force: f32) -> Option<AttachEffect> {
        self.request_ground_detach()
    }

    /// Records the joint handle once the deferred creation resolves.
    /// Replaces any stale handle from a prior anchor.
    pub fn anchor_created(&mut self, joint: JointId) {
        self.joint = Some(joint);
    }

    // ===== inventory-driven transitions =====

    /// Moves the item into a container slot.
    pub fn store(&mut self) {
        self.location = ItemLocation::Stored;
    }

    /// Attaches the item to the agent's body without occupying a slot.
    /// Returns true when the location actually changed.
    pub fn carry(&mut self) -> Result<bool, TransitionError> {
        if !self.carriable {
            return Err(TransitionError::NotCarriable);
        }
        Ok(self.move_to(ItemLocation::Carried))
    }

    /// Equips the item on the agent. Returns true when the location actually
    /// changed, so the caller knows whether to fire the equip hook.
    pub fn equip(&mut self) -> Result<bool, TransitionError> {
        if !self.equippable {
            return Err(TransitionError::NotEquippable);
        }
        Ok(self.move_to(ItemLocation::Equipped))
    }

    /// Returns the item to its inventory slot. Returns true when it was
    /// equipped, so the caller knows whether to fire the unequip hook.
    pub fn unequip(&mut self) -> bool {
        let was_equipped = self.location == ItemLocation::Equipped;
        self.location = ItemLocation::Stored;
        was_equipped
    }

    /// The item became logically part of another structure.
    pub fn attach_to_part(&mut self) {
        self.location = ItemLocation::PartAttached;
    }

    /// The item became a free-standing physical object in the world.
    pub fn drop_free(&mut self) {
        self.location = ItemLocation::Free;
    }

    fn move_to(&mut self, location: ItemLocation) -> bool {
        let changed = self.location != location;
        self.location = location;
        changed
    }
}
