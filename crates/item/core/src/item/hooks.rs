//! Behavior extension points for item-kind-specific logic.
//!
//! Kind-specific behavior hangs off [`ItemEventHandler`], a capability trait
//! with optional hooks invoked by the owning runtime. Implementations are
//! dispatched through the trait object, never through inheritance.

use crate::config::PickupSettings;
use crate::types::PartId;

/// Where a "use item" request originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseSource {
    /// Use key pressed while the item is equipped.
    KeyDown,
    /// Use key released.
    KeyUp,
    /// Use action chosen from the inventory context menu.
    ContextMenu,
}

/// Optional hooks a kind-specific behavior can implement.
///
/// Every hook defaults to a no-op so implementations only override what they
/// need. The equip/unequip pair is guaranteed to be balanced by the state
/// machine: `on_unequip` fires exactly once per successful `on_equip`.
pub trait ItemEventHandler {
    /// The item was equipped. `pickup` is the owning agent's live pickup
    /// configuration, which the handler may temporarily override.
    fn on_equip(&mut self, pickup: &mut PickupSettings) {
        let _ = pickup;
    }

    /// The item was unequipped. Any configuration overridden in `on_equip`
    /// must be restored to its literal prior value here.
    fn on_unequip(&mut self, pickup: &mut PickupSettings) {
        let _ = pickup;
    }

    /// The item's use action fired.
    fn on_item_use(&mut self, source: UseSource) {
        let _ = source;
    }

    /// The item was dragged onto another part.
    fn on_drag_to_part(&mut self, target: PartId) {
        let _ = target;
    }

    /// The item was dragged into a container inventory slot.
    fn on_drag_to_inventory(&mut self, slot: usize) {
        let _ = slot;
    }
}

/// Behavior for items that act as attach tools.
///
/// While equipped, the tool overrides the agent's pickup policy (what can be
/// attached and which cues play) with its own values. On unequip the exact
/// previous values are written back, not defaults.
#[derive(Clone, Debug)]
pub struct AttachToolBehavior {
    pub tool_part_attach: bool,
    pub tool_static_attach: bool,
    pub tool_part_stack: bool,
    pub attach_part_cue: String,
    pub detach_part_cue: String,
    pub attach_static_cue: String,
    pub detach_static_cue: String,

    pub saved: Option<SavedPickupValues>,
}

#[derive(Clone, Debug)]
pub struct SavedPickupValues {
    allow_part_attach: bool,
    allow_static_attach: bool,
    allow_part_stack: bool,
    attach_part_cue: String,
    detach_part_cue: String,
    attach_static_cue: String,
    detach_static_cue: String,
}

impl Default for AttachToolBehavior {
    fn default() -> Self {
        Self {
            tool_part_attach: true,
            tool_static_attach: false,
            tool_part_stack: false,
            attach_part_cue: "cues/attachPart".into(),
            detach_part_cue: "cues/detachPart".into(),
            attach_static_cue: "cues/attachStatic".into(),
            detach_static_cue: "cues/detachStatic".into(),
            saved: None,
        }
    }
}

impl ItemEventHandler for AttachToolBehavior {
    fn on_equip(&mut self, pickup: &mut PickupSettings) {
        self.saved = Some(SavedPickupValues {
            allow_part_attach: pickup.allow_part_attach,
            allow_static_attach: pickup.allow_static_attach,
            allow_part_stack: pickup.allow_part_stack,
            attach_part_cue: pickup.attach_part_cue.clone(),
            detach_part_cue: pickup.detach_part_cue.clone(),
            attach_static_cue: pickup.attach_static_cue.clone(),
            detach_static_cue: pickup.detach_static_cue.clone(),
        });
        pickup.allow_part_attach = self.tool_part_attach;
        pickup.allow_static_attach = self.tool_static_attach;
        pickup.allow_part_stack = self.tool_part_stack;
        pickup.attach_part_cue = self.attach_part_cue.clone();
        pickup.detach_part_cue = self.detach_part_cue.clone();
        pickup.attach_static_cue = self.attach_static_cue.clone();
        pickup.detach_static_cue = self.detach_static_cue.clone();
    }

    fn on_unequip(&mut self, pickup: &mut PickupSettings) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        pickup.allow_part_attach = saved.allow_part_attach;
        pickup.allow_static_attach = saved.allow_static_attach;
        pickup.allow_part_stack = saved.allow_part_stack;
        pickup.attach_part_cue = saved.attach_part_cue;
        pickup.detach_part_cue = saved.detach_part_cue;
        pickup.attach_static_cue = saved.attach_static_cue;
        pickup.detach_static_cue = saved.detach_static_cue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_overrides_and_restores_literal_values() {
        let mut pickup = PickupSettings {
            allow_part_attach: false,
            allow_static_attach: true,
            allow_part_stack: false,
            attach_part_cue: "custom/clank".into(),
            ..PickupSettings::default()
        };
        let before = pickup.clone();

        let mut tool = AttachToolBehavior {
            tool_part_attach: true,
            tool_static_attach: false,
            tool_part_stack: true,
            ..AttachToolBehavior::default()
        };

        tool.on_equip(&mut pickup);
        assert!(pickup.allow_part_attach);
        assert!(!pickup.allow_static_attach);
        assert!(pickup.allow_part_stack);
        assert_eq!(pickup.attach_part_cue, "cues/attachPart");

        tool.on_unequip(&mut pickup);
        assert_eq!(pickup, before);
    }

    #[test]
    fn unequip_without_equip_is_noop() {
        let mut pickup = PickupSettings::default();
        let before = pickup.clone();
        let mut tool = AttachToolBehavior::default();
        tool.on_unequip(&mut pickup);
        assert_eq!(pickup, before);
    }
}
