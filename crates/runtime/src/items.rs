//! Per-item runtime: binds one item's state machine to its physics body and
//! behavior hooks, and realizes attach effects against the joint manager.

use item_core::{
    ActionEvent, AttachEffect, ItemAction, ItemEventHandler, ItemKindSpec, ItemState, PartId,
    PickupSettings, TransitionError, UseSource, route_action,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::physics::{AnchorEvent, BodyId, JointManager};

/// The persisted portion of an item's runtime state.
///
/// Only the anchor flag survives a save/load cycle; the joint itself is
/// rebuilt on unpack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub static_attached: bool,
}

/// One live item instance.
pub struct ItemRuntime {
    state: ItemState,
    body: BodyId,
    handler: Box<dyn ItemEventHandler>,
}

impl ItemRuntime {
    pub fn new(spec: &ItemKindSpec, body: BodyId, handler: Box<dyn ItemEventHandler>) -> Self {
        Self {
            state: ItemState::new(spec),
            body,
            handler,
        }
    }

    /// Rebuilds an item from a save. If the snapshot says attached, the
    /// anchor is recreated on the next unpack notification.
    pub fn restore(
        spec: &ItemKindSpec,
        body: BodyId,
        handler: Box<dyn ItemEventHandler>,
        snapshot: ItemSnapshot,
    ) -> Self {
        Self {
            state: ItemState::with_persisted(spec, snapshot.static_attached),
            body,
            handler,
        }
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            static_attached: self.state.is_static_attached(),
        }
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    // ===== pickup controller entry points =====

    /// Handles one semantic action from the pickup/drag controller: updates
    /// the item's location classification and drives the anchor transitions.
    pub fn handle_action(&mut self, event: ActionEvent, joints: &mut JointManager) {
        match event.action {
            ItemAction::Store => self.state.store(),
            ItemAction::DropEnd => self.state.drop_free(),
            ItemAction::AttachStart => {}
            ItemAction::AttachEnd => match event.target_part {
                Some(_) => self.state.attach_to_part(),
                None => self.state.drop_free(),
            },
        }
        let effect = route_action(&mut self.state, event);
        debug!(?event, ?effect, body = ?self.body, "routed pickup action");
        self.apply_effect(effect, joints);
    }

    /// Explicit ground attach, bypassing the router (e.g. a debug action).
    pub fn request_ground_attach(&mut self, joints: &mut JointManager) {
        let effect = self.state.request_ground_attach();
        self.apply_effect(effect, joints);
    }

    /// Explicit ground detach.
    pub fn request_ground_detach(&mut self, joints: &mut JointManager) {
        let effect = self.state.request_ground_detach();
        self.apply_effect(effect, joints);
    }

    // ===== lifecycle notifications =====

    /// The item's body switched from packed to full simulation. Rebuilds a
    /// persisted anchor, since joints never survive a pack cycle.
    pub fn on_part_unpacked(&mut self, joints: &mut JointManager) {
        let effect = self.state.on_part_unpacked();
        if effect.is_some() {
            warn!(body = ?self.body, "re-attaching persisted ground anchor after unpack");
        }
        self.apply_effect(effect, joints);
    }

    /// Routes a joint-manager notification for this item's body.
    pub fn absorb(&mut self, event: AnchorEvent, joints: &mut JointManager) {
        match event {
            AnchorEvent::Created { body, joint } if body == self.body => {
                self.state.anchor_created(joint);
            }
            AnchorEvent::Broken {
                body,
                observed_force,
            } if body == self.body => {
                warn!(?body, observed_force, "ground anchor broke, detaching item");
                let effect = self.state.on_joint_broken(observed_force);
                self.apply_effect(effect, joints);
            }
            _ => {}
        }
    }

    // ===== inventory-driven transitions =====

    /// Equips the item, firing the equip hook when the location changed.
    pub fn equip(&mut self, pickup: &mut PickupSettings) -> Result<(), TransitionError> {
        if self.state.equip()? {
            self.handler.on_equip(pickup);
        }
        Ok(())
    }

    /// Unequips the item, firing the unequip hook when it was equipped.
    pub fn unequip(&mut self, pickup: &mut PickupSettings) {
        if self.state.unequip() {
            self.handler.on_unequip(pickup);
        }
    }

    /// Carries the item on the agent's body.
    pub fn carry(&mut self) -> Result<(), TransitionError> {
        self.state.carry()?;
        Ok(())
    }

    /// Forwards a use request to the kind-specific behavior.
    pub fn use_item(&mut self, source: UseSource) {
        self.handler.on_item_use(source);
    }

    /// Forwards a drag-onto-part notification to the behavior.
    pub fn drag_to_part(&mut self, target: PartId) {
        self.handler.on_drag_to_part(target);
    }

    /// Forwards a drag-into-inventory notification to the behavior.
    pub fn drag_to_inventory(&mut self, slot: usize) {
        self.handler.on_drag_to_inventory(slot);
    }

    fn apply_effect(&mut self, effect: Option<AttachEffect>, joints: &mut JointManager) {
        match effect {
            Some(AttachEffect::ScheduleAnchor {
                break_force,
                break_torque,
            }) => joints.create_anchor(self.body, break_force, break_torque),
            Some(AttachEffect::ReleaseAnchor) => joints.destroy_anchor(self.body),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::{AttachToolBehavior, ItemAttachMode};

    use crate::physics::{BodyStatus, PhysicsWorld};

    struct NoopBehavior;
    impl ItemEventHandler for NoopBehavior {}

    fn spec() -> ItemKindSpec {
        ItemKindSpec {
            static_attach: ItemAttachMode::AllowedAlways,
            static_attach_break_force: 12.0,
            equippable: true,
            ..ItemKindSpec::default()
        }
    }

    fn settle(item: &mut ItemRuntime, joints: &mut JointManager, world: &mut PhysicsWorld) {
        for event in joints.step(world) {
            item.absorb(event, joints);
        }
    }

    #[test]
    fn anchor_flag_and_joint_agree_after_settling() {
        let mut world = PhysicsWorld::new();
        let body = world.spawn_body(BodyStatus::Active);
        let mut joints = JointManager::new();
        let mut item = ItemRuntime::new(&spec(), body, Box::new(NoopBehavior));

        item.request_ground_attach(&mut joints);
        settle(&mut item, &mut joints, &mut world);
        assert!(item.state().is_static_attached());
        assert_eq!(item.state().joint(), joints.active_anchor(body));

        item.request_ground_detach(&mut joints);
        assert!(!item.state().is_static_attached());
        assert_eq!(joints.active_anchor(body), None);
        assert_eq!(item.state().joint(), None);
    }

    #[test]
    fn snapshot_round_trips_the_anchor_flag() {
        let mut world = PhysicsWorld::new();
        let body = world.spawn_body(BodyStatus::Active);
        let mut joints = JointManager::new();
        let mut item = ItemRuntime::new(&spec(), body, Box::new(NoopBehavior));
        item.request_ground_attach(&mut joints);

        let json = serde_json::to_string(&item.snapshot()).unwrap();
        let snapshot: ItemSnapshot = serde_json::from_str(&json).unwrap();
        assert!(snapshot.static_attached);

        let body2 = world.spawn_body(BodyStatus::Active);
        let mut restored = ItemRuntime::restore(&spec(), body2, Box::new(NoopBehavior), snapshot);
        assert!(restored.state().is_static_attached());
        assert_eq!(restored.state().joint(), None);

        // Unpack rebuilds the joint.
        restored.on_part_unpacked(&mut joints);
        settle(&mut restored, &mut joints, &mut world);
        assert_eq!(restored.state().joint(), joints.active_anchor(body2));
    }

    #[test]
    fn equip_unequip_pair_restores_pickup_settings() {
        let mut world = PhysicsWorld::new();
        let body = world.spawn_body(BodyStatus::Active);
        let mut item = ItemRuntime::new(
            &spec(),
            body,
            Box::new(AttachToolBehavior {
                tool_static_attach: true,
                ..AttachToolBehavior::default()
            }),
        );

        let mut pickup = PickupSettings::default();
        let before = pickup.clone();
        item.equip(&mut pickup).unwrap();
        assert!(pickup.allow_static_attach);
        item.unequip(&mut pickup);
        assert_eq!(pickup, before);
    }

    #[test]
    fn double_equip_fires_hook_once() {
        let mut world = PhysicsWorld::new();
        let body = world.spawn_body(BodyStatus::Active);
        let mut item = ItemRuntime::new(
            &spec(),
            body,
            Box::new(AttachToolBehavior::default()),
        );

        let mut pickup = PickupSettings::default();
        let before = pickup.clone();
        item.equip(&mut pickup).unwrap();
        item.equip(&mut pickup).unwrap();
        item.unequip(&mut pickup);
        assert_eq!(pickup, before);
    }
}
