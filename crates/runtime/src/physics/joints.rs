//! The joint manager: owns the breakable constraint that pins a free item
//! to the static world frame.
//!
//! Anchor creation is deferred: a request becomes a pending entry that is
//! polled once per physics step until the owning body is fully initialized.
//! The wait is cancellable only by the body's destruction, in which case
//! creation is abandoned silently.

use item_core::JointId;
use tracing::{debug, warn};

use crate::physics::world::{BodyId, BodyStatus, PhysicsWorld};

/// An active breakable constraint between a body and the world frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorJoint {
    pub id: JointId,
    pub body: BodyId,
    pub break_force: f32,
    pub break_torque: f32,
}

/// Notifications produced while stepping or by the simulation.
///
/// The owner routes these to the item state machine that owns the body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorEvent {
    /// A deferred anchor resolved into a live joint.
    Created { body: BodyId, joint: JointId },
    /// The constraint failed under load and has been released.
    Broken { body: BodyId, observed_force: f32 },
}

#[derive(Clone, Copy, Debug)]
struct PendingAnchor {
    body: BodyId,
    break_force: f32,
    break_torque: f32,
}

/// Creates and destroys anchor joints, one per body at most.
#[derive(Debug, Default)]
pub struct JointManager {
    joints: Vec<AnchorJoint>,
    pending: Vec<PendingAnchor>,
    next_joint: u64,
}

impl JointManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an anchor for `body` with the given failure thresholds.
    ///
    /// Creation is deferred until the body is active; any prior joint on the
    /// body is destroyed at that point, so at most one anchor ever exists
    /// per body. A newer request supersedes a still-pending one.
    pub fn create_anchor(&mut self, body: BodyId, break_force: f32, break_torque: f32) {
        self.pending.retain(|p| p.body != body);
        self.pending.push(PendingAnchor {
            body,
            break_force,
            break_torque,
        });
    }

    /// Releases the anchor on `body` if present, and cancels any pending
    /// creation. Safe to call when none exists.
    pub fn destroy_anchor(&mut self, body: BodyId) {
        self.pending.retain(|p| p.body != body);
        if let Some(pos) = self.joints.iter().position(|j| j.body == body) {
            let joint = self.joints.swap_remove(pos);
            debug!(?body, joint = joint.id.0, "destroyed ground anchor");
        }
    }

    pub fn active_anchor(&self, body: BodyId) -> Option<JointId> {
        self.joints.iter().find(|j| j.body == body).map(|j| j.id)
    }

    /// Number of live joints across all bodies.
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// True while any anchor creation is still waiting on its body.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Polls every pending anchor once. Called once per physics step.
    ///
    /// Bodies still initializing stay pending; destroyed bodies have their
    /// request abandoned silently; active bodies get their joint created and
    /// their structure marked as landed.
    pub fn step(&mut self, world: &mut PhysicsWorld) -> Vec<AnchorEvent> {
        let mut events = Vec::new();
        let mut still_pending = Vec::new();

        for pending in self.pending.drain(..) {
            match world.status(pending.body) {
                BodyStatus::Initializing => still_pending.push(pending),
                BodyStatus::Destroyed => {
                    // The action is moot; no error surfaced.
                    debug!(body = ?pending.body, "anchor creation abandoned, body destroyed");
                }
                BodyStatus::Active => {
                    if let Some(pos) = self.joints.iter().position(|j| j.body == pending.body) {
                        self.joints.swap_remove(pos);
                    }
                    let joint = JointId(self.next_joint);
                    self.next_joint += 1;
                    self.joints.push(AnchorJoint {
                        id: joint,
                        body: pending.body,
                        break_force: pending.break_force,
                        break_torque: pending.break_torque,
                    });
                    world.set_landed(pending.body, true);
                    debug!(body = ?pending.body, joint = joint.0, "created ground anchor");
                    events.push(AnchorEvent::Created {
                        body: pending.body,
                        joint,
                    });
                }
            }
        }

        self.pending = still_pending;
        events
    }

    /// The simulation reports that the constraint on `body` exceeded its
    /// load threshold. Clears the manager's reference and forwards the break
    /// to the owner; the joint is never recreated from here.
    pub fn notify_overload(&mut self, body: BodyId, observed_force: f32) -> Option<AnchorEvent> {
        let pos = self.joints.iter().position(|j| j.body == body)?;
        let joint = self.joints.swap_remove(pos);
        warn!(
            ?body,
            joint = joint.id.0,
            observed_force,
            "ground anchor broke under load"
        );
        Some(AnchorEvent::Broken {
            body,
            observed_force,
        })
    }
}
