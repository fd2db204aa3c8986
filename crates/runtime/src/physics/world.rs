//! Minimal view of the host's physics body registry.
//!
//! The stowage subsystem only cares about three things per body: whether it
//! has finished initializing, whether it has been destroyed, and whether its
//! containing structure is currently resting on the ground.

use std::collections::HashMap;

/// Identifies one physical body in the host simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Lifecycle state of a physical body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyStatus {
    /// Spawned but not yet fully simulated (e.g. mid-unpack from a save, or
    /// freshly instantiated from an inventory).
    Initializing,
    /// Fully simulated; joints may be created against it.
    Active,
    /// Terminal. Pending work against this body is abandoned.
    Destroyed,
}

#[derive(Debug)]
struct Body {
    status: BodyStatus,
    landed: bool,
}

/// Registry of the bodies the stowage subsystem interacts with.
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: HashMap<BodyId, Body>,
    next_id: u32,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_body(&mut self, status: BodyStatus) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.insert(
            id,
            Body {
                status,
                landed: false,
            },
        );
        id
    }

    /// Unknown bodies report as destroyed: from this subsystem's point of
    /// view a body it cannot see no longer exists.
    pub fn status(&self, body: BodyId) -> BodyStatus {
        self.bodies
            .get(&body)
            .map(|b| b.status)
            .unwrap_or(BodyStatus::Destroyed)
    }

    pub fn set_status(&mut self, body: BodyId, status: BodyStatus) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.status = status;
        }
    }

    /// Marks the body's containing structure as resting on the ground.
    pub fn set_landed(&mut self, body: BodyId, landed: bool) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.landed = landed;
        }
    }

    pub fn is_landed(&self, body: BodyId) -> bool {
        self.bodies.get(&body).is_some_and(|b| b.landed)
    }
}
