//! Physics-facing resource management: bodies and anchor joints.

mod joints;
mod world;

pub use joints::{AnchorEvent, AnchorJoint, JointManager};
pub use world::{BodyId, BodyStatus, PhysicsWorld};
