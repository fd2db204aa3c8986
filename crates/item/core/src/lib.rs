//! Deterministic item lifecycle rules shared across the stowage subsystem.
//!
//! `item-core` defines the canonical state machine a portable item obeys
//! (stored, carried, equipped, attached to a part, or anchored to the world)
//! and exposes pure APIs that can be reused by both the runtime and offline
//! tools. Transitions never touch the physics simulation directly: they
//! return [`AttachEffect`] values that the owning runtime realizes against
//! its joint manager.
pub mod actions;
pub mod config;
pub mod item;
pub mod mount;
pub mod types;

pub use actions::{ActionEvent, ItemAction, route_action};
pub use config::{GlobalSettings, PickupSettings, SeatInventorySettings, StowageConfig};
pub use item::{
    AttachEffect, AttachToolBehavior, ItemAttachMode, ItemEventHandler, ItemKindSpec,
    ItemLocation, ItemState, TransitionError, UseSource,
};
pub use mount::{Mount, MountSet};
pub use types::{AttachNodeId, JointId, PartId};
