//! Runtime orchestration for the stowage subsystem.
//!
//! This crate wires the pure item state machine from [`item_core`] into the
//! host simulation: the joint manager that realizes ground anchors, the
//! per-item runtime that routes pickup actions and equip events, and the
//! loader orchestrator that injects the config and inventory-population
//! phases into the host's startup sequence.
//!
//! Everything here is single-threaded and frame-synchronous: "suspension"
//! means yielding back to the host loop and resuming on a later tick, never
//! a separate thread.
//!
//! Modules are organized by responsibility:
//! - [`physics`] owns bodies, anchor joints, and deferred anchor creation
//! - [`items`] binds one item's state, body, and behavior hooks together
//! - [`loader`] hosts the loading-phase contract and the orchestrator
//! - [`scheduler`] holds the shared cooperative-stepping vocabulary
pub mod items;
pub mod loader;
pub mod physics;
pub mod scheduler;

pub use items::{ItemRuntime, ItemSnapshot};
pub use loader::{
    BulkContentPhase, ConfigPhase, InstallError, InventoryPopulationPhase, LoaderContext,
    LoadingPhase, LoadingScreen, Orchestrator, OrchestratorState,
};
pub use physics::{AnchorEvent, BodyId, BodyStatus, JointManager, PhysicsWorld};
pub use scheduler::TaskStatus;
