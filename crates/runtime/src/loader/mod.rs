//! Startup loading orchestration.
//!
//! The host executes an ordered list of loading phases, each gated by a
//! readiness predicate. This module injects two extra phases around the
//! host's bulk content phase: configuration strictly before it, inventory
//! population strictly after it.

mod orchestrator;
mod phase;
mod phases;

pub use orchestrator::{InstallError, Orchestrator, OrchestratorState};
pub use phase::{LoadingPhase, LoadingScreen};
pub use phases::{BulkContentPhase, ConfigPhase, InventoryPopulationPhase, LoaderContext};
