//! Insertion of the stowage phases into the host phase list, and the
//! coarse state machine tracking their completion.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::debug;

use crate::loader::phase::{LoadingPhase, LoadingScreen};
use crate::loader::phases::{ConfigPhase, InventoryPopulationPhase, LoaderContext};
use crate::scheduler::TaskStatus;

/// Where the orchestrator currently is in the startup sequence.
///
/// Nothing in this subsystem is allowed to abort startup: the orchestrator
/// always reaches [`OrchestratorState::Done`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrchestratorState {
    NotStarted,
    AwaitingConfigPhase,
    AwaitingBulkContentPhase,
    AwaitingInventoryPopulationPhase,
    Done,
}

/// Errors from installing the stowage phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InstallError {
    #[error("bulk content phase not found in the host phase list")]
    BulkPhaseNotFound,
}

/// Drives the host's phase list with the stowage phases installed.
pub struct Orchestrator {
    screen: LoadingScreen,
    config_index: usize,
    bulk_index: usize,
    inventory_index: usize,
}

impl Orchestrator {
    /// Locates the host's bulk content phase by concrete type `B` and
    /// inserts the config phase immediately before it and the inventory
    /// population phase immediately after it.
    ///
    /// Config must precede bulk content so config-aware part modules see
    /// the snapshot; population must follow it so the patch/override pass
    /// on part definitions has completed.
    pub fn install<B: LoadingPhase>(
        mut screen: LoadingScreen,
        ctx: Rc<RefCell<LoaderContext>>,
        config_path: PathBuf,
    ) -> Result<Self, InstallError> {
        let bulk = screen
            .position_of::<B>()
            .ok_or(InstallError::BulkPhaseNotFound)?;

        screen.insert(bulk + 1, Box::new(InventoryPopulationPhase::new(ctx.clone())));
        screen.insert(bulk, Box::new(ConfigPhase::new(config_path, ctx)));
        debug!(bulk_index = bulk + 1, "stowage phases installed");

        Ok(Self {
            screen,
            config_index: bulk,
            bulk_index: bulk + 1,
            inventory_index: bulk + 2,
        })
    }

    pub fn state(&self) -> OrchestratorState {
        if !self.screen.has_started() {
            return OrchestratorState::NotStarted;
        }
        let cursor = self.screen.cursor();
        if cursor <= self.config_index {
            OrchestratorState::AwaitingConfigPhase
        } else if cursor <= self.bulk_index {
            OrchestratorState::AwaitingBulkContentPhase
        } else if cursor <= self.inventory_index {
            OrchestratorState::AwaitingInventoryPopulationPhase
        } else {
            OrchestratorState::Done
        }
    }

    pub fn screen(&self) -> &LoadingScreen {
        &self.screen
    }

    /// Drives the underlying screen one frame.
    pub fn tick(&mut self) -> TaskStatus {
        self.screen.tick()
    }

    /// Runs the whole sequence, panicking on a stall (test aid; the real
    /// host applies its own stall detection).
    pub fn run_to_completion(&mut self, max_ticks: usize) {
        self.screen.run_to_completion(max_ticks);
    }
}
