//! Shared vocabulary for cooperative, tick-synchronous stepping.
//!
//! There is no task runtime here on purpose: the two suspension points in
//! this subsystem (the joint manager's deferred anchor creation and the
//! loading screen's phase driving) are polled directly by the host loop,
//! once per physics step or frame respectively. The loading screen reports
//! each frame through [`TaskStatus`]; the joint manager drains its pending
//! queue through `step` and `has_pending`.

/// Result of stepping a cooperative unit of work once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// More work remains; step again on a later tick.
    Pending,
    /// The work completed (or was abandoned); do not step again.
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}
