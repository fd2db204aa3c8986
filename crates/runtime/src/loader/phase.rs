//! The host loading-phase contract and the screen that drives it.

use std::any::Any;

use crate::scheduler::TaskStatus;

/// One discrete, host-scheduled stage of startup initialization.
///
/// The host starts a phase, then polls [`LoadingPhase::is_ready`] once per
/// frame, calling [`LoadingPhase::tick`] in between so incremental phases
/// can make progress without blocking the UI. The next phase never begins
/// before the current one reports ready.
pub trait LoadingPhase: Any {
    /// Display title for the loading screen.
    fn title(&self) -> &str;

    /// Begins the phase. Called exactly once.
    fn start(&mut self);

    /// Performs one increment of work. Phases that complete inside
    /// [`LoadingPhase::start`] need not override this.
    fn tick(&mut self) {}

    /// Gates the next phase in the list.
    fn is_ready(&self) -> bool;

    /// Progress in [0, 1] for the UI.
    fn progress_fraction(&self) -> f32 {
        if self.is_ready() { 1.0 } else { 0.0 }
    }

    /// Identity access, used to locate a phase in the list by concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// The host's ordered phase list, executed strictly in order.
pub struct LoadingScreen {
    phases: Vec<Box<dyn LoadingPhase>>,
    cursor: usize,
    current_started: bool,
    ever_ticked: bool,
}

impl LoadingScreen {
    pub fn new(phases: Vec<Box<dyn LoadingPhase>>) -> Self {
        Self {
            phases,
            cursor: 0,
            current_started: false,
            ever_ticked: false,
        }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Titles in list order. Useful for UIs and assertions.
    pub fn titles(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.title()).collect()
    }

    /// Index of the first phase of concrete type `P`, if present.
    pub fn position_of<P: LoadingPhase>(&self) -> Option<usize> {
        self.phases.iter().position(|p| p.as_any().is::<P>())
    }

    /// Inserts a phase at an arbitrary index. Only valid before execution
    /// begins.
    pub fn insert(&mut self, index: usize, phase: Box<dyn LoadingPhase>) {
        debug_assert!(!self.ever_ticked, "phase list is fixed once execution starts");
        self.phases.insert(index, phase);
    }

    /// The phase at `index`, if present.
    pub fn phase(&self, index: usize) -> Option<&dyn LoadingPhase> {
        self.phases.get(index).map(|p| p.as_ref())
    }

    /// Index of the phase currently executing (or next to execute).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_started(&self) -> bool {
        self.ever_ticked
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.phases.len()
    }

    /// Progress of the currently executing phase, for the UI.
    pub fn current_progress(&self) -> f32 {
        match self.phases.get(self.cursor) {
            Some(phase) => phase.progress_fraction(),
            None => 1.0,
        }
    }

    /// Drives the list one frame: starts the current phase if necessary,
    /// gives it one work increment, and advances past it once ready.
    pub fn tick(&mut self) -> TaskStatus {
        self.ever_ticked = true;
        let Some(phase) = self.phases.get_mut(self.cursor) else {
            return TaskStatus::Done;
        };

        if !self.current_started {
            phase.start();
            self.current_started = true;
        }
        if !phase.is_ready() {
            phase.tick();
        }
        if phase.is_ready() {
            self.cursor += 1;
            self.current_started = false;
        }

        if self.is_done() {
            TaskStatus::Done
        } else {
            TaskStatus::Pending
        }
    }

    /// Runs every phase to completion. Panics if a phase fails to make
    /// progress within `max_ticks` frames (stall detection for tests).
    pub fn run_to_completion(&mut self, max_ticks: usize) {
        for _ in 0..max_ticks {
            if self.tick().is_done() {
                return;
            }
        }
        panic!("loading screen stalled: stuck at phase {}", self.cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPhase {
        title: String,
        work: u32,
        done_after: u32,
    }

    impl CountingPhase {
        fn new(title: &str, done_after: u32) -> Self {
            Self {
                title: title.to_string(),
                work: 0,
                done_after,
            }
        }
    }

    impl LoadingPhase for CountingPhase {
        fn title(&self) -> &str {
            &self.title
        }

        fn start(&mut self) {}

        fn tick(&mut self) {
            self.work += 1;
        }

        fn is_ready(&self) -> bool {
            self.work >= self.done_after
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn phases_execute_strictly_in_order() {
        let mut screen = LoadingScreen::new(vec![
            Box::new(CountingPhase::new("a", 2)),
            Box::new(CountingPhase::new("b", 1)),
        ]);
        assert_eq!(screen.tick(), TaskStatus::Pending); // a: 1 unit
        assert_eq!(screen.cursor(), 0);
        assert_eq!(screen.tick(), TaskStatus::Pending); // a done
        assert_eq!(screen.cursor(), 1);
        assert_eq!(screen.tick(), TaskStatus::Done); // b done
        assert!(screen.is_done());
    }

    #[test]
    fn immediate_phase_advances_on_its_first_tick() {
        let mut screen = LoadingScreen::new(vec![Box::new(CountingPhase::new("a", 0))]);
        assert_eq!(screen.tick(), TaskStatus::Done);
    }

    #[test]
    fn position_of_finds_by_concrete_type() {
        let screen = LoadingScreen::new(vec![Box::new(CountingPhase::new("a", 1))]);
        assert_eq!(screen.position_of::<CountingPhase>(), Some(0));
    }
}
