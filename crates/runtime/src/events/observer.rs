//! Synchronous stage callback.

use game_core::Stage;

/// Receives stages in emission order while an action runs.
///
/// Calls happen inline between collaborator awaits, so implementations
/// should return quickly. Any `FnMut(&'static Stage)` closure qualifies.
pub trait StageObserver {
    fn on_stage(&mut self, stage: &'static Stage);
}

impl<F> StageObserver for F
where
    F: FnMut(&'static Stage),
{
    fn on_stage(&mut self, stage: &'static Stage) {
        self(stage)
    }
}

