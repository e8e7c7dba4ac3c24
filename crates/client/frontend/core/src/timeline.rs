//! Stage timeline reducer.
//!
//! [`TimelineState`] is the UI-side record of a guess: which stages have been
//! observed, which one is active, whether the progress indicator is shown and
//! whether fallback mode was entered. All transitions go through
//! [`TimelineState::reduce`], so the state can be driven and tested without
//! any rendering.
//!
//! A guess spans two game actions (submit, then fetch); the timeline is only
//! reset when a new guess begins, so stages from both actions accumulate.

use game_core::{Stage, StageKey};

/// Inputs to the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineAction {
    /// A new guess starts: clear the timeline, the active stage and the fallback flag.
    BeginGuess,

    /// A stage was emitted by the orchestrator.
    StageReached(&'static Stage),

    /// Hide the progress indicator (display timer after `decrypt-output`).
    HideProgress,
}

/// Coarse lifecycle derived from the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelinePhase {
    /// No stage recorded since the last reset.
    Idle,
    /// The most recent stage is a non-terminal progress stage.
    InProgress,
    /// The most recent stage was `decrypt-output` or `fallback-mode`.
    Settled,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimelineState {
    timeline: Vec<&'static Stage>,
    active_stage: Option<StageKey>,
    fallback_triggered: bool,
    progress_visible: bool,
    last_stage: Option<StageKey>,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::BeginGuess => {
                self.timeline.clear();
                self.active_stage = None;
                self.fallback_triggered = false;
                self.last_stage = None;
            }
            TimelineAction::StageReached(stage) => self.record(stage),
            TimelineAction::HideProgress => self.progress_visible = false,
        }
    }

    fn record(&mut self, stage: &'static Stage) {
        self.last_stage = Some(stage.key);
        if !self.contains(stage.key) {
            // Keep ascending `order`; equal orders keep arrival order.
            let at = self.timeline.partition_point(|s| s.order <= stage.order);
            self.timeline.insert(at, stage);
        }

        if stage.is_progress {
            self.active_stage = Some(stage.key);
            self.progress_visible = true;
        }

        if stage.is_fallback() {
            self.progress_visible = false;
            self.fallback_triggered = true;
        }
    }

    /// Observed stages in ascending `order`, each key at most once.
    pub fn timeline(&self) -> &[&'static Stage] {
        &self.timeline
    }

    pub fn contains(&self, key: StageKey) -> bool {
        self.timeline.iter().any(|s| s.key == key)
    }

    pub fn active_stage(&self) -> Option<StageKey> {
        self.active_stage
    }

    pub fn fallback_triggered(&self) -> bool {
        self.fallback_triggered
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    /// Derived from the most recent stage, so a submit that fell back is
    /// `InProgress` again once the fetch reaches `blind-computation`.
    /// [`fallback_triggered`](Self::fallback_triggered) stays set until the next guess.
    pub fn phase(&self) -> TimelinePhase {
        match self.last_stage {
            None => TimelinePhase::Idle,
            Some(StageKey::DecryptOutput | StageKey::FallbackMode) => TimelinePhase::Settled,
            Some(_) => TimelinePhase::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::stage;

    fn reach(state: &mut TimelineState, key: StageKey) {
        state.reduce(TimelineAction::StageReached(stage(key)));
    }

    fn keys(state: &TimelineState) -> Vec<StageKey> {
        state.timeline().iter().map(|s| s.key).collect()
    }

    #[test]
    fn new_state_is_idle() {
        let state = TimelineState::new();
        assert_eq!(state.phase(), TimelinePhase::Idle);
        assert!(state.timeline().is_empty());
        assert!(!state.progress_visible());
    }

    #[test]
    fn progress_stage_becomes_active_and_shows_indicator() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::PrepareClient);

        assert_eq!(state.active_stage(), Some(StageKey::PrepareClient));
        assert!(state.progress_visible());
        assert_eq!(state.phase(), TimelinePhase::InProgress);
    }

    #[test]
    fn repeated_stage_is_recorded_once() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::EncryptInput);
        reach(&mut state, StageKey::EncryptInput);

        assert_eq!(keys(&state), vec![StageKey::EncryptInput]);
    }

    #[test]
    fn timeline_is_sorted_by_order_regardless_of_arrival() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::FallbackMode);
        reach(&mut state, StageKey::SubmitCiphertext);
        reach(&mut state, StageKey::PrepareClient);

        assert_eq!(
            keys(&state),
            vec![
                StageKey::PrepareClient,
                StageKey::SubmitCiphertext,
                StageKey::FallbackMode
            ]
        );
    }

    #[test]
    fn fallback_hides_indicator_and_settles() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::PrepareClient);
        reach(&mut state, StageKey::EncryptInput);
        reach(&mut state, StageKey::FallbackMode);

        assert!(state.fallback_triggered());
        assert!(!state.progress_visible());
        // The fallback stage never becomes the active progress stage.
        assert_eq!(state.active_stage(), Some(StageKey::EncryptInput));
        assert!(state.contains(StageKey::FallbackMode));
        assert_eq!(state.phase(), TimelinePhase::Settled);
    }

    #[test]
    fn begin_guess_resets_before_new_stages() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::PrepareClient);
        reach(&mut state, StageKey::FallbackMode);

        state.reduce(TimelineAction::BeginGuess);
        assert!(state.timeline().is_empty());
        assert!(!state.fallback_triggered());
        assert_eq!(state.active_stage(), None);
        assert_eq!(state.phase(), TimelinePhase::Idle);

        reach(&mut state, StageKey::PrepareClient);
        assert_eq!(keys(&state), vec![StageKey::PrepareClient]);
    }

    #[test]
    fn fetch_after_failed_submit_is_in_progress_again() {
        let mut state = TimelineState::new();
        reach(&mut state, StageKey::PrepareClient);
        reach(&mut state, StageKey::EncryptInput);
        reach(&mut state, StageKey::FallbackMode);
        assert_eq!(state.phase(), TimelinePhase::Settled);

        reach(&mut state, StageKey::BlindComputation);
        assert_eq!(state.phase(), TimelinePhase::InProgress);
        assert!(state.fallback_triggered());
        assert!(state.progress_visible());

        reach(&mut state, StageKey::DecryptOutput);
        reach(&mut state, StageKey::FallbackMode);
        assert_eq!(state.phase(), TimelinePhase::Settled);
    }

    #[test]
    fn decrypt_output_settles_and_hide_clears_indicator() {
        let mut state = TimelineState::new();
        for key in [
            StageKey::PrepareClient,
            StageKey::EncryptInput,
            StageKey::SubmitCiphertext,
            StageKey::BlindComputation,
            StageKey::DecryptOutput,
        ] {
            reach(&mut state, key);
        }
        assert_eq!(state.phase(), TimelinePhase::Settled);
        assert!(state.progress_visible());

        state.reduce(TimelineAction::HideProgress);
        assert!(!state.progress_visible());
        assert_eq!(state.timeline().len(), 5);
        assert_eq!(state.active_stage(), Some(StageKey::DecryptOutput));
    }
}
