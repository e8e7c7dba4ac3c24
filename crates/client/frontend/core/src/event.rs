//! Utilities for reacting to stage events inside UI layers.
use runtime::{ActionKind, StageEvent};

use crate::config::MessageConfig;
use crate::message::{MessageEntry, MessageLog};
use crate::timeline::{TimelineAction, TimelineState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
    /// `decrypt-output` was reached; the indicator should hide after the configured delay.
    pub schedule_progress_hide: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
            schedule_progress_hide: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
            schedule_progress_hide: false,
        }
    }
}

/// Folds [`StageEvent`]s into a [`TimelineState`] and a [`MessageLog`].
#[derive(Clone, Debug)]
pub struct TimelineConsumer {
    state: TimelineState,
    messages: MessageLog,
    show_stages: bool,
}

impl TimelineConsumer {
    pub fn new(config: &MessageConfig) -> Self {
        Self {
            state: TimelineState::new(),
            messages: MessageLog::new(config.capacity),
            show_stages: config.show_stages,
        }
    }

    pub fn on_event(&mut self, event: &StageEvent) -> EventImpact {
        match *event {
            StageEvent::ActionStarted {
                action: ActionKind::SubmitMove,
                game_id,
            } => {
                self.state.reduce(TimelineAction::BeginGuess);
                self.messages.push_text(format!("New guess for game {game_id}"));
                EventImpact::redraw()
            }
            StageEvent::ActionStarted { .. } => EventImpact::none(),
            StageEvent::StageReached { stage, .. } => {
                let stage = game_core::stage(stage);
                self.state.reduce(TimelineAction::StageReached(stage));
                if self.show_stages || stage.is_fallback() {
                    self.messages.push(MessageEntry::for_stage(stage));
                }
                EventImpact {
                    requires_redraw: true,
                    schedule_progress_hide: stage.is_final(),
                }
            }
            StageEvent::ActionSettled {
                action,
                fallback: true,
            } => {
                self.messages
                    .push_warning(format!("{action} resolved with a placeholder value"));
                EventImpact::redraw()
            }
            StageEvent::ActionSettled { .. } => EventImpact::none(),
        }
    }

    /// Applied when the hide timer fires.
    pub fn hide_progress(&mut self) -> EventImpact {
        if !self.state.progress_visible() {
            return EventImpact::none();
        }
        self.state.reduce(TimelineAction::HideProgress);
        EventImpact::redraw()
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.messages
    }

    pub fn take_message_log(self) -> MessageLog {
        self.messages
    }
}
