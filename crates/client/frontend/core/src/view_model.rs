//! View-model snapshots derived from [`TimelineState`].
use game_core::{StageKey, progress_stage_count};

use crate::message::{MessageEntry, MessageLog};
use crate::timeline::{TimelinePhase, TimelineState};

/// High-level snapshot of the stage timeline used by presentation layers.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressView {
    pub phase: TimelinePhase,
    pub entries: Vec<TimelineEntryView>,
    pub active: Option<StageKey>,
    /// Share of progress stages reached, `0..=100`.
    pub percent: u8,
    pub visible: bool,
    pub fallback: bool,
    pub messages: Vec<MessageEntry>,
}

impl ProgressView {
    pub fn from_state(state: &TimelineState, messages: &MessageLog, message_limit: usize) -> Self {
        let active = state.active_stage();
        Self {
            phase: state.phase(),
            entries: state
                .timeline()
                .iter()
                .map(|stage| TimelineEntryView {
                    key: stage.key,
                    icon: stage.icon,
                    label: stage.label,
                    summary: stage.summary,
                    insight: stage.insight,
                    active: active == Some(stage.key),
                    fallback: stage.is_fallback(),
                })
                .collect(),
            active,
            percent: progress_percent(active),
            visible: state.progress_visible(),
            fallback: state.fallback_triggered(),
            messages: collect_messages(messages, message_limit),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineEntryView {
    pub key: StageKey,
    pub icon: &'static str,
    pub label: &'static str,
    pub summary: &'static str,
    pub insight: &'static str,
    pub active: bool,
    pub fallback: bool,
}

fn progress_percent(active: Option<StageKey>) -> u8 {
    let Some(active) = active else {
        return 0;
    };
    let total = progress_stage_count();
    let position = game_core::progress_stages()
        .position(|stage| stage.key == active)
        .map_or(0, |index| index + 1);
    if total == 0 {
        return 0;
    }
    (position * 100 / total) as u8
}

fn collect_messages(log: &MessageLog, limit: usize) -> Vec<MessageEntry> {
    let mut messages: Vec<_> = log.recent(limit).cloned().collect();
    messages.reverse();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::TimelineAction;
    use game_core::stage;

    #[test]
    fn percent_tracks_active_progress_stage() {
        assert_eq!(progress_percent(None), 0);
        assert_eq!(progress_percent(Some(StageKey::PrepareClient)), 20);
        assert_eq!(progress_percent(Some(StageKey::SubmitCiphertext)), 60);
        assert_eq!(progress_percent(Some(StageKey::DecryptOutput)), 100);
    }

    #[test]
    fn snapshot_marks_active_and_fallback_entries() {
        let mut state = TimelineState::new();
        state.reduce(TimelineAction::StageReached(stage(StageKey::PrepareClient)));
        state.reduce(TimelineAction::StageReached(stage(StageKey::EncryptInput)));
        state.reduce(TimelineAction::StageReached(stage(StageKey::FallbackMode)));

        let mut log = MessageLog::new(8);
        log.push_text("first");
        log.push_text("second");
        log.push_text("third");

        let view = ProgressView::from_state(&state, &log, 2);
        assert_eq!(view.entries.len(), 3);
        assert!(view.entries[1].active);
        assert!(view.entries[2].fallback);
        assert!(!view.entries[2].active);
        assert_eq!(view.percent, 40);
        assert!(view.fallback);
        assert!(!view.visible);

        let texts: Vec<_> = view.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "third"]);
    }
}
