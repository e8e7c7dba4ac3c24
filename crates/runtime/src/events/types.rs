//! Event types published on the stage bus.

use game_core::{GameId, StageKey};
use serde::{Deserialize, Serialize};

/// The two stage-emitting game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ActionKind {
    SubmitMove,
    FetchResult,
}

/// Lifecycle of a game action as seen by asynchronous consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEvent {
    /// An action began; a new guess starts with `SubmitMove`.
    ActionStarted { action: ActionKind, game_id: GameId },

    /// A catalog stage was reached.
    StageReached { action: ActionKind, stage: StageKey },

    /// The action resolved. `fallback` is true when the value is a placeholder.
    ActionSettled { action: ActionKind, fallback: bool },
}
