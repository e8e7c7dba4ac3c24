//! Pure domain types for the encrypted Rock-Paper-Scissors client.
//!
//! `game-core` owns the two pieces of data every other crate agrees on:
//! - [`game`]: moves, game identifiers and revealed results
//! - [`stage`]: the static catalog of narration stages and its lookup
//!
//! Nothing in this crate performs I/O or awaits; the runtime and frontends
//! layer asynchronous behavior on top of these types.
pub mod game;
pub mod stage;

pub use game::{GameId, GameResult, Move, MoveError};
pub use stage::{
    FALLBACK_STAGE_KEY, STAGES, Stage, StageError, StageKey, progress_stage_count,
    progress_stages, stage, stage_by_key,
};
