//! Stage notifications emitted while a game action runs.
//!
//! Two delivery paths share the same ordering guarantees:
//! - [`StageObserver`]: synchronous callback passed to each action
//! - [`StageBus`]: broadcast channel for asynchronous consumers (UI loops, loggers)

mod bus;
mod observer;
mod types;

pub use bus::StageBus;
pub use observer::StageObserver;
pub use types::{ActionKind, StageEvent};
