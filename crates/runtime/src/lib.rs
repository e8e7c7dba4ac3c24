//! Game action orchestration for the encrypted Rock-Paper-Scissors client.
//!
//! This crate drives a round against the collaborators defined in
//! `client-blockchain-core` and narrates it as a sequence of catalog stages.
//! Consumers embed [`GameActions`] and either pass a [`StageObserver`]
//! callback per action or subscribe to the [`StageBus`].
//!
//! Modules are organized by responsibility:
//! - [`actions`] hosts the orchestrator (`start_game`, `submit_move`, `fetch_result`)
//! - [`connection`] bundles the wallet address with its collaborators
//! - [`events`] provides the observer contract and the broadcast stage bus
//! - [`outcome`] distinguishes confirmed results from masked failures
//! - [`config`] loads pacing and result policy from the environment
pub mod actions;
pub mod config;
pub mod connection;
pub mod events;
pub mod outcome;

mod utils;

pub use actions::{FALLBACK_GAME_ID, GameActions};
pub use config::{ResultSource, RuntimeConfig};
pub use connection::Connection;
pub use events::{ActionKind, StageBus, StageEvent, StageObserver};
pub use outcome::{FallbackReason, Outcome};
