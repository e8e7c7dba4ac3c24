//! Top-level client playing one encrypted Rock-Paper-Scissors round.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ GameActions (runtime: stage-narrated contract calls)
//!   ├─→ Connection (wallet + contract + encryption collaborators)
//!   └─→ TimelineDriver (frontend core: timeline, progress, messages)
//! ```
//!
//! The actions publish on a [`StageBus`] that only the client and the
//! actions hold. Consuming the client in [`Client::play`] drops both once the
//! round is over, which closes the bus and lets the driver finish.

mod builder;
pub mod config;
pub mod logging;
pub mod report;

pub use builder::ClientBuilder;
pub use config::CliConfig;
pub use report::RoundReport;

use anyhow::{Context, Result};
use client_frontend_core::{FrontendConfig, TimelineDriver};
use game_core::{Move, stage_by_key};
use runtime::{Connection, GameActions, StageBus, StageObserver};

/// One-shot client container.
pub struct Client {
    connection: Connection,
    actions: GameActions,
    bus: StageBus,
    frontend: FrontendConfig,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Plays `choice` through start, submit and fetch, reporting each stage to `observer`.
    ///
    /// Never fails: every collaborator error surfaces as a fallback value in
    /// the report.
    pub async fn play<O>(self, choice: Move, observer: &mut O) -> RoundReport
    where
        O: StageObserver + Send + ?Sized,
    {
        let Self {
            connection,
            actions,
            bus,
            frontend,
        } = self;

        let (driver, _snapshots) = TimelineDriver::new(&frontend);
        let timeline = tokio::spawn(driver.run(bus.subscribe()));

        let game_id = actions.start_game(&connection).await;
        let id = *game_id.value();
        let receipt = actions.submit_move(&connection, id, choice, observer).await;
        let result = actions.fetch_result(&connection, id, observer).await;

        // Last senders gone: the driver drains the bus and returns.
        drop(actions);
        drop(bus);

        let consumer = match timeline.await {
            Ok(consumer) => Some(consumer),
            Err(error) => {
                tracing::error!("Timeline driver failed: {}", error);
                None
            }
        };

        RoundReport::new(choice, game_id, receipt, result, consumer, &frontend)
    }
}

/// Describes one catalog stage by its kebab-case key, as printed by `--explain`.
pub fn explain(key: &str) -> Result<String> {
    let stage = stage_by_key(key).with_context(|| format!("cannot explain {key:?}"))?;
    Ok(format!(
        "{} {} ({})\n{}\n{}\n",
        stage.icon, stage.label, stage.key, stage.summary, stage.insight
    ))
}
