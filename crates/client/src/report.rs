//! Summary of a played round for terminal or JSON output.
use std::fmt;

use client_blockchain_core::TransactionReceipt;
use client_frontend_core::{FrontendConfig, MessageLevel, ProgressView, TimelineConsumer};
use game_core::{GameId, GameResult, Move};
use runtime::Outcome;
use serde::Serialize;
use serde_json::{Value, json};

pub struct RoundReport {
    pub choice: Move,
    pub game_id: Outcome<GameId>,
    pub receipt: Outcome<TransactionReceipt>,
    pub result: Outcome<GameResult>,
    /// Final timeline; `None` if the driver task died.
    pub progress: Option<ProgressView>,
}

impl RoundReport {
    pub(crate) fn new(
        choice: Move,
        game_id: Outcome<GameId>,
        receipt: Outcome<TransactionReceipt>,
        result: Outcome<GameResult>,
        consumer: Option<TimelineConsumer>,
        frontend: &FrontendConfig,
    ) -> Self {
        let progress = consumer.map(|consumer| {
            ProgressView::from_state(
                consumer.state(),
                consumer.message_log(),
                frontend.messages.capacity,
            )
        });
        Self {
            choice,
            game_id,
            receipt,
            result,
            progress,
        }
    }

    /// Whether any step resolved with a placeholder.
    pub fn used_fallback(&self) -> bool {
        self.game_id.is_fallback() || self.receipt.is_fallback() || self.result.is_fallback()
    }

    pub fn to_json(&self) -> Value {
        let timeline = self.progress.as_ref().map(|view| {
            json!({
                "stages": view.entries.iter().map(|entry| entry.key).collect::<Vec<_>>(),
                "active": view.active,
                "percent": view.percent,
                "fallback": view.fallback,
            })
        });
        json!({
            "choice": self.choice,
            "game_id": outcome_json(&self.game_id),
            "receipt": outcome_json(&self.receipt),
            "result": outcome_json(&self.result),
            "timeline": timeline,
        })
    }
}

fn outcome_json<T: Serialize>(outcome: &Outcome<T>) -> Value {
    json!({
        "value": outcome.value(),
        "fallback": outcome.is_fallback(),
        "reason": outcome.reason().map(ToString::to_string),
    })
}

fn placeholder_note<T>(outcome: &Outcome<T>) -> &'static str {
    if outcome.is_fallback() {
        " (placeholder)"
    } else {
        ""
    }
}

impl fmt::Display for RoundReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result.value();
        writeln!(
            f,
            "Game {}{}",
            self.game_id.value(),
            placeholder_note(&self.game_id)
        )?;
        writeln!(f, "You played {}", self.choice)?;
        writeln!(
            f,
            "Transaction {}{}",
            self.receipt.value().hash,
            placeholder_note(&self.receipt)
        )?;
        writeln!(
            f,
            "House played {}: you {}{}",
            result.choice,
            if result.won { "win" } else { "lose" },
            placeholder_note(&self.result)
        )?;

        if let Some(view) = &self.progress {
            writeln!(f)?;
            writeln!(f, "Timeline ({}%):", view.percent)?;
            for entry in &view.entries {
                let marker = if entry.active { ">" } else { " " };
                writeln!(f, "{} {} {}", marker, entry.icon, entry.label)?;
            }
            for message in view
                .messages
                .iter()
                .filter(|message| message.level == MessageLevel::Warning)
            {
                writeln!(f, "! {}", message.text)?;
            }
        }

        Ok(())
    }
}
