//! Game action orchestrator.
//!
//! Each action walks a fixed slice of the stage catalog:
//!
//! ```text
//! submit_move   prepare-client → encrypt-input → submit-ciphertext
//! fetch_result  blind-computation → decrypt-output
//! ```
//!
//! Stages are emitted synchronously between collaborator calls, in
//! non-decreasing catalog order. When a collaborator fails the action emits
//! `fallback-mode` as its last stage and resolves with a placeholder wrapped
//! in [`Outcome::Fallback`]; no action returns an error.

use client_blockchain_core::{EncryptionError, TransactionReceipt};
use game_core::{GameId, GameResult, Move, StageKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::config::{ResultSource, RuntimeConfig};
use crate::connection::Connection;
use crate::events::{ActionKind, StageBus, StageEvent, StageObserver};
use crate::outcome::{FallbackReason, Outcome};
use crate::utils::hash::placeholder_transaction_hash;

/// Game id reported when `start_game` cannot reach the contract.
pub const FALLBACK_GAME_ID: GameId = GameId::new(0);

const MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

/// Drives game actions against the collaborators of a [`Connection`].
pub struct GameActions {
    config: RuntimeConfig,
    bus: Option<StageBus>,
    rng: Mutex<StdRng>,
}

impl GameActions {
    pub fn new(config: RuntimeConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            bus: None,
            rng: Mutex::new(rng),
        }
    }

    /// Also publish every stage on `bus`.
    pub fn with_bus(mut self, bus: StageBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Opens a game on the contract.
    ///
    /// Emits no stages. On failure resolves to [`FALLBACK_GAME_ID`].
    pub async fn start_game(&self, connection: &Connection) -> Outcome<GameId> {
        match connection.contract().start_game(&connection.address()).await {
            Ok(game_id) => {
                tracing::info!(%game_id, "Game started");
                Outcome::Confirmed(game_id)
            }
            Err(error) => {
                tracing::warn!("Failed to start game: {}. Continuing with placeholder game.", error);
                Outcome::Fallback {
                    value: FALLBACK_GAME_ID,
                    reason: error.into(),
                }
            }
        }
    }

    /// Encrypts `choice` and submits it for `game_id`.
    ///
    /// Emits `prepare-client` and `encrypt-input`, then `submit-ciphertext`
    /// once the contract confirms. If any collaborator fails, `fallback-mode`
    /// is emitted instead and the receipt is a placeholder whose hash is
    /// derived from `(game_id, choice)`.
    pub async fn submit_move<O>(
        &self,
        connection: &Connection,
        game_id: GameId,
        choice: Move,
        observer: &mut O,
    ) -> Outcome<TransactionReceipt>
    where
        O: StageObserver + Send + ?Sized,
    {
        let action = ActionKind::SubmitMove;
        tracing::info!(%game_id, %choice, "Submitting move");
        self.publish(StageEvent::ActionStarted { action, game_id });

        let outcome = match self.try_submit_move(connection, game_id, choice, observer).await {
            Ok(receipt) => {
                self.emit(action, observer, StageKey::SubmitCiphertext).await;
                tracing::info!(%game_id, tx = %receipt.hash, "Move confirmed");
                Outcome::Confirmed(receipt)
            }
            Err(reason) => {
                tracing::warn!("Move submission failed: {}. Switching to fallback mode.", reason);
                self.emit(action, observer, StageKey::FallbackMode).await;
                Outcome::Fallback {
                    value: TransactionReceipt {
                        hash: placeholder_transaction_hash(game_id, choice),
                        block_number: 0,
                    },
                    reason,
                }
            }
        };

        self.settle(action, &outcome);
        outcome
    }

    async fn try_submit_move<O>(
        &self,
        connection: &Connection,
        game_id: GameId,
        choice: Move,
        observer: &mut O,
    ) -> Result<TransactionReceipt, FallbackReason>
    where
        O: StageObserver + Send + ?Sized,
    {
        let action = ActionKind::SubmitMove;
        let contract = connection.contract();
        let encryption = connection.encryption();

        self.emit(action, observer, StageKey::PrepareClient).await;
        if connection.status().use_demo_guess() {
            self.emit(action, observer, StageKey::EncryptInput).await;
            tracing::debug!(%game_id, "Demo mode: submitting plaintext move");
            return Ok(contract.make_guess_demo(game_id, choice).await?);
        }

        encryption.get_public_key().await?;
        self.emit(action, observer, StageKey::EncryptInput).await;

        let mut input = encryption.create_encrypted_input(contract.address(), connection.address());
        input.add8(choice.as_u8());
        let encrypted = encryption.encrypt(input).await?;
        let handle = encrypted.handles.first().copied().ok_or_else(|| {
            EncryptionError::InvalidInput("encryption returned no handles".into())
        })?;

        Ok(contract
            .make_guess(game_id, handle, &encrypted.input_proof)
            .await?)
    }

    /// Reveals the outcome of `game_id`.
    ///
    /// Emits `blind-computation` and `decrypt-output`, always resolving after
    /// `decrypt-output`. With [`ResultSource::Simulated`] the result is random
    /// and no collaborator is called. If a collaborator fails, the result is
    /// random and `fallback-mode` follows `decrypt-output`.
    pub async fn fetch_result<O>(
        &self,
        connection: &Connection,
        game_id: GameId,
        observer: &mut O,
    ) -> Outcome<GameResult>
    where
        O: StageObserver + Send + ?Sized,
    {
        let action = ActionKind::FetchResult;
        tracing::info!(%game_id, source = %self.config.result_source, "Fetching result");
        self.publish(StageEvent::ActionStarted { action, game_id });

        let revealed = match self.config.result_source {
            ResultSource::Decrypt => self.try_fetch_result(connection, game_id, observer).await,
            ResultSource::Simulated => {
                self.emit(action, observer, StageKey::BlindComputation).await;
                Err(FallbackReason::Simulated)
            }
        };

        let outcome = match revealed {
            Ok(result) => Outcome::Confirmed(result),
            Err(reason) => Outcome::Fallback {
                value: self.random_result().await,
                reason,
            },
        };

        self.emit(action, observer, StageKey::DecryptOutput).await;
        if let Some(reason) = outcome.reason().filter(|r| r.is_service_failure()) {
            tracing::warn!("Result retrieval failed: {}. Showing a random result.", reason);
            self.emit(action, observer, StageKey::FallbackMode).await;
        }

        let result = outcome.value();
        tracing::info!(%game_id, won = result.won, opponent = %result.choice, "Result revealed");
        self.settle(action, &outcome);
        outcome
    }

    async fn try_fetch_result<O>(
        &self,
        connection: &Connection,
        game_id: GameId,
        observer: &mut O,
    ) -> Result<GameResult, FallbackReason>
    where
        O: StageObserver + Send + ?Sized,
    {
        let contract = connection.contract();

        self.emit(ActionKind::FetchResult, observer, StageKey::BlindComputation)
            .await;
        let handles = contract.get_result(game_id).await?;
        let values = connection
            .encryption()
            .user_decrypt(&handles.to_vec(), contract.address(), connection.address())
            .await?;

        decode_result(&values)
    }

    async fn random_result(&self) -> GameResult {
        let mut rng = self.rng.lock().await;
        let won = rng.gen_bool(0.5);
        let choice = MOVES[rng.gen_range(0..MOVES.len())];
        GameResult::new(won, choice)
    }

    async fn emit<O>(&self, action: ActionKind, observer: &mut O, key: StageKey)
    where
        O: StageObserver + Send + ?Sized,
    {
        let stage = game_core::stage(key);
        tracing::debug!(%action, stage = stage.id(), "Stage reached");

        observer.on_stage(stage);
        self.publish(StageEvent::StageReached { action, stage: key });

        if stage.is_progress && !self.config.stage_delay.is_zero() {
            tokio::time::sleep(self.config.stage_delay).await;
        }
    }

    fn settle<T>(&self, action: ActionKind, outcome: &Outcome<T>) {
        self.publish(StageEvent::ActionSettled {
            action,
            fallback: outcome.is_fallback(),
        });
    }

    fn publish(&self, event: StageEvent) {
        if let Some(bus) = &self.bus {
            bus.publish(event);
        }
    }
}

/// Decrypted values arrive as `[won, choice]`.
fn decode_result(values: &[u64]) -> Result<GameResult, FallbackReason> {
    let [won, choice] = values else {
        return Err(FallbackReason::MalformedResult(format!(
            "expected 2 values, got {}",
            values.len()
        )));
    };
    let choice = u8::try_from(*choice)
        .ok()
        .and_then(|value| Move::try_from(value).ok())
        .ok_or_else(|| FallbackReason::MalformedResult(format!("opponent move {choice}")))?;

    Ok(GameResult::new(*won != 0, choice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_won_and_choice() {
        assert_eq!(
            decode_result(&[1, 2]),
            Ok(GameResult::new(true, Move::Scissors))
        );
        assert_eq!(decode_result(&[0, 0]), Ok(GameResult::new(false, Move::Rock)));
    }

    #[test]
    fn decode_rejects_malformed_values() {
        assert!(matches!(
            decode_result(&[1]),
            Err(FallbackReason::MalformedResult(_))
        ));
        assert!(matches!(
            decode_result(&[1, 3]),
            Err(FallbackReason::MalformedResult(_))
        ));
        assert!(matches!(
            decode_result(&[1, 2, 0]),
            Err(FallbackReason::MalformedResult(_))
        ));
    }

    #[tokio::test]
    async fn seeded_random_results_repeat() {
        let config = RuntimeConfig {
            rng_seed: Some(9),
            ..RuntimeConfig::default()
        };
        let a = GameActions::new(config.clone()).random_result().await;
        let b = GameActions::new(config).random_result().await;
        assert_eq!(a, b);
    }
}
