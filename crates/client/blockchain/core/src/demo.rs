//! In-memory stand-ins for the wallet, the contract and the FHE library.
//!
//! Nothing here is encrypted. A "ciphertext handle" is a fixed-shape 32-byte
//! buffer: the plaintext value in the first 8 bytes (little endian) and a
//! marker in the remaining 24. The demo contract and the demo encryption
//! client agree on that layout, which is enough to play a full round offline.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use game_core::{GameId, GameResult, Move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::network::CONTRACT_ADDRESS;
use crate::traits::{ContractError, EncryptionClient, EncryptionError, GameContract, ServiceMonitor};
use crate::types::{
    Address, CiphertextHandle, EncryptedInput, EncryptedInputBuilder, InputProof, PublicKey,
    ResultHandles, ServiceStatus, TransactionHash, TransactionReceipt,
};

const HANDLE_MARKER: u8 = 0xfe;
const INPUT_PROOF_LEN: usize = 64;
const PUBLIC_KEY_LEN: usize = 32;

/// Proof binding the staged values to their contract and user:
/// `sha256(contract || user) || sha256(values)`.
fn input_proof(input: &EncryptedInputBuilder) -> InputProof {
    let binding = Sha256::new()
        .chain_update(input.contract().0)
        .chain_update(input.user().0)
        .finalize();
    let values = input
        .values()
        .iter()
        .fold(Sha256::new(), |hasher, value| hasher.chain_update(value.to_le_bytes()))
        .finalize();

    let mut proof = Vec::with_capacity(INPUT_PROOF_LEN);
    proof.extend_from_slice(&binding);
    proof.extend_from_slice(&values);
    InputProof(proof)
}

/// Wraps `value` in a placeholder handle.
pub fn placeholder_handle(value: u64) -> CiphertextHandle {
    let mut bytes = [HANDLE_MARKER; 32];
    bytes[..8].copy_from_slice(&value.to_le_bytes());
    CiphertextHandle(bytes)
}

/// Reads the value back out of a placeholder handle.
pub fn read_placeholder_handle(handle: &CiphertextHandle) -> Option<u64> {
    if handle.0[8..].iter().any(|byte| *byte != HANDLE_MARKER) {
        return None;
    }
    let mut value = [0u8; 8];
    value.copy_from_slice(&handle.0[..8]);
    Some(u64::from_le_bytes(value))
}

fn demo_transaction_hash(counter: u64) -> TransactionHash {
    let mut hasher = Sha256::new();
    hasher.update(b"demo-tx");
    hasher.update(counter.to_le_bytes());
    TransactionHash(hasher.finalize().into())
}

// ============================================================================
// Contract
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct DemoGame {
    house: Move,
    guess: Option<Move>,
}

struct Ledger {
    games: HashMap<GameId, DemoGame>,
    next_game_id: u64,
    block_number: u64,
    rng: StdRng,
}

impl Ledger {
    fn confirm(&mut self) -> TransactionReceipt {
        self.block_number += 1;
        TransactionReceipt {
            hash: demo_transaction_hash(self.block_number),
            block_number: self.block_number,
        }
    }

    fn record_guess(&mut self, game_id: GameId, guess: Move) -> Result<TransactionReceipt, ContractError> {
        let game = self
            .games
            .get_mut(&game_id)
            .ok_or(ContractError::GameNotFound(game_id))?;
        if game.guess.is_some() {
            return Err(ContractError::GuessAlreadySubmitted(game_id));
        }
        game.guess = Some(guess);
        Ok(self.confirm())
    }
}

/// Contract simulated in memory.
///
/// `start_game` draws the house move; `get_result` compares it with the
/// player's move using the usual rules (ties are losses) and returns the
/// outcome as placeholder handles.
#[derive(Clone)]
pub struct DemoContract {
    ledger: Arc<Mutex<Ledger>>,
    reachable: bool,
}

impl DemoContract {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic house moves.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// A contract every call to which fails with a network error.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                games: HashMap::new(),
                next_game_id: 1,
                block_number: 0,
                rng,
            })),
            reachable: true,
        }
    }

    fn ensure_reachable(&self) -> Result<(), ContractError> {
        if self.reachable {
            Ok(())
        } else {
            Err(ContractError::NetworkError(format!(
                "contract {} is unreachable",
                CONTRACT_ADDRESS
            )))
        }
    }
}

impl Default for DemoContract {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameContract for DemoContract {
    fn address(&self) -> Address {
        CONTRACT_ADDRESS
    }

    async fn start_game(&self, player: &Address) -> Result<GameId, ContractError> {
        self.ensure_reachable()?;
        let mut ledger = self.ledger.lock().await;

        let game_id = GameId::new(ledger.next_game_id);
        ledger.next_game_id += 1;
        let house = Move::try_from(ledger.rng.gen_range(0..3u8))
            .map_err(|e| ContractError::Reverted(e.to_string()))?;
        ledger.games.insert(game_id, DemoGame { house, guess: None });
        ledger.confirm();

        tracing::debug!(%player, %game_id, "demo game started");
        Ok(game_id)
    }

    async fn make_guess(
        &self,
        game_id: GameId,
        handle: CiphertextHandle,
        proof: &InputProof,
    ) -> Result<TransactionReceipt, ContractError> {
        self.ensure_reachable()?;
        if proof.0.is_empty() {
            return Err(ContractError::InvalidCiphertext("empty input proof".into()));
        }
        let guess = read_placeholder_handle(&handle)
            .and_then(|value| u8::try_from(value).ok())
            .and_then(|value| Move::try_from(value).ok())
            .ok_or_else(|| ContractError::InvalidCiphertext("unrecognized handle".into()))?;

        let receipt = self.ledger.lock().await.record_guess(game_id, guess)?;
        tracing::debug!(%game_id, block = receipt.block_number, "encrypted guess recorded");
        Ok(receipt)
    }

    async fn make_guess_demo(
        &self,
        game_id: GameId,
        choice: Move,
    ) -> Result<TransactionReceipt, ContractError> {
        self.ensure_reachable()?;
        let receipt = self.ledger.lock().await.record_guess(game_id, choice)?;
        tracing::debug!(%game_id, %choice, block = receipt.block_number, "plaintext guess recorded");
        Ok(receipt)
    }

    async fn get_result(&self, game_id: GameId) -> Result<ResultHandles, ContractError> {
        self.ensure_reachable()?;
        let ledger = self.ledger.lock().await;
        let game = ledger
            .games
            .get(&game_id)
            .ok_or(ContractError::GameNotFound(game_id))?;
        let guess = game.guess.ok_or(ContractError::GuessMissing(game_id))?;

        let result = GameResult::resolve(guess, game.house);
        Ok(ResultHandles {
            won: placeholder_handle(u64::from(result.won)),
            choice: placeholder_handle(u64::from(result.choice.as_u8())),
        })
    }
}

// ============================================================================
// Encryption
// ============================================================================

/// Encryption client producing placeholder handles.
#[derive(Debug, Clone)]
pub struct DemoEncryptionClient {
    available: bool,
}

impl DemoEncryptionClient {
    pub fn new() -> Self {
        Self { available: true }
    }

    /// A client whose every call fails as if the relayer were down.
    pub fn unavailable() -> Self {
        Self { available: false }
    }

    fn ensure_available(&self) -> Result<(), EncryptionError> {
        if self.available {
            Ok(())
        } else {
            Err(EncryptionError::Unavailable("relayer unreachable".into()))
        }
    }
}

impl Default for DemoEncryptionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EncryptionClient for DemoEncryptionClient {
    async fn get_public_key(&self) -> Result<PublicKey, EncryptionError> {
        self.ensure_available()?;
        Ok(PublicKey(vec![0u8; PUBLIC_KEY_LEN]))
    }

    async fn encrypt(&self, input: EncryptedInputBuilder) -> Result<EncryptedInput, EncryptionError> {
        self.ensure_available()?;
        if input.is_empty() {
            return Err(EncryptionError::InvalidInput("no values staged".into()));
        }
        if input.contract() != CONTRACT_ADDRESS {
            return Err(EncryptionError::InvalidInput(format!(
                "input bound to unknown contract {}",
                input.contract()
            )));
        }
        Ok(EncryptedInput {
            handles: input.values().iter().copied().map(placeholder_handle).collect(),
            input_proof: input_proof(&input),
        })
    }

    async fn user_decrypt(
        &self,
        handles: &[CiphertextHandle],
        _contract: Address,
        _user: Address,
    ) -> Result<Vec<u64>, EncryptionError> {
        self.ensure_available()?;
        handles
            .iter()
            .map(|handle| {
                read_placeholder_handle(handle).ok_or_else(|| {
                    EncryptionError::DecryptionFailed("handle was not produced by this client".into())
                })
            })
            .collect()
    }
}

// ============================================================================
// Service status
// ============================================================================

/// Monitor that always reports both services as reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticServiceMonitor {
    demo_mode: bool,
}

impl StaticServiceMonitor {
    pub const fn new(demo_mode: bool) -> Self {
        Self { demo_mode }
    }
}

#[async_trait]
impl ServiceMonitor for StaticServiceMonitor {
    async fn check(&self) -> ServiceStatus {
        ServiceStatus {
            demo_mode_active: self.demo_mode,
            ..ServiceStatus::healthy()
        }
    }
}
