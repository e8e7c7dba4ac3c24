//! Collaborator traits consumed by the game action orchestrator.
//!
//! - [`GameContract`]: the RockPaperScissors contract behind a signing wallet
//! - [`EncryptionClient`]: the client-side FHE library
//! - [`ServiceMonitor`]: availability snapshot of the two above

use async_trait::async_trait;
use game_core::{GameId, Move};

use crate::types::{
    Address, CiphertextHandle, EncryptedInput, EncryptedInputBuilder, InputProof, PublicKey,
    ResultHandles, ServiceStatus, TransactionReceipt,
};

// ============================================================================
// Error Types
// ============================================================================

/// Contract and wallet errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Transaction rejected by wallet: {0}")]
    Rejected(String),

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Guess already submitted for game {0}")]
    GuessAlreadySubmitted(GameId),

    #[error("No guess submitted for game {0}")]
    GuessMissing(GameId),

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),
}

/// Encryption library errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncryptionError {
    #[error("Encryption service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),
}

// ============================================================================
// Collaborators
// ============================================================================

/// The deployed game contract, reached through the player's wallet.
///
/// Every state-changing call awaits confirmation before returning.
#[async_trait]
pub trait GameContract: Send + Sync {
    /// Address the contract is deployed at.
    fn address(&self) -> Address;

    /// Open a new game for `player`; the house move is drawn on-chain.
    async fn start_game(&self, player: &Address) -> Result<GameId, ContractError>;

    /// Submit an encrypted move.
    async fn make_guess(
        &self,
        game_id: GameId,
        handle: CiphertextHandle,
        proof: &InputProof,
    ) -> Result<TransactionReceipt, ContractError>;

    /// Submit a plaintext move (demo path, no encryption service).
    async fn make_guess_demo(
        &self,
        game_id: GameId,
        choice: Move,
    ) -> Result<TransactionReceipt, ContractError>;

    /// Encrypted outcome of a game with a submitted guess.
    async fn get_result(&self, game_id: GameId) -> Result<ResultHandles, ContractError>;
}

/// Client-side encryption library.
#[async_trait]
pub trait EncryptionClient: Send + Sync {
    /// Fetch the network public key.
    async fn get_public_key(&self) -> Result<PublicKey, EncryptionError>;

    /// Start an encrypted input bound to `contract` and `user`.
    fn create_encrypted_input(&self, contract: Address, user: Address) -> EncryptedInputBuilder {
        EncryptedInputBuilder::new(contract, user)
    }

    /// Encrypt the staged values, producing one handle per value plus a proof.
    async fn encrypt(&self, input: EncryptedInputBuilder) -> Result<EncryptedInput, EncryptionError>;

    /// Decrypt `handles` for `user`. Values come back in handle order.
    async fn user_decrypt(
        &self,
        handles: &[CiphertextHandle],
        contract: Address,
        user: Address,
    ) -> Result<Vec<u64>, EncryptionError>;
}

/// Reports whether the collaborators can be reached.
#[async_trait]
pub trait ServiceMonitor: Send + Sync {
    async fn check(&self) -> ServiceStatus;
}
