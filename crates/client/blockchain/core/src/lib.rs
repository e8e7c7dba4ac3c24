//! Collaborator abstractions for the encrypted Rock-Paper-Scissors client.
//!
//! The orchestrator in `runtime` never talks to a chain or an encryption
//! library directly. It goes through the traits defined here:
//!
//! ```text
//! GameContract      startGame / makeGuess / makeGuessDemo / getResult
//! EncryptionClient  getPublicKey / createEncryptedInput / encrypt / userDecrypt
//! ServiceMonitor    availability snapshot taken once per connection
//! ```
//!
//! The [`demo`] module provides in-memory implementations that stand in for
//! the wallet, the contract and the FHE library. They return fixed-shape
//! placeholder bytes and never perform real cryptography.
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{DemoContract, DemoEncryptionClient, GameContract};
//!
//! let contract = DemoContract::new();
//! let game_id = contract.start_game(&player).await?;
//! let receipt = contract.make_guess_demo(game_id, Move::Paper).await?;
//! ```

pub mod demo;
pub mod network;
pub mod traits;
pub mod types;

// Re-export all traits
pub use traits::{ContractError, EncryptionClient, EncryptionError, GameContract, ServiceMonitor};

// Re-export all types
pub use types::{
    Address, CiphertextHandle, EncryptedInput, EncryptedInputBuilder, HexParseError, InputProof,
    PublicKey, ResultHandles, ServiceStatus, TransactionHash, TransactionReceipt,
};

pub use demo::{DemoContract, DemoEncryptionClient, StaticServiceMonitor};
pub use network::{CHAIN_ID, CONTRACT_ADDRESS, NETWORK_NAME};
