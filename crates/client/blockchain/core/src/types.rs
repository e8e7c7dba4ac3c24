//! Common types for contract and encryption interactions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error parsing a `0x`-prefixed hex value of fixed width.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HexParseError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

fn parse_fixed_hex<const N: usize>(value: &str) -> Result<[u8; N], HexParseError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or(HexParseError::MissingPrefix)?;
    let bytes = hex::decode(digits)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| HexParseError::InvalidLength { expected: N, actual })
}

/// 20-byte account or contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed_hex(s).map(Self)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = HexParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 32-byte transaction hash, displayed as `0x` followed by 64 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TransactionHash(pub [u8; 32]);

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for TransactionHash {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fixed_hex(s).map(Self)
    }
}

impl From<TransactionHash> for String {
    fn from(value: TransactionHash) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TransactionHash {
    type Error = HexParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub hash: TransactionHash,

    /// Block the transaction was included in. Placeholder receipts use 0.
    pub block_number: u64,
}

/// Opaque handle to an encrypted value stored by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CiphertextHandle(pub [u8; 32]);

/// Proof that a ciphertext was produced for a given contract and user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProof(pub Vec<u8>);

/// Network public key used for client-side encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(pub Vec<u8>);

/// Output of [`crate::EncryptionClient::encrypt`]: one handle per added value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInput {
    pub handles: Vec<CiphertextHandle>,
    pub input_proof: InputProof,
}

/// Plaintext values staged for encryption, bound to a contract and user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInputBuilder {
    contract: Address,
    user: Address,
    values: Vec<u64>,
}

impl EncryptedInputBuilder {
    pub fn new(contract: Address, user: Address) -> Self {
        Self {
            contract,
            user,
            values: Vec::new(),
        }
    }

    /// Stage an 8-bit value.
    pub fn add8(&mut self, value: u8) -> &mut Self {
        self.values.push(u64::from(value));
        self
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn user(&self) -> Address {
        self.user
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encrypted outcome of a game as stored on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultHandles {
    pub won: CiphertextHandle,
    pub choice: CiphertextHandle,
}

impl ResultHandles {
    /// Handles in the order they are decrypted: `[won, choice]`.
    pub fn to_vec(&self) -> Vec<CiphertextHandle> {
        vec![self.won, self.choice]
    }
}

/// Availability snapshot of the collaborators, taken once per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub fhevm_available: bool,
    pub contract_available: bool,
    pub demo_mode_active: bool,
}

impl ServiceStatus {
    pub const fn healthy() -> Self {
        Self {
            fhevm_available: true,
            contract_available: true,
            demo_mode_active: false,
        }
    }

    /// Whether guesses should go through `makeGuessDemo` with a plaintext move.
    pub const fn use_demo_guess(&self) -> bool {
        self.demo_mode_active || !self.fhevm_available
    }
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self::healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_and_parse_agree() {
        let address = crate::CONTRACT_ADDRESS;
        let text = address.to_string();
        assert_eq!(text, "0x5fbdb2315678afecb367f032d93f642f64180aa3");
        assert_eq!(text.parse::<Address>(), Ok(address));
    }

    #[test]
    fn address_parse_rejects_bad_input() {
        assert_eq!(
            "5fbdb2315678afecb367f032d93f642f64180aa3".parse::<Address>(),
            Err(HexParseError::MissingPrefix)
        );
        assert_eq!(
            "0x5fbd".parse::<Address>(),
            Err(HexParseError::InvalidLength {
                expected: 20,
                actual: 2
            })
        );
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(HexParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn transaction_hash_is_0x_plus_64_hex_digits() {
        let hash = TransactionHash([0xab; 32]);
        let text = hash.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), 66);
        assert_eq!(text.parse::<TransactionHash>(), Ok(hash));
    }

    #[test]
    fn builder_collects_values_in_order() {
        let mut builder = EncryptedInputBuilder::new(crate::CONTRACT_ADDRESS, Address::ZERO);
        builder.add8(2).add8(0);
        assert_eq!(builder.values(), &[2, 0]);
        assert!(!builder.is_empty());
    }

    #[test]
    fn demo_guess_follows_status() {
        assert!(!ServiceStatus::healthy().use_demo_guess());
        let demo = ServiceStatus {
            demo_mode_active: true,
            ..ServiceStatus::healthy()
        };
        assert!(demo.use_demo_guess());
        let no_fhe = ServiceStatus {
            fhevm_available: false,
            ..ServiceStatus::healthy()
        };
        assert!(no_fhe.use_demo_guess());
    }
}
