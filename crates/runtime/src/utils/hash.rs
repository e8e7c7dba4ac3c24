//! Deterministic placeholder values for fallback results.

use client_blockchain_core::TransactionHash;
use game_core::{GameId, Move};
use sha2::{Digest, Sha256};

/// Placeholder hash for a move that could not be submitted.
///
/// The same `(game_id, choice)` always yields the same hash, so a retried
/// fallback shows the same value.
pub fn placeholder_transaction_hash(game_id: GameId, choice: Move) -> TransactionHash {
    let mut hasher = Sha256::new();
    hasher.update(b"fallback-guess");
    hasher.update(game_id.get().to_le_bytes());
    hasher.update([choice.as_u8()]);
    TransactionHash(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_hash_is_deterministic() {
        let a = placeholder_transaction_hash(GameId::new(4), Move::Paper);
        let b = placeholder_transaction_hash(GameId::new(4), Move::Paper);
        assert_eq!(a, b);
    }

    #[test]
    fn placeholder_hash_depends_on_inputs() {
        let base = placeholder_transaction_hash(GameId::new(4), Move::Paper);
        assert_ne!(base, placeholder_transaction_hash(GameId::new(5), Move::Paper));
        assert_ne!(base, placeholder_transaction_hash(GameId::new(4), Move::Rock));
    }

    #[test]
    fn placeholder_hash_format() {
        let text = placeholder_transaction_hash(GameId::new(1), Move::Rock).to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), 66);
        assert!(text[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
