//! Result type of the game actions.
//!
//! Actions never fail from the caller's point of view: a collaborator
//! failure is masked with a placeholder so the walkthrough can continue.
//! [`Outcome`] keeps that masking visible, so callers can tell a confirmed
//! value from a placeholder and log or display the reason.
use client_blockchain_core::{ContractError, EncryptionError};
use thiserror::Error;

/// Why an action resolved with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error("decrypted result is malformed: {0}")]
    MalformedResult(String),

    /// Results are randomized by configuration; no service was consulted.
    #[error("result simulated locally")]
    Simulated,
}

impl FallbackReason {
    /// Whether a collaborator actually failed, as opposed to a configured simulation.
    pub fn is_service_failure(&self) -> bool {
        !matches!(self, FallbackReason::Simulated)
    }
}

/// Value produced by a game action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The collaborators produced this value.
    Confirmed(T),

    /// A placeholder stands in for the value the collaborators could not produce.
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Confirmed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Confirmed(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Outcome::Confirmed(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Confirmed(value) => Outcome::Confirmed(f(value)),
            Outcome::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_keeps_value_and_reason() {
        let outcome: Outcome<u32> = Outcome::Fallback {
            value: 7,
            reason: ContractError::NetworkError("down".into()).into(),
        };
        assert!(outcome.is_fallback());
        assert_eq!(*outcome.value(), 7);
        assert!(outcome.reason().is_some_and(FallbackReason::is_service_failure));
        assert_eq!(outcome.map(|v| v * 2).into_value(), 14);
    }

    #[test]
    fn simulated_is_not_a_service_failure() {
        assert!(!FallbackReason::Simulated.is_service_failure());
        assert_eq!(Outcome::Confirmed(1).reason(), None);
    }
}
