//! Static catalog of the narration stages shown while a round is played.
//!
//! Each stage names one conceptual step of the FHE workflow (prepare keys,
//! encrypt, submit, compute blindly, decrypt). The catalog is a constant
//! table: stages are never created or mutated at runtime, so every consumer
//! holds `&'static Stage` references.
//!
//! Five stages count toward the progress bar. The sixth, `fallback-mode`, is
//! a terminal notice raised when a collaborator is unreachable; it sorts after
//! everything else and never contributes to progress.

/// Identifier of a catalog stage.
///
/// Converts to and from the kebab-case keys used in logs and JSON output
/// (`"prepare-client"`, `"fallback-mode"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum StageKey {
    PrepareClient,
    EncryptInput,
    SubmitCiphertext,
    BlindComputation,
    DecryptOutput,
    FallbackMode,
}

/// Key of the terminal stage raised when a collaborator fails.
pub const FALLBACK_STAGE_KEY: StageKey = StageKey::FallbackMode;

/// One entry of the stage catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stage {
    pub key: StageKey,
    pub label: &'static str,
    pub summary: &'static str,
    pub insight: &'static str,
    pub icon: &'static str,
    /// Sort position in the timeline.
    pub order: u8,
    /// Whether the stage counts toward the progress bar.
    pub is_progress: bool,
}

impl Stage {
    /// Kebab-case identifier of this stage.
    pub fn id(&self) -> &'static str {
        self.key.into()
    }

    pub fn is_fallback(&self) -> bool {
        self.key == FALLBACK_STAGE_KEY
    }

    /// Terminal stage of the happy path.
    pub fn is_final(&self) -> bool {
        self.key == StageKey::DecryptOutput
    }
}

/// The catalog, in `order`.
pub static STAGES: [Stage; 6] = [
    Stage {
        key: StageKey::PrepareClient,
        label: "Prepare client",
        summary: "Load the network public key and bind the session to your wallet.",
        insight: "The public key lets anyone encrypt for the contract, but only key holders can decrypt.",
        icon: "🔑",
        order: 1,
        is_progress: true,
    },
    Stage {
        key: StageKey::EncryptInput,
        label: "Encrypt input",
        summary: "Your move is encrypted locally before it leaves the browser.",
        insight: "The ciphertext comes with an input proof showing it was produced by this wallet for this contract.",
        icon: "🔒",
        order: 2,
        is_progress: true,
    },
    Stage {
        key: StageKey::SubmitCiphertext,
        label: "Submit ciphertext",
        summary: "The encrypted move and its proof are sent in a transaction.",
        insight: "Validators only ever see an opaque handle, never the move itself.",
        icon: "📤",
        order: 3,
        is_progress: true,
    },
    Stage {
        key: StageKey::BlindComputation,
        label: "Blind computation",
        summary: "The contract compares both moves without decrypting them.",
        insight: "Homomorphic operations produce an encrypted winner flag from encrypted inputs.",
        icon: "⚙️",
        order: 4,
        is_progress: true,
    },
    Stage {
        key: StageKey::DecryptOutput,
        label: "Decrypt output",
        summary: "The result handles are decrypted for your address only.",
        insight: "User decryption re-encrypts the result under a key you control before revealing it.",
        icon: "🔓",
        order: 5,
        is_progress: true,
    },
    Stage {
        key: StageKey::FallbackMode,
        label: "Fallback mode",
        summary: "A service was unreachable, so a placeholder result is shown instead.",
        insight: "Demo mode keeps the walkthrough moving; nothing shown after this point came from the chain.",
        icon: "🛟",
        order: 99,
        is_progress: false,
    },
];

/// Error raised by [`stage_by_key`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("stage not found: {0:?}")]
    UnknownStage(String),
}

/// Typed lookup; every [`StageKey`] has a catalog entry.
pub fn stage(key: StageKey) -> &'static Stage {
    STAGES
        .iter()
        .find(|stage| stage.key == key)
        .unwrap_or_else(|| unreachable!("stage catalog is missing {key}"))
}

/// Resolves a kebab-case key to its catalog entry.
///
/// An unknown key means the caller and the catalog disagree; the error is
/// meant to be propagated, not recovered from.
pub fn stage_by_key(key: &str) -> Result<&'static Stage, StageError> {
    STAGES
        .iter()
        .find(|stage| stage.id() == key)
        .ok_or_else(|| StageError::UnknownStage(key.to_owned()))
}

/// Stages that count toward the progress bar, in `order`.
pub fn progress_stages() -> impl Iterator<Item = &'static Stage> {
    STAGES.iter().filter(|stage| stage.is_progress)
}

pub fn progress_stage_count() -> usize {
    progress_stages().count()
}
