//! Runtime configuration structures and loaders.
use std::env;
use std::time::Duration;

/// How `fetch_result` produces the revealed outcome.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResultSource {
    /// Ask the contract for the result handles and decrypt them; randomize
    /// only when a collaborator fails.
    #[default]
    Decrypt,

    /// Always randomize without contacting the collaborators.
    Simulated,
}

/// Configuration of the game action orchestrator.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Pause after each progress stage so the narration can be followed.
    pub stage_delay: Duration,
    pub result_source: ResultSource,
    /// Seed for placeholder results; entropy when unset.
    pub rng_seed: Option<u64>,
    /// Capacity of the stage event bus.
    pub event_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stage_delay: Duration::ZERO,
            result_source: ResultSource::default(),
            rng_seed: None,
            event_buffer: 64,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STAGE_DELAY_MS` - Pause after each progress stage (default: 0)
    /// - `RESULT_SOURCE` - `decrypt` or `simulated` (default: decrypt)
    /// - `RNG_SEED` - Seed for placeholder results (default: entropy)
    /// - `STAGE_EVENT_BUFFER` - Stage bus capacity (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = parse::<u64>(&lookup, "STAGE_DELAY_MS") {
            config.stage_delay = Duration::from_millis(ms);
        }

        if let Some(source) = parse::<ResultSource>(&lookup, "RESULT_SOURCE") {
            config.result_source = source;
        } else if let Some(raw) = lookup("RESULT_SOURCE") {
            tracing::warn!("Ignoring unknown RESULT_SOURCE {:?}", raw);
        }

        config.rng_seed = parse::<u64>(&lookup, "RNG_SEED");

        if let Some(capacity) = parse::<usize>(&lookup, "STAGE_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
