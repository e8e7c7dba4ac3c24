//! CLI-specific configuration.
use std::env;

use client_blockchain_core::Address;

/// Wallet used when `PLAYER_ADDRESS` is unset.
pub const DEFAULT_PLAYER: Address = Address([
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
]);

/// Settings of the demo binary, separate from runtime and frontend configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Log directory name; a timestamped name is generated when unset.
    pub session_id: Option<String>,
    pub player: Address,
    /// Submit plaintext guesses instead of encrypting them.
    pub demo_mode: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            player: DEFAULT_PLAYER,
            demo_mode: false,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SESSION_ID` - Log session directory name (default: `session_<unix time>`)
    /// - `PLAYER_ADDRESS` - 0x-prefixed wallet address (default: a local test account)
    /// - `DEMO_MODE` - Submit plaintext guesses (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.session_id = Self::session_id_from_lookup(&lookup);

        if let Some(raw) = lookup("PLAYER_ADDRESS") {
            match raw.trim().parse::<Address>() {
                Ok(address) => config.player = address,
                Err(error) => {
                    tracing::warn!("Ignoring PLAYER_ADDRESS {:?}: {}", raw, error);
                }
            }
        }

        if let Some(demo) = lookup("DEMO_MODE").and_then(|raw| parse_bool(&raw)) {
            config.demo_mode = demo;
        }

        config
    }

    /// Reads only `GAME_SESSION_ID`, so logging can be installed before the
    /// remaining variables are parsed and their warnings recorded.
    pub fn session_id_from_env() -> Option<String> {
        Self::session_id_from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn session_id_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
        lookup("GAME_SESSION_ID").filter(|id| !id.trim().is_empty())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
