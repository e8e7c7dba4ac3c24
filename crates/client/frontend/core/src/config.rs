//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;
use std::time::Duration;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub progress: ProgressConfig,
    pub messages: MessageConfig,
}

impl FrontendConfig {
    pub const fn new(progress: ProgressConfig, messages: MessageConfig) -> Self {
        Self { progress, messages }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROGRESS_HIDE_DELAY_MS` - Delay before hiding the indicator after `decrypt-output` (default: 1500)
    /// - `MESSAGE_CAPACITY` - Message log capacity (default: 32)
    /// - `SHOW_STAGE_MESSAGES` - Narrate each stage in the message log (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`FrontendConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_var::<u64>(&lookup, "PROGRESS_HIDE_DELAY_MS") {
            config.progress.hide_delay = Duration::from_millis(ms);
        }

        if let Some(capacity) = read_var::<usize>(&lookup, "MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }
        if let Some(show) = read_var_bool(&lookup, "SHOW_STAGE_MESSAGES") {
            config.messages.show_stages = show;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct ProgressConfig {
    /// How long the indicator stays visible after `decrypt-output`.
    pub hide_delay: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            hide_delay: Duration::from_millis(1500),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    pub show_stages: bool,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 32,
            show_stages: true,
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

fn read_var_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    match lookup(key)?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let config = FrontendConfig::from_lookup(lookup(&[]));
        assert_eq!(config.progress.hide_delay, Duration::from_millis(1500));
        assert_eq!(config.messages.capacity, 32);
        assert!(config.messages.show_stages);
    }

    #[test]
    fn overrides() {
        let config = FrontendConfig::from_lookup(lookup(&[
            ("PROGRESS_HIDE_DELAY_MS", "0"),
            ("MESSAGE_CAPACITY", "0"),
            ("SHOW_STAGE_MESSAGES", "off"),
        ]));
        assert_eq!(config.progress.hide_delay, Duration::ZERO);
        assert_eq!(config.messages.capacity, 1);
        assert!(!config.messages.show_stages);
    }
}
