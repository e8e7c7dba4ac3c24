//! Startup behaviour of the binary: config warnings and `--explain`.

use std::io;
use std::sync::{Arc, Mutex};

use client_blockchain_core::Address;
use game_core::{StageKey, stage};
use rps_client::config::DEFAULT_PLAYER;
use rps_client::{CliConfig, explain};
use runtime::{ResultSource, RuntimeConfig};

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn malformed(key: &str) -> Option<String> {
    match key {
        "GAME_SESSION_ID" => Some("warn-check".into()),
        "PLAYER_ADDRESS" => Some("not-an-address".into()),
        "RESULT_SOURCE" => Some("oracle".into()),
        _ => None,
    }
}

#[test]
fn malformed_variables_are_reported_once_logging_is_installed() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    // Same order as the binary: session id first, then the full loaders.
    let session_id = CliConfig::session_id_from_lookup(&malformed);
    let (cli, runtime) = tracing::subscriber::with_default(subscriber, || {
        (
            CliConfig::from_lookup(malformed),
            RuntimeConfig::from_lookup(malformed),
        )
    });

    assert_eq!(session_id.as_deref(), Some("warn-check"));
    assert_eq!(cli.session_id, session_id);
    assert_eq!(cli.player, DEFAULT_PLAYER);
    assert_eq!(runtime.result_source, ResultSource::Decrypt);

    let log = captured.text();
    assert!(log.contains("Ignoring PLAYER_ADDRESS"), "log was: {log}");
    assert!(log.contains("Ignoring unknown RESULT_SOURCE"), "log was: {log}");
}

#[test]
fn session_id_lookup_ignores_blank_values() {
    let blank = |key: &str| (key == "GAME_SESSION_ID").then(|| "   ".to_string());
    assert_eq!(CliConfig::session_id_from_lookup(&blank), None);
    assert_ne!(CliConfig::default().player, Address::ZERO);
}

#[test]
fn explain_describes_known_stage() {
    let text = explain("blind-computation").unwrap();
    let blind = stage(StageKey::BlindComputation);
    assert!(text.contains(blind.label));
    assert!(text.contains(blind.insight));
    assert!(text.contains("blind-computation"));
}

#[test]
fn explain_rejects_unknown_stage() {
    let error = explain("quantum-teleport").unwrap_err();
    assert!(format!("{error:#}").contains("quantum-teleport"));
}
