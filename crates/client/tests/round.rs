//! Full rounds through the client composition root.

use client_frontend_core::FrontendConfig;
use game_core::{Move, Stage, StageKey};
use rps_client::{CliConfig, Client};
use runtime::{FallbackReason, RuntimeConfig};

fn seeded() -> RuntimeConfig {
    RuntimeConfig {
        rng_seed: Some(11),
        ..RuntimeConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn demo_round_confirms_every_step() {
    let client = Client::builder()
        .runtime_config(seeded())
        .build()
        .await
        .unwrap();

    let mut seen = Vec::new();
    let report = client
        .play(Move::Paper, &mut |stage: &'static Stage| seen.push(stage.key))
        .await;

    assert!(!report.used_fallback());
    assert_eq!(seen.len(), 5);

    let progress = report.progress.expect("timeline driver finished");
    assert_eq!(progress.percent, 100);
    assert_eq!(progress.active, Some(StageKey::DecryptOutput));
    assert!(!progress.visible, "indicator hides once the bus closes");
    assert!(!progress.fallback);
}

#[tokio::test(start_paused = true)]
async fn unreachable_contract_falls_back_everywhere() {
    let client = Client::builder()
        .runtime_config(seeded())
        .frontend_config(FrontendConfig::default())
        .fail_contract(true)
        .build()
        .await
        .unwrap();

    let report = client.play(Move::Rock, &mut |_: &'static Stage| {}).await;

    assert!(report.game_id.is_fallback());
    assert!(matches!(
        report.receipt.reason(),
        Some(FallbackReason::Contract(_))
    ));
    assert!(report.result.is_fallback());
    assert!(report.receipt.value().hash.to_string().starts_with("0x"));

    let progress = report.progress.expect("timeline driver finished");
    let keys: Vec<_> = progress.entries.iter().map(|e| e.key).collect();
    assert_eq!(
        keys,
        vec![
            StageKey::PrepareClient,
            StageKey::EncryptInput,
            StageKey::BlindComputation,
            StageKey::DecryptOutput,
            StageKey::FallbackMode,
        ]
    );
    assert!(progress.fallback);
    assert!(!progress.visible);
}

#[tokio::test]
async fn demo_mode_report_serializes_to_json() {
    let cli = CliConfig {
        demo_mode: true,
        ..CliConfig::default()
    };
    let frontend = FrontendConfig::from_lookup(|key| {
        (key == "PROGRESS_HIDE_DELAY_MS").then(|| "0".to_string())
    });
    let client = Client::builder()
        .runtime_config(seeded())
        .frontend_config(frontend)
        .cli_config(cli)
        .build()
        .await
        .unwrap();
    assert!(client.connection().status().use_demo_guess());

    let report = client.play(Move::Scissors, &mut |_: &'static Stage| {}).await;
    let json = report.to_json();

    assert_eq!(json["choice"], "scissors");
    assert_eq!(json["receipt"]["fallback"], false);
    assert_eq!(json["timeline"]["percent"], 100);
    assert!(json["result"]["value"]["won"].is_boolean());
    assert!(report.to_string().contains("You played scissors"));
}
