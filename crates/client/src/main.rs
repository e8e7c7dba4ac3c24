//! Encrypted Rock-Paper-Scissors demo client.
//!
//! Plays one round against the in-memory demo contract and prints the stage
//! narration, the revealed result and the final timeline.
//!
//! ```bash
//! cargo run -p rps-client -- --choice paper
//! cargo run -p rps-client -- --choice rock --fail-contract --json
//! cargo run -p rps-client -- --explain blind-computation
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use client_frontend_core::FrontendConfig;
use game_core::{Move, Stage};
use rps_client::{CliConfig, Client, logging};
use runtime::RuntimeConfig;

/// Play a round of encrypted Rock-Paper-Scissors
#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Encrypted Rock-Paper-Scissors demo", long_about = None)]
#[command(version)]
struct Cli {
    /// Move to play (rock, paper or scissors)
    #[arg(long, default_value = "rock")]
    choice: Move,

    /// Make every contract call fail to show fallback mode
    #[arg(long)]
    fail_contract: bool,

    /// Print the round report as JSON
    #[arg(long)]
    json: bool,

    /// Describe one stage (e.g. `encrypt-input`) and exit
    #[arg(long, value_name = "STAGE")]
    explain: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(key) = &cli.explain {
        print!("{}", rps_client::explain(key)?);
        return Ok(());
    }

    // Config loaders warn about malformed values; the subscriber must exist first.
    logging::setup_logging(CliConfig::session_id_from_env().as_deref())?;

    let runtime_config = RuntimeConfig::from_env();
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();

    tracing::info!("Starting RPS client");
    tracing::info!("Player: {}", cli_config.player);
    tracing::info!("Result source: {}", runtime_config.result_source);
    tracing::info!("Demo mode: {}", cli_config.demo_mode);

    let client = Client::builder()
        .runtime_config(runtime_config)
        .frontend_config(frontend_config)
        .cli_config(cli_config)
        .fail_contract(cli.fail_contract)
        .build()
        .await
        .context("failed to build client")?;

    let quiet = cli.json;
    let report = client
        .play(cli.choice, &mut |stage: &'static Stage| {
            if !quiet {
                println!("{} {}", stage.icon, stage.summary);
            }
        })
        .await;

    if cli.json {
        let rendered =
            serde_json::to_string_pretty(&report.to_json()).context("failed to render report")?;
        println!("{rendered}");
    } else {
        println!();
        print!("{report}");
    }

    tracing::info!(fallback = report.used_fallback(), "Round finished");
    Ok(())
}
