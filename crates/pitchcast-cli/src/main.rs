// Pitchcast batch projection entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout carries the JSON report)
// 2. Load config
// 3. Load roster and season history
// 4. Project every player concurrently
// 5. Write the JSON report and log a top-N summary

use pitchcast_cli::batch;
use pitchcast_cli::config;
use pitchcast_cli::input;
use pitchcast_cli::output::{self, Report};
use pitchcast_football::Projector;

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Players listed in the closing log summary.
const SUMMARY_SIZE: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Pitchcast starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    let reference_date = config
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(
        "Config loaded: league={}, reference date {}",
        config.league.name, reference_date
    );

    // 3. Load inputs
    let inputs = input::load_all_from_paths(&config.data_paths)
        .context("failed to load projection inputs")?;
    info!(
        "Loaded {} players, history for {}",
        inputs.players.len(),
        inputs.history.len()
    );

    // 4. Project
    let projector = Arc::new(Projector::new(config.engine.clone(), reference_date));
    let results = batch::run_batch(
        projector,
        inputs.players,
        Arc::new(inputs.history),
        Arc::new(config.league.clone()),
    )
    .await
    .context("batch projection failed")?;

    // 5. Report
    let report = Report {
        league: &config.league.name,
        reference_date,
        projections: &results,
    };
    let output_path = config.data_paths.output.as_deref().map(Path::new);
    output::write_report(&report, output_path).context("failed to write projections")?;

    for (rank, result) in batch::top_n(&results, SUMMARY_SIZE).iter().enumerate() {
        info!(
            "#{:<2} {:<24} {:<10} {:>6.1} pts ({} apps)",
            rank + 1,
            result.player_name,
            result.role,
            result.total_fantasy_points,
            result.expected_presences
        );
    }

    info!("Projected {} players", results.len());
    Ok(())
}

/// Initialize tracing to log to a file; stdout is reserved for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pitchcast.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("pitchcast_cli=info,pitchcast_football=info,warn")
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
