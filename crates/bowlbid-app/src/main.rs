// Headless player-pool driver.
//
// Startup sequence:
// 1. Initialize tracing (log to file; stdout carries protocol output)
// 2. Load config (copying defaults on first run)
// 3. Create the session state
// 4. Answer JSON commands from stdin until QUIT or end of input

use std::io;

use anyhow::Context;
use tracing::info;

use bowlbid_app::app::{self, AppState};
use bowlbid_core::config;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("bowlbid starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} races, level mode {:?}",
        config.league.name,
        config.league.races.len(),
        config.league.level_mode
    );

    // 3. Session state
    let mut state = AppState::new(config);

    // 4. Command loop
    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(&mut state, stdin.lock(), stdout.lock()).context("command loop failed")?;

    info!(
        "bowlbid shut down cleanly with {} player(s) in the pool",
        state.roster.len()
    );
    Ok(())
}

/// Initialize tracing to log to a file (stdout is reserved for updates).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("bowlbid.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bowlbid_core=info,bowlbid_app=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
