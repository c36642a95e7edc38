use std::process::ExitCode;

use tile_screen::app::AppError;
use tile_screen::app::state::SessionOutcome;
use tile_screen::cli;
use tile_screen::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("tile_screen=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "tile_screen=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("tile-screen v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(SessionOutcome::Placed(placement)) => {
            tracing::info!(geometry = ?placement.geometry, "done");
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::Aborted(reason)) => {
            tracing::info!(?reason, "nothing placed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> Result<SessionOutcome, AppError> {
    let config = AppConfig::from_args(args)?;
    if let Some(path) = &config.settings_path {
        tracing::debug!("Settings file: {}", path.display());
    }
    launch(&config)
}

#[cfg(windows)]
fn launch(config: &AppConfig) -> Result<SessionOutcome, AppError> {
    tile_screen::app::controller::launch(config)
}

#[cfg(not(windows))]
fn launch(_config: &AppConfig) -> Result<SessionOutcome, AppError> {
    Err(AppError::UnsupportedPlatform)
}
