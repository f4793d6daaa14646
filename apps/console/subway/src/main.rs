use subway::console::Console;
use subway::error::SubwayError;
use subway::logger::initialize as LoggerInitialize;
use subway::terminal_view::TerminalView;

use client_core::config::ClientConfig;

use std::fs::create_dir_all;
use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};
use tokio::runtime::Builder as RuntimeBuilder;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.message());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SubwayError> {
    let config_dir = ClientConfig::default_dir()
        .ok_or_else(|| SubwayError::subway("No config directory on this platform"))?;

    create_dir_all(&config_dir).map_err(|e| {
        SubwayError::subway(format!(
            "Failed to create config directory {}: {e}",
            config_dir.display()
        ))
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&config_dir)?;

    info!("Subway console starting");
    info!("Config directory: {}", config_dir.display());

    let config = ClientConfig::load(&config_dir)?.with_env_overrides()?;

    // UI events are handled one at a time.
    let runtime = RuntimeBuilder::new_current_thread().enable_all().build()?;

    runtime.block_on(async {
        let view = Arc::new(TerminalView::stdio());
        let console = Console::new(&config, view)?;
        console.run().await
    })
}
