// src/main.rs

use anyhow::Result;
use clap::Parser;
use srcunify::cli::Cli;
use srcunify::config::RunConfig;
use srcunify::errors::Error;
#[cfg(feature = "progress")]
use srcunify::progress::IndicatifProgress;
use srcunify::progress::ProgressReporter;
use srcunify::recent::RecentStore;
use srcunify::run;
use srcunify::signal::setup_signal_handler;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if cfg!(debug_assertions) {
            "srcunify=debug"
        } else {
            "srcunify=info"
        },
    ))
    .format_timestamp(None)
    .init();

    log::info!("Starting srcunify v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    // SECURITY: Panic Hook to prevent info leaks
    std::panic::set_hook(Box::new(|info| {
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => "Box<Any>",
        };
        // Simple redaction for panic messages
        eprintln!(
            "Application Error: {}",
            msg.replace(env!("CARGO_MANIFEST_DIR"), "<redacted>")
                .replace(std::path::MAIN_SEPARATOR, "/")
        );
    }));

    // --- Setup ---
    let cli = Cli::parse();

    // --- Handle --list-recent (no walk involved) ---
    if cli.list_recent {
        let entries = RecentStore::open().load();
        if entries.is_empty() {
            println!("No recent projects.");
        } else {
            for entry in entries {
                println!("{} ({})", entry.name, entry.kind);
            }
        }
        return Ok(());
    }

    // Decide whether to show a progress bar. Show it if stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Configuration & Execution ---
    let config = match RunConfig::try_from(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    log::debug!("Configuration built successfully.");

    let token = setup_signal_handler()?;

    let result = run(&config, &token, progress_reporter);

    // --- Error Handling ---
    if let Err(e) = result {
        match e {
            Error::Interrupted => {
                eprintln!("\nOperation cancelled.");
                std::process::exit(130);
            }
            Error::NoFilesFound => {
                eprintln!("srcunify: No supported files found in the given inputs.");
                return Ok(());
            }
            _ => {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
