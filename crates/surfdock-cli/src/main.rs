mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod ui;

use crate::cli::{Cli, Commands, parse_exit_code};
use crate::error::{CliError, Result};
use crate::ui::UiManager;
use clap::Parser;
use tokio::task;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run_app(cli).await {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        if let Some(tail) = e.log_tail() {
            eprintln!("\nLast {} line(s) of the docking log:", tail.len());
            for line in tail {
                eprintln!("  {}", line);
            }
        }
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run_app(cli: Cli) -> Result<()> {
    let (ui_manager, ui_sender, shutdown_sender) = UiManager::new();
    let ui_handle = task::spawn(ui_manager.run());

    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref(), ui_sender.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    let command_result = async {
        info!("🚀 SURFDOCK CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
        debug!("Full CLI arguments parsed: {:?}", &cli);
        let config_path = cli.config.as_deref();

        match cli.command {
            Commands::Dock(args) => {
                info!("Dispatching to 'dock' command.");
                commands::dock::run(args, config_path, ui_sender).await
            }
            Commands::Summarize(args) => {
                info!("Dispatching to 'summarize' command.");
                commands::summarize::run(args, config_path)
            }
            Commands::Merge(args) => {
                info!("Dispatching to 'merge' command.");
                commands::merge::run(args, config_path, ui_sender)
            }
            Commands::SurfaceVectors(args) => {
                info!("Dispatching to 'surface-vectors' command.");
                commands::surface::run(args, ui_sender)
            }
            Commands::ExtractDomain(args) => {
                info!("Dispatching to 'extract-domain' command.");
                commands::domain::run(args, ui_sender)
            }
        }
    }
    .await;

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    if shutdown_sender.send(true).is_err() {
        warn!("UI manager may have already exited before shutdown signal.");
    }

    ui_handle
        .await
        .map_err(|e| CliError::Other(anyhow::anyhow!("UI manager task failed: {}", e)))?;

    command_result
}
