use crate::cli::DockArgs;
use crate::config::{FileConfig, build_dock_config};
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use std::path::Path;
use surfdock::engine::progress::ProgressReporter;
use surfdock::engine::summary;
use surfdock::workflows;
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(args: DockArgs, config_path: Option<&Path>, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let file_config = FileConfig::load(config_path)?;
    info!("Merging configuration from file and CLI arguments...");
    let app = build_dock_config(&args, file_config)?;
    let config = &app.docking;

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Preparing docking of '{}' on '{}' ({} decoys)...",
        config.protein_name, config.surface_name, config.nstruct
    );
    let prepared = workflows::dock::prepare(config, &reporter)?;
    println!("  Structure:        {}", prepared.structure.display());
    println!("  Surface vectors:  {}", prepared.surface_vectors.display());
    for (window, path) in &prepared.fragment_files {
        println!("  Fragments ({}-mer): {}", window, path.display());
    }
    println!("  Flags:            {}", prepared.flags.display());

    let command_line = prepared
        .command_line()
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");

    if app.dry_run {
        println!("Dry run; the docking command would be:");
        println!("  (cd {} && {})", prepared.layout.dir().display(), command_line);
        return Ok(());
    }

    info!("Running: {}", command_line);
    let report = workflows::dock::execute(&prepared, config, &reporter).await?;

    println!(
        "✓ Docking finished: {} decoy(s) scored in {}",
        report.total_decoys,
        report.scorefile.display()
    );
    if report.best.is_empty() {
        println!("Warning: no decoy has a numeric '{}' value.", config.summary.score_column);
    } else {
        println!("Best {} decoy(s):", report.best.len());
        print!("{}", summary::render_table(&report.best, &config.summary.score_column));
    }
    println!("Full log: {}", report.log.display());

    Ok(())
}
