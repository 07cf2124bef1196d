use crate::cli::MergeArgs;
use crate::config::{FileConfig, surface_residue_filter};
use crate::config::defaults::DefaultsConfig;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use std::path::Path;
use surfdock::engine::config::{ChainAssignment, MergeOptions, MergeOrder};
use surfdock::engine::progress::ProgressReporter;
use surfdock::workflows::merge::{self, MergeRequest};
use tokio::sync::mpsc;

fn merge_options(args: &MergeArgs, file_config: &FileConfig) -> MergeOptions {
    let defaults = DefaultsConfig::default();
    let docking_file = file_config.docking.clone().unwrap_or_default();
    let sanitize = !args.no_sanitize;

    MergeOptions {
        chains: ChainAssignment {
            protein: args
                .protein_chain
                .or(docking_file.protein_chain)
                .unwrap_or(defaults.protein_chain),
            surface: args
                .surface_chain
                .or(docking_file.surface_chain)
                .unwrap_or(defaults.surface_chain),
        },
        order: if args.protein_first {
            MergeOrder::ProteinFirst
        } else {
            MergeOrder::SurfaceFirst
        },
        serial_start: args.serial_start,
        add_ter: args.ter,
        strip_hydrogens: sanitize,
        require_oxygen: sanitize,
        require_cb: sanitize,
        prune_dangling: sanitize,
        surface_residue: surface_residue_filter(
            args.surface_residue.clone(),
            args.keep_all_surface,
            &docking_file,
        ),
    }
}

pub fn run(args: MergeArgs, config_path: Option<&Path>, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let file_config = FileConfig::load(config_path)?;
    let request = MergeRequest {
        protein: args.protein.clone(),
        surface: args.surface.clone(),
        output: args.output.clone(),
        options: merge_options(&args, &file_config),
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let summary = merge::run(&request, &reporter)?;

    println!(
        "✓ Merged {} atoms ({} protein, {} surface) into: {}",
        summary.total_atoms,
        summary.protein_atoms,
        summary.surface_atoms,
        request.output.display()
    );
    if summary.sanitize.hydrogens_removed > 0 || !summary.sanitize.residues_removed.is_empty() {
        println!(
            "  Removed {} hydrogen(s) and {} incomplete residue(s).",
            summary.sanitize.hydrogens_removed,
            summary.sanitize.residues_removed.len()
        );
    }
    Ok(())
}
