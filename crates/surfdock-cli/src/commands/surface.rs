use crate::cli::SurfaceVectorsArgs;
use crate::error::{CliError, Result};
use crate::ui::{CliProgressHandler, UiEvent};
use surfdock::core::geometry::LatticeSearchParams;
use surfdock::engine::progress::ProgressReporter;
use surfdock::workflows::surface::{self, SurfaceVectorRequest};
use tokio::sync::mpsc;

fn search_params(args: &SurfaceVectorsArgs) -> Result<LatticeSearchParams> {
    if args.bin_width <= 0.0 {
        return Err(CliError::Argument("--bin-width must be positive".to_string()));
    }
    if args.min_distance < 0.0 || args.max_distance <= args.min_distance {
        return Err(CliError::Argument(format!(
            "Invalid distance window ({}, {})",
            args.min_distance, args.max_distance
        )));
    }
    Ok(LatticeSearchParams {
        min_distance: args.min_distance,
        max_distance: args.max_distance,
        bin_width: args.bin_width,
    })
}

pub fn run(args: SurfaceVectorsArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let request = SurfaceVectorRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        params: search_params(&args)?,
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = surface::run(&request, &reporter)?;

    if result.used_default {
        println!("Warning: too few distinct lattice distances; default vectors written.");
    }
    for v in result.vectors.iter() {
        println!("  {:8.3} {:8.3} {:8.3}", v.x, v.y, v.z);
    }
    println!("✓ Surface vectors written to: {}", result.output.display());
    Ok(())
}
