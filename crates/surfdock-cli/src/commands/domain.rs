use crate::cli::ExtractDomainArgs;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use surfdock::engine::progress::ProgressReporter;
use surfdock::workflows::domain::{self, DomainRequest};
use tokio::sync::mpsc;

pub fn run(args: ExtractDomainArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    let request = DomainRequest {
        pdb: args.pdb,
        fasta: args.fasta,
        chain: args.chain,
        start: args.start,
        end: args.end,
        output_dir: args.output_dir,
        name: args.name,
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = domain::run(&request, &reporter)?;

    println!(
        "Extracted residues {}-{} of chain {}: {} residues, {} atoms",
        request.start,
        request.end,
        request.chain,
        result.sequence.len(),
        result.atoms_kept
    );
    println!("  Sequence: {}", result.sequence);
    println!("✓ FASTA: {}", result.fasta.display());
    println!("✓ PDB:   {}", result.pdb.display());
    Ok(())
}
