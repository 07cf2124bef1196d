use crate::cli::SummarizeArgs;
use crate::config::{FileConfig, build_summary_config};
use crate::error::{CliError, Result};
use std::path::Path;
use surfdock::core::io::scorefile::ScoreFile;
use surfdock::core::io::traits::TextFile;
use surfdock::engine::error::EngineError;
use surfdock::engine::summary;
use tracing::info;

pub fn run(args: SummarizeArgs, config_path: Option<&Path>) -> Result<()> {
    let file_config = FileConfig::load(config_path)?;
    let summary_config = build_summary_config(&args, &file_config);

    if !args.scorefile.is_file() {
        return Err(EngineError::MissingInput {
            what: "score file",
            path: args.scorefile.clone(),
        }
        .into());
    }
    info!("Reading score file {:?}", &args.scorefile);
    let table = ScoreFile::read_from_path(&args.scorefile).map_err(|e| CliError::FileParsing {
        path: args.scorefile.clone(),
        source: e.into(),
    })?;

    let ranked = summary::rank(&table, &summary_config.score_column)?;
    println!(
        "{} decoy(s) in {}, {} ranked by '{}'.",
        table.rows.len(),
        args.scorefile.display(),
        ranked.len(),
        summary_config.score_column
    );

    if let Some(csv_path) = &args.csv {
        summary::write_csv(&ranked, csv_path)?;
        println!("✓ Ranked decoys written to: {}", csv_path.display());
    }

    let best = &ranked[..ranked.len().min(summary_config.top)];
    if !best.is_empty() {
        print!("{}", summary::render_table(best, &summary_config.score_column));
    }
    Ok(())
}
