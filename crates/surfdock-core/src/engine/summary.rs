use super::error::EngineError;
use crate::core::models::score::ScoreTable;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// A decoy with its position in the ascending score order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDecoy {
    pub rank: usize,
    pub description: String,
    pub score: f64,
}

/// Orders every decoy by `column`, lowest first. Rows without a numeric value are skipped.
pub fn rank(table: &ScoreTable, column: &str) -> Result<Vec<RankedDecoy>, EngineError> {
    if table.column_index(column).is_none() {
        return Err(EngineError::MissingColumn {
            column: column.to_string(),
            available: table.columns.clone(),
        });
    }

    let mut scored: Vec<(f64, &str)> = table
        .rows
        .iter()
        .filter_map(|row| table.value(row, column).map(|v| (v, table.description(row))))
        .collect();
    let skipped = table.rows.len() - scored.len();
    if skipped > 0 {
        debug!("Skipped {} rows without a numeric '{}'", skipped, column);
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, description))| RankedDecoy {
            rank: i + 1,
            description: description.to_string(),
            score,
        })
        .collect())
}

/// The `n` lowest-scoring decoys of `table`.
pub fn top(table: &ScoreTable, column: &str, n: usize) -> Result<Vec<RankedDecoy>, EngineError> {
    let mut ranked = rank(table, column)?;
    ranked.truncate(n);
    Ok(ranked)
}

pub fn write_csv(ranked: &[RankedDecoy], path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = csv::Writer::from_path(path)?;
    for decoy in ranked {
        writer.serialize(decoy)?;
    }
    writer.flush()?;
    Ok(())
}

/// Plain-text table of ranked decoys for console output.
pub fn render_table(ranked: &[RankedDecoy], column: &str) -> String {
    let width = ranked
        .iter()
        .map(|d| d.description.len())
        .max()
        .unwrap_or(0)
        .max("description".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<width$}  {:>12}", "rank", "description", column);
    for decoy in ranked {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>12.3}",
            decoy.rank, decoy.description, decoy.score
        );
    }
    out
}
