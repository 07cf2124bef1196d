use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::TextFile;
use crate::core::models::structure::Structure;
use crate::engine::config::{ConfigError, MergeOptions};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sanitize::{SanitizeReport, merge_structures, sanitize_protein, sanitize_surface};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub protein: Option<PathBuf>,
    pub surface: Option<PathBuf>,
    pub output: PathBuf,
    pub options: MergeOptions,
}

#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub protein_atoms: usize,
    pub surface_atoms: usize,
    pub total_atoms: usize,
    pub sanitize: SanitizeReport,
}

fn read_structure(path: &Path, what: &'static str) -> Result<Structure, EngineError> {
    if !path.is_file() {
        return Err(EngineError::MissingInput {
            what,
            path: path.to_path_buf(),
        });
    }
    PdbFile::read_from_path(path).map_err(|e| EngineError::read(path, e))
}

/// Reads, sanitizes and concatenates the given partners without writing anything.
pub fn merge_files(
    protein: Option<&Path>,
    surface: Option<&Path>,
    options: &MergeOptions,
) -> Result<(Structure, MergeSummary), EngineError> {
    if protein.is_none() && surface.is_none() {
        return Err(ConfigError::MissingParameter("protein or surface structure").into());
    }

    let protein = protein
        .map(|p| read_structure(p, "protein structure"))
        .transpose()?;
    let surface = surface
        .map(|p| read_structure(p, "surface structure"))
        .transpose()?;

    let (protein, sanitize) = match protein {
        Some(raw) => {
            let (clean, report) = sanitize_protein(&raw, options);
            if !report.residues_removed.is_empty() {
                warn!(
                    "Dropped {} incomplete protein residue(s)",
                    report.residues_removed.len()
                );
            }
            (Some(clean), report)
        }
        None => (None, SanitizeReport::default()),
    };
    let surface = surface.map(|raw| sanitize_surface(&raw, options));

    let protein_atoms = protein.as_ref().map_or(0, Structure::len);
    let surface_atoms = surface.as_ref().map_or(0, Structure::len);
    let merged = merge_structures(protein, surface, options);

    let summary = MergeSummary {
        protein_atoms,
        surface_atoms,
        total_atoms: merged.len(),
        sanitize,
    };
    Ok((merged, summary))
}

#[instrument(skip_all, name = "merge_workflow")]
pub fn run(request: &MergeRequest, reporter: &ProgressReporter) -> Result<MergeSummary, EngineError> {
    let (merged, summary) = reporter.phase("Merging structures", || {
        merge_files(
            request.protein.as_deref(),
            request.surface.as_deref(),
            &request.options,
        )
    })?;

    PdbFile::write_to_path(&merged, &request.output)
        .map_err(|e| EngineError::write(&request.output, e))?;

    info!(
        "Wrote {} atoms ({} protein, {} surface) to {:?}",
        summary.total_atoms, summary.protein_atoms, summary.surface_atoms, request.output
    );
    reporter.report(Progress::Message(format!(
        "Merged structure written to {}",
        request.output.display()
    )));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::MergeOrder;
    use tempfile::tempdir;

    const PROTEIN: &str = "\
ATOM      1  N   GLY X   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY X   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  C   GLY X   1       2.009   1.420   0.000  1.00  0.00           C
ATOM      4  O   GLY X   1       1.251   2.390   0.000  1.00  0.00           O
ATOM      5  H   GLY X   1      -0.500   0.800   0.000  1.00  0.00           H
ATOM      6  N   ALA X   2       3.332   1.536   0.000  1.00  0.00           N
ATOM      7  CA  ALA X   2       3.988   2.839   0.000  1.00  0.00           C
END
";

    const SURFACE: &str = "\
HETATM    1 CA   CAL Z   1       0.000   0.000  -5.000  1.00  0.00          CA
HETATM    2 O    OXY Z   2       2.000   0.000  -5.000  1.00  0.00           O
END
";

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn merges_sanitized_protein_after_surface() {
        let dir = tempdir().unwrap();
        let request = MergeRequest {
            protein: Some(write(dir.path(), "p.pdb", PROTEIN)),
            surface: Some(write(dir.path(), "s.pdb", SURFACE)),
            output: dir.path().join("out").join("merged.pdb"),
            options: MergeOptions::default(),
        };

        let summary = run(&request, &ProgressReporter::new()).unwrap();
        assert_eq!(summary.protein_atoms, 4);
        assert_eq!(summary.surface_atoms, 1);
        assert_eq!(summary.sanitize.hydrogens_removed, 1);
        assert_eq!(summary.sanitize.residues_removed.len(), 1);

        let merged = PdbFile::read_from_path(&request.output).unwrap();
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.atoms[0].chain_id, 'B');
        assert_eq!(merged.atoms[0].res_name, "CAL");
        assert_eq!(merged.atoms[1].chain_id, 'A');
        assert_eq!(merged.atoms[0].serial, 1);
        assert_eq!(merged.atoms[4].serial, 5);
    }

    #[test]
    fn keep_all_surface_and_protein_first_order() {
        let dir = tempdir().unwrap();
        let options = MergeOptions {
            order: MergeOrder::ProteinFirst,
            surface_residue: None,
            add_ter: true,
            ..MergeOptions::default()
        };
        let (merged, summary) = merge_files(
            Some(&write(dir.path(), "p.pdb", PROTEIN)),
            Some(&write(dir.path(), "s.pdb", SURFACE)),
            &options,
        )
        .unwrap();

        assert_eq!(summary.surface_atoms, 2);
        assert_eq!(merged.atoms.last().unwrap().res_name, "OXY");
        assert!(merged.ter_after.contains(&3));
    }

    #[test]
    fn surface_only_merge_is_allowed() {
        let dir = tempdir().unwrap();
        let (merged, summary) =
            merge_files(None, Some(&write(dir.path(), "s.pdb", SURFACE)), &MergeOptions::default()).unwrap();
        assert_eq!(summary.protein_atoms, 0);
        assert_eq!(merged.len(), 1);
        assert!(merged.ter_after.is_empty());
    }

    #[test]
    fn requires_at_least_one_partner() {
        let result = merge_files(None, None, &MergeOptions::default());
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::MissingParameter(_)))
        ));
    }

    #[test]
    fn missing_partner_file_is_reported() {
        let dir = tempdir().unwrap();
        let result = merge_files(Some(&dir.path().join("absent.pdb")), None, &MergeOptions::default());
        assert!(matches!(result, Err(EngineError::MissingInput { .. })));
    }
}
