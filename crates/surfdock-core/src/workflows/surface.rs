use crate::core::geometry::{LatticeSearchParams, Plane, fit_plane, lattice_vectors};
use crate::core::io::pdb::PdbFile;
use crate::core::io::surface::SurfaceVectorFile;
use crate::core::io::traits::TextFile;
use crate::core::models::structure::Structure;
use crate::core::models::surface::SurfaceVectors;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct SurfaceVectorRequest {
    pub input: PathBuf,
    /// Defaults to the input path with a `.surf` extension.
    pub output: Option<PathBuf>,
    pub params: LatticeSearchParams,
}

#[derive(Debug, Clone)]
pub struct SurfaceVectorResult {
    pub output: PathBuf,
    pub vectors: SurfaceVectors,
    pub plane: Option<Plane>,
    /// Set when too few distinct distances were found and the default vectors were used.
    pub used_default: bool,
}

pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("surf")
}

/// Estimates the three surface vectors of a slab. `None` when fewer than three distinct
/// in-plane distances exist.
pub fn extract(
    structure: &Structure,
    params: &LatticeSearchParams,
) -> (Option<SurfaceVectors>, Option<Plane>) {
    let points: Vec<_> = structure.atoms.iter().map(|a| a.position).collect();
    let Some(plane) = fit_plane(&points) else {
        return (None, None);
    };

    match lattice_vectors(&points, &plane, params, 3).as_slice() {
        [a, b, c] => (Some(SurfaceVectors::new(*a, *b, *c)), Some(plane)),
        found => {
            warn!("Only {} distinct lattice distance(s) found", found.len());
            (None, Some(plane))
        }
    }
}

#[instrument(skip_all, name = "surface_vector_workflow")]
pub fn run(
    request: &SurfaceVectorRequest,
    reporter: &ProgressReporter,
) -> Result<SurfaceVectorResult, EngineError> {
    if !request.input.is_file() {
        return Err(EngineError::MissingInput {
            what: "surface structure",
            path: request.input.clone(),
        });
    }
    let structure =
        PdbFile::read_from_path(&request.input).map_err(|e| EngineError::read(&request.input, e))?;
    if structure.is_empty() {
        return Err(EngineError::EmptyStructure {
            path: request.input.clone(),
        });
    }

    let (vectors, plane) = reporter.phase("Fitting lattice", || extract(&structure, &request.params));
    let used_default = vectors.is_none();
    if used_default {
        warn!("Falling back to default surface vectors");
    }
    let vectors = vectors.unwrap_or_default();
    if let Some(plane) = &plane {
        info!(
            "Surface normal ({:.3}, {:.3}, {:.3})",
            plane.normal.x, plane.normal.y, plane.normal.z
        );
    }

    let output = request
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&request.input));
    SurfaceVectorFile::write_to_path(&vectors, &output).map_err(|e| EngineError::write(&output, e))?;
    info!("Wrote surface vectors to {:?}", output);

    Ok(SurfaceVectorResult {
        output,
        vectors,
        plane,
        used_default,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{PdbAtom, RecordType};
    use tempfile::tempdir;

    fn rectangular_lattice(n: usize, dx: f64, dy: f64) -> Structure {
        let mut atoms = Vec::new();
        for i in 0..n {
            for j in 0..n {
                atoms.push(
                    PdbAtom::new(RecordType::Hetatm, "CA", "CAL", 'B', (i * n + j) as isize)
                        .with_position(i as f64 * dx, j as f64 * dy, 2.0),
                );
            }
        }
        Structure::new(atoms)
    }

    #[test]
    fn rectangular_lattice_recovers_in_plane_spacings() {
        let (vectors, plane) = extract(&rectangular_lattice(6, 3.0, 5.0), &LatticeSearchParams::default());
        let plane = plane.unwrap();
        assert!((plane.normal.z.abs() - 1.0).abs() < 1e-6);

        let vectors = vectors.unwrap();
        assert!(vectors.iter().all(|v| v.z.abs() < 1e-6));
        let lengths: Vec<f64> = vectors.iter().map(|v| v.norm()).collect();
        assert!(lengths.iter().any(|l| (l - 3.0).abs() < 0.05));
        assert!(lengths.iter().any(|l| (l - 5.0).abs() < 0.05));
    }

    #[test]
    fn too_few_atoms_give_no_vectors() {
        let (vectors, plane) = extract(&rectangular_lattice(1, 3.0, 3.0), &LatticeSearchParams::default());
        assert!(vectors.is_none());
        assert!(plane.is_none());
    }

    #[test]
    fn sparse_slab_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pair.pdb");
        PdbFile::write_to_path(&rectangular_lattice(2, 3.0, 3.0), &input).unwrap();

        let request = SurfaceVectorRequest {
            input,
            output: Some(dir.path().join("custom.surf")),
            params: LatticeSearchParams::default(),
        };
        let result = run(&request, &ProgressReporter::new()).unwrap();
        assert!(result.used_default);
        assert_eq!(result.vectors, SurfaceVectors::default());
        assert!(dir.path().join("custom.surf").is_file());
    }

    #[test]
    fn writes_surf_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("calcite.pdb");
        PdbFile::write_to_path(&rectangular_lattice(5, 4.0, 6.0), &input).unwrap();

        let request = SurfaceVectorRequest {
            input: input.clone(),
            output: None,
            params: LatticeSearchParams::default(),
        };
        let result = run(&request, &ProgressReporter::new()).unwrap();

        assert_eq!(result.output, dir.path().join("calcite.surf"));
        assert!(!result.used_default);
        let written = SurfaceVectorFile::read_from_path(&result.output).unwrap();
        assert_eq!(written.vectors.len(), 3);
    }

    #[test]
    fn empty_structure_is_an_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.pdb");
        std::fs::write(&input, "REMARK nothing here\nEND\n").unwrap();

        let request = SurfaceVectorRequest {
            input,
            output: None,
            params: LatticeSearchParams::default(),
        };
        assert!(matches!(
            run(&request, &ProgressReporter::new()),
            Err(EngineError::EmptyStructure { .. })
        ));
    }
}
