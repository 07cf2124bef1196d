use crate::core::io::fasta::FastaFile;
use crate::core::io::flags::FlagsFileFormat;
use crate::core::io::fragments::FragmentFile;
use crate::core::io::pdb::PdbFile;
use crate::core::io::scorefile::ScoreFile;
use crate::core::io::surface::SurfaceVectorFile;
use crate::core::io::traits::TextFile;
use crate::core::models::fragment::FragmentLibrary;
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::Structure;
use crate::core::models::surface::SurfaceVectors;
use crate::engine::config::DockingConfig;
use crate::engine::error::EngineError;
use crate::engine::flags::{DockingInputs, compose, parse_extra_flags};
use crate::engine::fragments::{FragmentTemplate, synthesize};
use crate::engine::install::RosettaInstallation;
use crate::engine::layout::{InputLayout, RunLayout};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::runner::DockingRunner;
use crate::engine::summary::{self, RankedDecoy};
use crate::workflows::merge::merge_files;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Where the docking structure comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// A merged file already present in the input directory.
    Merged(PathBuf),
    /// Generated from the separate protein and surface files, then written to `target`.
    AutoMerge {
        protein: PathBuf,
        surface: PathBuf,
        target: PathBuf,
    },
}

/// A run directory with every input the executable needs, ready to launch.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub installation: RosettaInstallation,
    pub layout: RunLayout,
    pub structure: PathBuf,
    pub surface_vectors: PathBuf,
    pub fragment_files: Vec<(usize, PathBuf)>,
    pub flags: PathBuf,
    pub residue_count: usize,
}

impl PreparedRun {
    pub fn command_line(&self) -> Vec<OsString> {
        DockingRunner::new(&self.installation.binary).command_line(&self.flags)
    }
}

#[derive(Debug, Clone)]
pub struct DockingReport {
    pub run_dir: PathBuf,
    pub scorefile: PathBuf,
    pub log: PathBuf,
    pub pid: Option<u32>,
    pub total_decoys: usize,
    pub best: Vec<RankedDecoy>,
}

fn absolute(path: &Path) -> Result<PathBuf, EngineError> {
    Ok(std::path::absolute(path)?)
}

fn locate_structure(inputs: &InputLayout, config: &DockingConfig) -> Result<StructureSource, EngineError> {
    let merged = inputs.merged_pdb(&config.protein_name, &config.surface_name);
    if merged.is_file() {
        return Ok(StructureSource::Merged(merged));
    }

    let protein = inputs.protein_pdb(&config.protein_name);
    let surface = inputs.surface_pdb(&config.surface_name);
    if protein.is_file() && surface.is_file() {
        return Ok(StructureSource::AutoMerge {
            protein,
            surface,
            target: merged,
        });
    }
    Err(EngineError::MissingInput {
        what: "merged structure",
        path: merged,
    })
}

fn load_sequence(inputs: &InputLayout, config: &DockingConfig, structure: &Structure) -> Result<Sequence, EngineError> {
    let fasta = inputs.protein_fasta(&config.protein_name);
    if fasta.is_file() {
        return FastaFile::read_from_path(&fasta).map_err(|e| EngineError::read(&fasta, e));
    }
    warn!(
        "No sequence file at {:?}; deriving the sequence from chain {}",
        fasta, config.merge.chains.protein
    );
    Ok(structure.chain_sequence(config.merge.chains.protein, &config.protein_name))
}

/// Validates the installation and inputs, then writes the structure, surface vectors,
/// fragment libraries and flags file for one run.
///
/// Nothing is written until every precondition has been checked.
#[instrument(skip_all, name = "dock_prepare", fields(protein = %config.protein_name, surface = %config.surface_name))]
pub fn prepare(config: &DockingConfig, reporter: &ProgressReporter) -> Result<PreparedRun, EngineError> {
    // === Phase 1: Validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    let installation = RosettaInstallation::resolve(&config.rosetta)?;
    info!("Using executable {:?}", installation.binary);

    let inputs = InputLayout::new(absolute(&config.input_dir)?);
    let layout = RunLayout::new(&absolute(&config.output_dir)?, &config.protein_name, &config.surface_name);
    let source = locate_structure(&inputs, config)?;
    let extra_flags = parse_extra_flags(&config.extra_flags)?;

    let surface_vectors = inputs.surface_vectors(&config.surface_name);
    let vectors_present = surface_vectors.is_file();
    if vectors_present {
        SurfaceVectorFile::read_from_path(&surface_vectors).map_err(|e| EngineError::read(&surface_vectors, e))?;
    }

    let (structure, structure_path) = match &source {
        StructureSource::Merged(path) => {
            let structure = PdbFile::read_from_path(path).map_err(|e| EngineError::read(path, e))?;
            (structure, path.clone())
        }
        StructureSource::AutoMerge {
            protein,
            surface,
            target,
        } => {
            info!("Merging {:?} and {:?}", protein, surface);
            let (structure, _) = merge_files(
                Some(protein.as_path()),
                Some(surface.as_path()),
                &config.merge,
            )?;
            (structure, target.clone())
        }
    };

    let residue_count = structure
        .max_residue_number(config.merge.chains.protein)
        .map_or(0, |n| n.max(0) as usize);
    let sequence = load_sequence(&inputs, config, &structure)?;
    info!(
        "Protein chain {} has {} residues; sequence length {}",
        config.merge.chains.protein,
        residue_count,
        sequence.len()
    );

    let template = FragmentTemplate::default();
    let libraries = config
        .fragment_windows
        .iter()
        .map(|&window| synthesize(&sequence, residue_count, window, &template))
        .collect::<Result<Vec<FragmentLibrary>, _>>()?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Writing run inputs ===
    reporter.report(Progress::PhaseStart { name: "Preparation" });
    if let StructureSource::AutoMerge { target, .. } = &source {
        PdbFile::write_to_path(&structure, target).map_err(|e| EngineError::write(target, e))?;
        info!("Wrote merged structure to {:?}", target);
    }

    if !vectors_present {
        warn!("No surface vectors at {:?}; writing defaults", surface_vectors);
        SurfaceVectorFile::write_to_path(&SurfaceVectors::default(), &surface_vectors)
            .map_err(|e| EngineError::write(&surface_vectors, e))?;
    }

    std::fs::create_dir_all(layout.dir()).map_err(|e| EngineError::write(layout.dir(), e))?;
    let mut fragment_files = Vec::with_capacity(libraries.len());
    for library in &libraries {
        let path = layout.fragments(library.window);
        FragmentFile::write_to_path(library, &path).map_err(|e| EngineError::write(&path, e))?;
        info!("Wrote {} fragment positions to {:?}", library.len(), path);
        fragment_files.push((library.window, path));
    }

    let flags = compose(
        &DockingInputs {
            database: &installation.database,
            structure: &structure_path,
            fragments: &fragment_files,
            surface_vectors: &surface_vectors,
            nstruct: config.nstruct,
            output_dir: layout.dir(),
            scorefile_name: &config.scorefile_name,
        },
        &extra_flags,
    );
    let flags_path = layout.flags();
    FlagsFileFormat::write_to_path(&flags, &flags_path).map_err(|e| EngineError::write(&flags_path, e))?;
    reporter.report(Progress::PhaseFinish);

    Ok(PreparedRun {
        installation,
        layout,
        structure: structure_path,
        surface_vectors,
        fragment_files,
        flags: flags_path,
        residue_count,
    })
}

/// Launches the executable for a prepared run and ranks the decoys it scored.
#[instrument(skip_all, name = "dock_execute")]
pub async fn execute(
    prepared: &PreparedRun,
    config: &DockingConfig,
    reporter: &ProgressReporter<'_>,
) -> Result<DockingReport, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Docking" });
    let log = prepared.layout.log();
    let outcome = DockingRunner::new(&prepared.installation.binary)
        .run(&prepared.flags, prepared.layout.dir(), &log, reporter)
        .await?;
    reporter.report(Progress::PhaseFinish);

    if !outcome.status.success() {
        return Err(EngineError::ProcessFailed {
            code: outcome.status.code(),
            log_tail: outcome.log_tail,
        });
    }

    let scorefile = prepared.layout.scorefile(&config.scorefile_name);
    if !scorefile.is_file() {
        return Err(EngineError::MissingOutput { path: scorefile });
    }
    let table = ScoreFile::read_from_path(&scorefile).map_err(|e| EngineError::read(&scorefile, e))?;
    let mut best = summary::rank(&table, &config.summary.score_column)?;
    best.truncate(config.summary.top);
    info!("Docking finished with {} decoys", table.rows.len());

    Ok(DockingReport {
        run_dir: prepared.layout.dir().to_path_buf(),
        scorefile,
        log,
        pid: outcome.pid,
        total_decoys: table.rows.len(),
        best,
    })
}

pub async fn run(config: &DockingConfig, reporter: &ProgressReporter<'_>) -> Result<DockingReport, EngineError> {
    let prepared = prepare(config, reporter)?;
    execute(&prepared, config, reporter).await
}
