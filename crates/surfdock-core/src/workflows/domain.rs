use crate::core::io::fasta::FastaFile;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::TextFile;
use crate::core::models::atom::RecordType;
use crate::core::models::sequence::Sequence;
use crate::core::models::structure::Structure;
use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct DomainRequest {
    pub pdb: PathBuf,
    pub fasta: PathBuf,
    pub chain: char,
    /// First residue of the domain, 1-based.
    pub start: usize,
    /// Last residue of the domain, inclusive.
    pub end: usize,
    pub output_dir: PathBuf,
    /// Base name of the written files; defaults to the PDB file stem.
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DomainResult {
    pub fasta: PathBuf,
    pub pdb: PathBuf,
    pub sequence: Sequence,
    pub atoms_kept: usize,
}

impl DomainRequest {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.start == 0 {
            return Err(ConfigError::InvalidValue {
                name: "start",
                reason: "residue numbering starts at 1".to_string(),
            });
        }
        if self.end < self.start {
            return Err(ConfigError::InvalidValue {
                name: "end",
                reason: format!("{} is before start residue {}", self.end, self.start),
            });
        }
        Ok(())
    }

    fn base_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.pdb
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "protein".to_string())
        })
    }
}

/// Keeps the chain's `ATOM` records inside `start..=end` renumbered from 1, every `HETATM`
/// record, and the header lines.
pub fn cut_structure(structure: &Structure, chain: char, start: usize, end: usize) -> Structure {
    let (start, end) = (start as isize, end as isize);
    let atoms = structure
        .atoms
        .iter()
        .filter_map(|atom| match atom.record {
            RecordType::Atom if atom.chain_id == chain && (start..=end).contains(&atom.res_seq) => {
                let mut atom = atom.clone();
                atom.res_seq = atom.res_seq - start + 1;
                Some(atom)
            }
            RecordType::Atom => None,
            RecordType::Hetatm => Some(atom.clone()),
        })
        .collect();

    let mut domain = Structure::new(atoms);
    domain.header = structure.header.clone();
    domain
}

fn require(path: &Path, what: &'static str) -> Result<(), EngineError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EngineError::MissingInput {
            what,
            path: path.to_path_buf(),
        })
    }
}

#[instrument(skip_all, name = "domain_workflow")]
pub fn run(request: &DomainRequest, reporter: &ProgressReporter) -> Result<DomainResult, EngineError> {
    request.validate()?;
    require(&request.pdb, "protein structure")?;
    require(&request.fasta, "protein sequence")?;

    let full_sequence =
        FastaFile::read_from_path(&request.fasta).map_err(|e| EngineError::read(&request.fasta, e))?;
    let structure = PdbFile::read_from_path(&request.pdb).map_err(|e| EngineError::read(&request.pdb, e))?;

    let name = request.base_name();
    let (sequence, domain) = reporter.phase("Extracting domain", || {
        let mut sequence = full_sequence.slice(request.start, request.end);
        sequence.name = format!("{}_domain_{}_{}", name, request.start, request.end);
        let domain = cut_structure(&structure, request.chain, request.start, request.end);
        (sequence, domain)
    });
    info!(
        "Domain {}-{}: {} of {} residues, {} atoms",
        request.start,
        request.end,
        sequence.len(),
        full_sequence.len(),
        domain.len()
    );

    let fasta = request.output_dir.join(format!("{}.fasta", name));
    let pdb = request.output_dir.join(format!("{}.pdb", name));
    FastaFile::write_to_path(&sequence, &fasta).map_err(|e| EngineError::write(&fasta, e))?;
    PdbFile::write_to_path(&domain, &pdb).map_err(|e| EngineError::write(&pdb, e))?;

    Ok(DomainResult {
        fasta,
        pdb,
        sequence,
        atoms_kept: domain.len(),
    })
}
