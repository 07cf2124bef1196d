use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Where the external installation lives and how its executable is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosettaConfig {
    pub home: PathBuf,
    /// Explicit executable path, bypassing the build-suffix search.
    pub binary: Option<PathBuf>,
    /// Explicit database path, bypassing `<home>/main/database`.
    pub database: Option<PathBuf>,
    /// Preferred build suffix, tried before the standard ones.
    pub build: Option<String>,
}

/// Chain identifiers assigned to the two partners of the merged structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainAssignment {
    pub protein: char,
    pub surface: char,
}

impl Default for ChainAssignment {
    fn default() -> Self {
        Self {
            protein: 'A',
            surface: 'B',
        }
    }
}

/// Residue name of the surface atoms kept by default when merging.
pub const DEFAULT_SURFACE_RESIDUE: &str = "CAL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    #[default]
    SurfaceFirst,
    ProteinFirst,
}

/// Options controlling how protein and surface structures are cleaned and concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub chains: ChainAssignment,
    pub order: MergeOrder,
    pub serial_start: usize,
    pub add_ter: bool,
    pub strip_hydrogens: bool,
    pub require_oxygen: bool,
    pub require_cb: bool,
    pub prune_dangling: bool,
    /// Keep only surface atoms whose residue name matches; `None` keeps every atom.
    pub surface_residue: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            chains: ChainAssignment::default(),
            order: MergeOrder::default(),
            serial_start: 1,
            add_ter: false,
            strip_hydrogens: true,
            require_oxygen: true,
            require_cb: true,
            prune_dangling: true,
            surface_residue: Some(DEFAULT_SURFACE_RESIDUE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    pub top: usize,
    pub score_column: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            top: 5,
            score_column: "total_score".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockingConfig {
    pub protein_name: String,
    pub surface_name: String,
    pub nstruct: usize,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rosetta: RosettaConfig,
    pub merge: MergeOptions,
    pub fragment_windows: Vec<usize>,
    pub scorefile_name: String,
    pub extra_flags: Vec<String>,
    pub summary: SummaryConfig,
}

pub const DEFAULT_FRAGMENT_WINDOWS: [usize; 2] = [3, 9];

#[derive(Default)]
pub struct DockingConfigBuilder {
    protein_name: Option<String>,
    surface_name: Option<String>,
    nstruct: Option<usize>,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    rosetta_home: Option<PathBuf>,
    rosetta_binary: Option<PathBuf>,
    rosetta_database: Option<PathBuf>,
    rosetta_build: Option<String>,
    merge: Option<MergeOptions>,
    scorefile_name: Option<String>,
    extra_flags: Vec<String>,
    summary: Option<SummaryConfig>,
}

impl DockingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protein_name(mut self, name: impl Into<String>) -> Self {
        self.protein_name = Some(name.into());
        self
    }
    pub fn surface_name(mut self, name: impl Into<String>) -> Self {
        self.surface_name = Some(name.into());
        self
    }
    pub fn nstruct(mut self, n: usize) -> Self {
        self.nstruct = Some(n);
        self
    }
    pub fn input_dir(mut self, path: PathBuf) -> Self {
        self.input_dir = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn rosetta_home(mut self, path: PathBuf) -> Self {
        self.rosetta_home = Some(path);
        self
    }
    pub fn rosetta_binary(mut self, path: Option<PathBuf>) -> Self {
        self.rosetta_binary = path;
        self
    }
    pub fn rosetta_database(mut self, path: Option<PathBuf>) -> Self {
        self.rosetta_database = path;
        self
    }
    pub fn rosetta_build(mut self, build: Option<String>) -> Self {
        self.rosetta_build = build;
        self
    }
    pub fn merge_options(mut self, options: MergeOptions) -> Self {
        self.merge = Some(options);
        self
    }
    pub fn scorefile_name(mut self, name: impl Into<String>) -> Self {
        self.scorefile_name = Some(name.into());
        self
    }
    pub fn extra_flags(mut self, flags: Vec<String>) -> Self {
        self.extra_flags = flags;
        self
    }
    pub fn summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn build(self) -> Result<DockingConfig, ConfigError> {
        let protein_name = self
            .protein_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ConfigError::MissingParameter("protein_name"))?;
        let surface_name = self
            .surface_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ConfigError::MissingParameter("surface_name"))?;
        let nstruct = self.nstruct.ok_or(ConfigError::MissingParameter("nstruct"))?;
        if nstruct == 0 {
            return Err(ConfigError::InvalidValue {
                name: "nstruct",
                reason: "must be at least 1".to_string(),
            });
        }

        let merge = self.merge.unwrap_or_default();
        if merge.chains.protein == merge.chains.surface {
            return Err(ConfigError::InvalidValue {
                name: "chains",
                reason: format!(
                    "protein and surface share chain '{}'",
                    merge.chains.protein
                ),
            });
        }

        let summary = self.summary.unwrap_or_default();
        if summary.top == 0 {
            return Err(ConfigError::InvalidValue {
                name: "summary.top",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(DockingConfig {
            protein_name,
            surface_name,
            nstruct,
            input_dir: self
                .input_dir
                .ok_or(ConfigError::MissingParameter("input_dir"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            rosetta: RosettaConfig {
                home: self
                    .rosetta_home
                    .ok_or(ConfigError::MissingParameter("rosetta_home"))?,
                binary: self.rosetta_binary,
                database: self.rosetta_database,
                build: self.rosetta_build,
            },
            merge,
            fragment_windows: DEFAULT_FRAGMENT_WINDOWS.to_vec(),
            scorefile_name: self.scorefile_name.unwrap_or_else(|| "score.sc".to_string()),
            extra_flags: self.extra_flags,
            summary,
        })
    }
}
