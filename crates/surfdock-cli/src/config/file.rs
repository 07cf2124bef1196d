use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "surfdock.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRosettaConfig {
    pub home: Option<PathBuf>,
    pub binary: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub build: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePathsConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDockingConfig {
    pub nstruct: Option<usize>,
    pub protein_chain: Option<char>,
    pub surface_chain: Option<char>,
    pub surface_residue: Option<String>,
    pub keep_all_surface: Option<bool>,
    pub scorefile: Option<String>,
    pub extra_flags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSummaryConfig {
    pub top: Option<usize>,
    pub score_column: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rosetta: Option<FileRosettaConfig>,
    pub paths: Option<FilePathsConfig>,
    pub docking: Option<FileDockingConfig>,
    pub summary: Option<FileSummaryConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the explicitly given file, else the per-user file if one exists, else nothing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No configuration file found; using defaults.");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("edu", "caltech", "surfdock").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
