use super::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing {what}: {} does not exist", .path.display())]
    MissingDependency { what: &'static str, path: PathBuf },

    #[error("Missing input {what}: {} does not exist", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("{what} is too short: {length} residues, fragment window needs at least {window}")]
    InputTooShort {
        what: String,
        length: usize,
        window: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BoxedError,
    },

    #[error("Failed to launch '{}': {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Docking executable failed ({})", describe_exit(.code))]
    ProcessFailed {
        code: Option<i32>,
        log_tail: Vec<String>,
    },

    #[error("No atom records found in {}", .path.display())]
    EmptyStructure { path: PathBuf },

    #[error("Expected output file was not produced: {}", .path.display())]
    MissingOutput { path: PathBuf },

    #[error("Score column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

impl EngineError {
    pub fn read(path: impl Into<PathBuf>, source: impl Into<BoxedError>) -> Self {
        Self::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: impl Into<BoxedError>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
