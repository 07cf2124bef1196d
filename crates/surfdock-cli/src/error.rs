use std::path::PathBuf;
use surfdock::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status: the docking executable's own code when it failed, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(EngineError::ProcessFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Trailing docking log lines worth showing next to the error, if any.
    pub fn log_tail(&self) -> Option<&[String]> {
        match self {
            CliError::Engine(EngineError::ProcessFailed { log_tail, .. }) if !log_tail.is_empty() => {
                Some(log_tail.as_slice())
            }
            _ => None,
        }
    }
}
