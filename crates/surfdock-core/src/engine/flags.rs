use super::config::ConfigError;
use crate::core::io::flags::FlagsFileFormat;
use crate::core::io::traits::TextFile;
use crate::core::models::flags::{FlagOption, FlagsFile};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Options every docking invocation carries, in the order they are written.
pub const REQUIRED_OPTIONS: [&str; 9] = [
    "-database",
    "-in:file:s",
    "-in:file:frag3",
    "-in:file:frag9",
    "-in:file:surface_vectors",
    "-include_surfaces",
    "-nstruct",
    "-out:path:all",
    "-out:file:scorefile",
];

/// Everything the flags file points the executable at.
#[derive(Debug, Clone)]
pub struct DockingInputs<'a> {
    pub database: &'a Path,
    pub structure: &'a Path,
    /// Fragment files keyed by window size.
    pub fragments: &'a [(usize, PathBuf)],
    pub surface_vectors: &'a Path,
    pub nstruct: usize,
    pub output_dir: &'a Path,
    pub scorefile_name: &'a str,
}

fn path_value(path: &Path) -> String {
    path.display().to_string()
}

/// Parses user-supplied option strings such as `-mute all`.
pub fn parse_extra_flags(extra: &[String]) -> Result<Vec<FlagOption>, ConfigError> {
    let text = extra.join("\n");
    FlagsFileFormat::read_from(&mut Cursor::new(text))
        .map(|flags| flags.options)
        .map_err(|e| ConfigError::InvalidValue {
            name: "extra-flags",
            reason: e.to_string(),
        })
}

/// Composes the flags file: the required options followed by `extra` in the given order.
pub fn compose(inputs: &DockingInputs<'_>, extra: &[FlagOption]) -> FlagsFile {
    let mut flags = FlagsFile::new();
    flags
        .push(FlagOption::with_value("-database", path_value(inputs.database)))
        .push(FlagOption::with_value("-in:file:s", path_value(inputs.structure)));
    for (window, path) in inputs.fragments {
        flags.push(FlagOption::with_value(
            &format!("-in:file:frag{}", window),
            path_value(path),
        ));
    }
    flags
        .push(FlagOption::with_value(
            "-in:file:surface_vectors",
            path_value(inputs.surface_vectors),
        ))
        .push(FlagOption::switch("-include_surfaces"))
        .push(FlagOption::with_value("-nstruct", inputs.nstruct.to_string()))
        .push(FlagOption::with_value("-out:path:all", path_value(inputs.output_dir)))
        .push(FlagOption::with_value("-out:file:scorefile", inputs.scorefile_name));

    for option in extra {
        flags.push(option.clone());
    }
    flags
}
