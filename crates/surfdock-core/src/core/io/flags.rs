use super::traits::TextFile;
use crate::core::models::flags::{FlagOption, FlagsFile};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: value '{value}' does not follow an option")]
    DanglingValue { line: usize, value: String },
}

fn starts_option(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1 && token.parse::<f64>().is_err()
}

/// Rosetta options file: one option per line, `#` comments allowed.
pub struct FlagsFileFormat;

impl TextFile for FlagsFileFormat {
    type Content = FlagsFile;
    type Error = FlagsError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let mut flags = FlagsFile::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let content = line.split('#').next().unwrap_or("").trim();
            for token in content.split_whitespace() {
                if starts_option(token) {
                    flags.push(FlagOption::switch(token));
                } else {
                    let option = flags.options.last_mut().ok_or_else(|| FlagsError::DanglingValue {
                        line: idx + 1,
                        value: token.to_string(),
                    })?;
                    option.values.push(token.to_string());
                }
            }
        }

        Ok(flags)
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        for option in &content.options {
            writeln!(writer, "{}", option)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_options_values_and_comments() {
        let input = "# docking flags\n-in:file:s merged.pdb\n-include_surfaces\n-nstruct 10 # decoys\n-score:weights -0.5\n";
        let flags = FlagsFileFormat::read_from(&mut Cursor::new(input)).unwrap();

        assert_eq!(
            flags.option_names(),
            vec!["-in:file:s", "-include_surfaces", "-nstruct", "-score:weights"]
        );
        assert_eq!(flags.value_of("-nstruct"), Some("10"));
        assert_eq!(flags.value_of("-score:weights"), Some("-0.5"));
        assert!(flags.get("-include_surfaces").unwrap().values.is_empty());
    }

    #[test]
    fn value_without_option_is_rejected() {
        let result = FlagsFileFormat::read_from(&mut Cursor::new("merged.pdb\n"));
        assert!(matches!(result, Err(FlagsError::DanglingValue { line: 1, .. })));
    }
}
