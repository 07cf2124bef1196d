use super::traits::TextFile;
use crate::core::models::score::{ScoreRow, ScoreTable};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Score file has no header row")]
    MissingHeader,
}

const SCORE_PREFIX: &str = "SCORE:";

/// Whitespace-delimited score table. Rosetta rows carry a `SCORE:` prefix; when any row does,
/// only prefixed rows are considered and the first of them is the header.
pub struct ScoreFile;

impl TextFile for ScoreFile {
    type Content = ScoreTable;
    type Error = ScoreFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let prefixed = lines.iter().any(|l| l.trim_start().starts_with(SCORE_PREFIX));

        let mut rows = lines.iter().filter_map(|l| {
            let l = l.trim();
            if prefixed {
                l.strip_prefix(SCORE_PREFIX).map(str::trim)
            } else if l.is_empty() || l.starts_with('#') || l.starts_with("SEQUENCE:") {
                None
            } else {
                Some(l)
            }
        });

        let columns: Vec<String> = rows
            .next()
            .ok_or(ScoreFileError::MissingHeader)?
            .split_whitespace()
            .map(String::from)
            .collect();

        let mut table = ScoreTable {
            columns,
            rows: Vec::new(),
        };
        for row in rows {
            let fields: Vec<String> = row.split_whitespace().map(String::from).collect();
            // Appended runs repeat the header.
            if fields.is_empty() || fields == table.columns {
                continue;
            }
            table.rows.push(ScoreRow { fields });
        }

        Ok(table)
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{} {}", SCORE_PREFIX, content.columns.join(" "))?;
        for row in &content.rows {
            writeln!(writer, "{} {}", SCORE_PREFIX, row.fields.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_rosetta_score_file() {
        let input = "\
SEQUENCE: 
SCORE:     score  total_score  description
SCORE:   -12.500      -12.500  merged_0001
SCORE:   -30.000      -30.000  merged_0002
SCORE:     score  total_score  description
SCORE:     4.100        4.100  merged_0003
";
        let table = ScoreFile::read_from(&mut Cursor::new(input)).unwrap();
        assert_eq!(table.columns, vec!["score", "total_score", "description"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.value(&table.rows[1], "total_score"), Some(-30.0));
        assert_eq!(table.description(&table.rows[2]), "merged_0003");
    }

    #[test]
    fn reads_plain_whitespace_table() {
        let input = "# plain\ntotal_score rms description\n1.0 0.5 a\n\n-2.0 0.7 b\n";
        let table = ScoreFile::read_from(&mut Cursor::new(input)).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.value(&table.rows[1], "rms"), Some(0.7));
    }

    #[test]
    fn empty_file_has_no_header() {
        let result = ScoreFile::read_from(&mut Cursor::new("\n\n"));
        assert!(matches!(result, Err(ScoreFileError::MissingHeader)));
    }
}
