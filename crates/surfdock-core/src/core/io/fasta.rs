use super::traits::TextFile;
use crate::core::models::sequence::Sequence;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("FASTA input contains no sequence residues")]
    Empty,
}

/// Single-sequence FASTA. Every non-header line is concatenated; the first `>` line names it.
pub struct FastaFile;

impl TextFile for FastaFile {
    type Content = Sequence;
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let mut name: Option<String> = None;
        let mut residues = String::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if let Some(header) = line.strip_prefix('>') {
                if name.is_none() {
                    name = Some(header.trim().to_string());
                }
            } else {
                residues.push_str(line);
            }
        }

        let sequence = Sequence::new(name.unwrap_or_default(), &residues);
        if sequence.is_empty() {
            return Err(FastaError::Empty);
        }
        Ok(sequence)
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, ">{}", content.name)?;
        writeln!(writer, "{}", content)?;
        Ok(())
    }
}
