use super::traits::TextFile;
use crate::core::models::surface::SurfaceVectors;
use nalgebra::Vector3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceVectorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line}: expected three floats, found '{content}'")]
    InvalidLine { line: usize, content: String },
    #[error("Expected 3 surface vectors, found {0}")]
    WrongCount(usize),
}

/// Three whitespace-separated float triples, one per line.
pub struct SurfaceVectorFile;

impl TextFile for SurfaceVectorFile {
    type Content = SurfaceVectors;
    type Error = SurfaceVectorError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let mut vectors = Vec::with_capacity(3);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let values: Option<Vec<f64>> = trimmed.split_whitespace().map(|t| t.parse().ok()).collect();
            match values.as_deref() {
                Some([x, y, z]) => vectors.push(Vector3::new(*x, *y, *z)),
                _ => {
                    return Err(SurfaceVectorError::InvalidLine {
                        line: idx + 1,
                        content: trimmed.to_string(),
                    });
                }
            }
        }

        match vectors.as_slice() {
            [a, b, c] => Ok(SurfaceVectors::new(*a, *b, *c)),
            other => Err(SurfaceVectorError::WrongCount(other.len())),
        }
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        for v in content.iter() {
            writeln!(writer, "{:8.3} {:8.3} {:8.3}", v.x, v.y, v.z)?;
        }
        Ok(())
    }
}
