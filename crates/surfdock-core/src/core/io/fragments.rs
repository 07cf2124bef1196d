use super::traits::TextFile;
use crate::core::models::fragment::{Fragment, FragmentLibrary, FragmentPosition, FragmentResidue};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Fragment at position {position} has {found} residues, expected window of {window}")]
    WindowMismatch {
        position: usize,
        found: usize,
        window: usize,
    },
}

/// Rosetta's classic (pre-v3) fragment file layout.
pub struct FragmentFile;

fn format_residue(fragment: &Fragment, residue: &FragmentResidue) -> String {
    format!(
        " {:<4} {} {:>5} {} {} {:8.3} {:8.3} {:8.3}",
        fragment.pdb_id,
        fragment.chain_id,
        residue.res_seq,
        residue.residue,
        residue.secondary_structure,
        residue.phi,
        residue.psi,
        residue.omega,
    )
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    if tokens.next()? != "position:" {
        return None;
    }
    let position = tokens.next()?.parse().ok()?;
    if tokens.next()? != "neighbors:" {
        return None;
    }
    let neighbors = tokens.next()?.parse().ok()?;
    Some((position, neighbors))
}

fn parse_residue(line: &str) -> Option<(String, char, FragmentResidue)> {
    let t: Vec<&str> = line.split_whitespace().collect();
    if t.len() < 8 {
        return None;
    }
    let residue = FragmentResidue {
        res_seq: t[2].parse().ok()?,
        residue: t[3].chars().next()?,
        secondary_structure: t[4].chars().next()?,
        phi: t[5].parse().ok()?,
        psi: t[6].parse().ok()?,
        omega: t[7].parse().ok()?,
    };
    Some((t[0].to_string(), t[1].chars().next()?, residue))
}

impl TextFile for FragmentFile {
    type Content = FragmentLibrary;
    type Error = FragmentError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let mut positions: Vec<FragmentPosition> = Vec::new();
        let mut current: Option<Fragment> = None;

        let close = |positions: &mut Vec<FragmentPosition>, fragment: Option<Fragment>| {
            if let (Some(fragment), Some(last)) = (fragment, positions.last_mut()) {
                last.neighbors.push(fragment);
            }
        };

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = idx + 1;

            if line.trim().is_empty() {
                close(&mut positions, current.take());
                continue;
            }
            if line.trim_start().starts_with("position:") {
                close(&mut positions, current.take());
                let (position, _) = parse_header(&line).ok_or_else(|| FragmentError::Parse {
                    line: line_num,
                    message: format!("malformed position header '{}'", line.trim()),
                })?;
                positions.push(FragmentPosition {
                    position,
                    neighbors: Vec::new(),
                });
                continue;
            }

            let (pdb_id, chain_id, residue) = parse_residue(&line).ok_or_else(|| FragmentError::Parse {
                line: line_num,
                message: format!("malformed fragment residue '{}'", line.trim()),
            })?;
            if positions.is_empty() {
                return Err(FragmentError::Parse {
                    line: line_num,
                    message: "fragment residue before any position header".to_string(),
                });
            }
            current
                .get_or_insert_with(|| Fragment {
                    pdb_id,
                    chain_id,
                    residues: Vec::new(),
                })
                .residues
                .push(residue);
        }
        close(&mut positions, current.take());

        let window = positions
            .iter()
            .flat_map(|p| p.neighbors.first())
            .map(|f| f.residues.len())
            .next()
            .unwrap_or(0);
        for p in &positions {
            if let Some(f) = p.neighbors.iter().find(|f| f.residues.len() != window) {
                return Err(FragmentError::WindowMismatch {
                    position: p.position,
                    found: f.residues.len(),
                    window,
                });
            }
        }

        Ok(FragmentLibrary { window, positions })
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        for position in &content.positions {
            writeln!(
                writer,
                " position: {:>12} neighbors: {:>12}",
                position.position,
                position.neighbors.len()
            )?;
            writeln!(writer)?;
            for fragment in &position.neighbors {
                if fragment.residues.len() != content.window {
                    return Err(FragmentError::WindowMismatch {
                        position: position.position,
                        found: fragment.residues.len(),
                        window: content.window,
                    });
                }
                for residue in &fragment.residues {
                    writeln!(writer, "{}", format_residue(fragment, residue))?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
