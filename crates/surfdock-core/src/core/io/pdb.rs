use super::traits::TextFile;
use crate::core::models::atom::{PdbAtom, RecordType, infer_element};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Record has neither fixed-column nor whitespace-separated coordinates")]
    Unreadable,
}

const HEADER_RECORDS: [&str; 3] = ["HEADER", "TITLE", "REMARK"];

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_float(line: usize, s: &str, columns: &'static str, default: Option<f64>) -> Result<f64, PdbError> {
    if s.is_empty() {
        if let Some(d) = default {
            return Ok(d);
        }
    }
    s.parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: s.to_string(),
        },
    })
}

fn parse_fixed(line: &str, line_num: usize, record: RecordType) -> Result<PdbAtom, PdbError> {
    let serial_str = slice_and_trim(line, 6, 11);
    let serial = if serial_str.is_empty() {
        0
    } else {
        serial_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "7-11",
                value: serial_str.to_string(),
            },
        })?
    };
    let name = slice_and_trim(line, 12, 16);
    let res_name = match slice_and_trim(line, 17, 20) {
        "" => "UNK",
        s => s,
    };
    let chain_id = line.get(21..22).and_then(|s| s.chars().next()).filter(|c| *c != ' ').unwrap_or('A');
    let res_seq_str = slice_and_trim(line, 22, 26);
    let res_seq = if res_seq_str.is_empty() {
        1
    } else {
        res_seq_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "23-26",
                value: res_seq_str.to_string(),
            },
        })?
    };
    let i_code = line.get(26..27).and_then(|s| s.chars().next()).unwrap_or(' ');
    let x = parse_float(line_num, slice_and_trim(line, 30, 38), "31-38", None)?;
    let y = parse_float(line_num, slice_and_trim(line, 38, 46), "39-46", None)?;
    let z = parse_float(line_num, slice_and_trim(line, 46, 54), "47-54", None)?;
    let occupancy = parse_float(line_num, slice_and_trim(line, 54, 60), "55-60", Some(1.0))?;
    let b_factor = parse_float(line_num, slice_and_trim(line, 60, 66), "61-66", Some(0.0))?;
    let element = match slice_and_trim(line, 76, 78) {
        "" => infer_element(name),
        s => s.to_string(),
    };

    Ok(PdbAtom {
        record,
        serial,
        name: name.to_string(),
        res_name: res_name.to_string(),
        chain_id,
        res_seq,
        i_code,
        position: Point3::new(x, y, z),
        occupancy,
        b_factor,
        element,
    })
}

/// Whitespace-separated fallback for hand-written or truncated records:
/// `RECORD serial name resname chain resseq x y z [occ] [bfac] [element]`.
fn parse_tokens(line: &str, record: RecordType) -> Option<PdbAtom> {
    let t: Vec<&str> = line.split_whitespace().collect();
    if t.len() < 9 {
        return None;
    }
    let name = t[2];
    let mut atom = PdbAtom::new(
        record,
        name,
        t[3],
        t[4].chars().next().unwrap_or('A'),
        t[5].parse().ok()?,
    );
    atom.serial = t[1].parse().unwrap_or(0);
    atom.position = Point3::new(t[6].parse().ok()?, t[7].parse().ok()?, t[8].parse().ok()?);
    atom.occupancy = t.get(9).and_then(|v| v.parse().ok()).unwrap_or(1.0);
    atom.b_factor = t.get(10).and_then(|v| v.parse().ok()).unwrap_or(0.0);
    if let Some(el) = t.get(11) {
        atom.element = el.chars().take(2).collect();
    }
    Some(atom)
}

/// Formats the 4-character atom name field: one-letter elements start in column 14.
fn format_atom_name(name: &str, element: &str) -> String {
    let name = name.trim();
    if element.trim().len() == 1 && name.len() < 4 && !name.starts_with(|c: char| c.is_ascii_digit()) {
        format!(" {:<3}", name)
    } else {
        format!("{:<4}", name)
    }
}

pub fn format_atom(atom: &PdbAtom) -> String {
    let element = if atom.element.trim().is_empty() {
        infer_element(&atom.name)
    } else {
        atom.element.trim().chars().take(2).collect()
    };
    let res_name: String = atom.res_name.chars().take(3).collect();
    format!(
        "{:<6}{:>5} {} {:>3} {}{:>4}{}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}  ",
        atom.record.tag(),
        atom.serial,
        format_atom_name(&atom.name, &element),
        res_name,
        atom.chain_id,
        atom.res_seq,
        atom.i_code,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.b_factor,
        element,
    )
}

pub struct PdbFile;

impl TextFile for PdbFile {
    type Content = Structure;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error> {
        let mut structure = Structure::default();

        for (idx, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line = line.trim_end_matches(['\r', '\n']);
            let line_num = idx + 1;

            let tag = slice_and_trim(line, 0, 6);
            if HEADER_RECORDS.contains(&tag) {
                structure.header.push(line.to_string());
                continue;
            }
            if tag == "TER" {
                if let Some(last) = structure.atoms.len().checked_sub(1) {
                    structure.ter_after.insert(last);
                }
                continue;
            }
            let first_token = line.split_whitespace().next().unwrap_or("");
            let Some(record) = RecordType::from_tag(tag).or_else(|| RecordType::from_tag(first_token)) else {
                continue;
            };

            let atom = match parse_fixed(line, line_num, record) {
                Ok(atom) => atom,
                Err(fixed_err) => match parse_tokens(line, record) {
                    Some(atom) => atom,
                    None => return Err(fixed_err),
                },
            };
            structure.atoms.push(atom);
        }

        Ok(structure)
    }

    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error> {
        for line in &content.header {
            writeln!(writer, "{}", line)?;
        }
        for (i, atom) in content.atoms.iter().enumerate() {
            writeln!(writer, "{}", format_atom(atom))?;
            if content.ter_after.contains(&i) {
                writeln!(writer, "TER")?;
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
