use nalgebra::Point3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Atom,
    Hetatm,
}

impl RecordType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim_end() {
            "ATOM" => Some(Self::Atom),
            "HETATM" => Some(Self::Hetatm),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Atom => "ATOM",
            Self::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single coordinate record of a PDB file.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub record: RecordType,
    pub serial: usize,
    pub name: String,
    pub res_name: String,
    pub chain_id: char,
    pub res_seq: isize,
    pub i_code: char,
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub b_factor: f64,
    pub element: String,
}

impl PdbAtom {
    pub fn new(record: RecordType, name: &str, res_name: &str, chain_id: char, res_seq: isize) -> Self {
        Self {
            record,
            serial: 0,
            name: name.trim().to_string(),
            res_name: res_name.trim().to_string(),
            chain_id,
            res_seq,
            i_code: ' ',
            position: Point3::origin(),
            occupancy: 1.0,
            b_factor: 0.0,
            element: infer_element(name),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        let element = if self.element.trim().is_empty() {
            infer_element(&self.name)
        } else {
            self.element.trim().to_string()
        };
        element.eq_ignore_ascii_case("H")
    }

    /// Key identifying the residue this atom belongs to.
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id,
            res_seq: self.res_seq,
            i_code: self.i_code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,
    pub res_seq: isize,
    pub i_code: char,
}

/// Guesses the element symbol from an atom name such as `CA`, `1HB` or `Zn`.
pub fn infer_element(atom_name: &str) -> String {
    let mut name = atom_name.trim();
    if name.is_empty() {
        return String::new();
    }
    if name.len() > 1 && name.starts_with(|c: char| c.is_ascii_digit()) {
        name = &name[1..];
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or(' ');
    match chars.next() {
        Some(second) if first.is_ascii_alphabetic() && second.is_ascii_lowercase() => {
            format!("{}{}", first.to_ascii_uppercase(), second)
        }
        _ => first.to_ascii_uppercase().to_string(),
    }
}
