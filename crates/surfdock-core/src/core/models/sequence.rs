use phf::phf_map;
use std::fmt;

static THREE_TO_ONE: phf::Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    "HID" => 'H', "HIE" => 'H', "HIP" => 'H', "HSD" => 'H', "HSE" => 'H',
    "CYX" => 'C', "MSE" => 'M',
};

pub const UNKNOWN_RESIDUE: char = 'X';

/// Maps a three-letter residue name to its one-letter code, `X` when unknown.
pub fn one_letter_code(res_name: &str) -> char {
    THREE_TO_ONE
        .get(res_name.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_RESIDUE)
}

/// A named one-letter protein sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    pub name: String,
    residues: Vec<char>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, residues: &str) -> Self {
        Self {
            name: name.into(),
            residues: residues
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn from_residue_names<'a>(name: impl Into<String>, names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            name: name.into(),
            residues: names.into_iter().map(one_letter_code).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residue at a 1-based position, `X` past either end.
    pub fn residue_at(&self, position: usize) -> char {
        position
            .checked_sub(1)
            .and_then(|i| self.residues.get(i))
            .copied()
            .unwrap_or(UNKNOWN_RESIDUE)
    }

    /// Inclusive 1-based sub-sequence, clamped to the sequence bounds.
    pub fn slice(&self, start: usize, end: usize) -> Sequence {
        let from = start.saturating_sub(1).min(self.residues.len());
        let to = end.min(self.residues.len()).max(from);
        Sequence {
            name: self.name.clone(),
            residues: self.residues[from..to].to_vec(),
        }
    }

    pub fn as_string(&self) -> String {
        self.residues.iter().collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
