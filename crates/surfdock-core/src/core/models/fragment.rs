/// One residue of a fragment: source residue, identity, secondary structure and torsions.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentResidue {
    pub res_seq: isize,
    pub residue: char,
    pub secondary_structure: char,
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
}

/// A template backbone conformation spanning one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub pdb_id: String,
    pub chain_id: char,
    pub residues: Vec<FragmentResidue>,
}

/// All candidate fragments for the window starting at `position` (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentPosition {
    pub position: usize,
    pub neighbors: Vec<Fragment>,
}

/// A fragment library for a single window size.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentLibrary {
    pub window: usize,
    pub positions: Vec<FragmentPosition>,
}

impl FragmentLibrary {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            positions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
