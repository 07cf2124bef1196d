use super::atom::{PdbAtom, RecordType, ResidueKey};
use super::sequence::Sequence;
use std::collections::{BTreeSet, HashSet};

/// An ordered collection of PDB coordinate records plus the header lines worth keeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub header: Vec<String>,
    pub atoms: Vec<PdbAtom>,
    /// Atom indices after which a `TER` record is written.
    pub ter_after: BTreeSet<usize>,
}

impl Structure {
    pub fn new(atoms: Vec<PdbAtom>) -> Self {
        Self {
            atoms,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Chain identifiers in order of first appearance.
    pub fn chain_ids(&self) -> Vec<char> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .filter(|a| seen.insert(a.chain_id))
            .map(|a| a.chain_id)
            .collect()
    }

    pub fn atoms_on_chain(&self, chain_id: char) -> impl Iterator<Item = &PdbAtom> {
        self.atoms.iter().filter(move |a| a.chain_id == chain_id)
    }

    /// Highest residue sequence number found on `chain_id`.
    pub fn max_residue_number(&self, chain_id: char) -> Option<isize> {
        self.atoms_on_chain(chain_id).map(|a| a.res_seq).max()
    }

    /// Derives the one-letter sequence of the `ATOM` residues on a chain, in file order.
    pub fn chain_sequence(&self, chain_id: char, name: &str) -> Sequence {
        let mut seen: HashSet<ResidueKey> = HashSet::new();
        let names = self
            .atoms_on_chain(chain_id)
            .filter(|a| a.record == RecordType::Atom)
            .filter(|a| seen.insert(a.residue_key()))
            .map(|a| a.res_name.as_str());
        Sequence::from_residue_names(name, names)
    }

    pub fn set_chain(&mut self, chain_id: char) {
        for atom in &mut self.atoms {
            atom.chain_id = chain_id;
        }
    }

    pub fn renumber_serials(&mut self, start: usize) {
        for (i, atom) in self.atoms.iter_mut().enumerate() {
            atom.serial = start + i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(record: RecordType, name: &str, res: &str, chain: char, seq: isize) -> PdbAtom {
        PdbAtom::new(record, name, res, chain, seq)
    }

    fn sample() -> Structure {
        Structure::new(vec![
            atom(RecordType::Hetatm, "CA", "CAL", 'B', 1),
            atom(RecordType::Atom, "N", "MET", 'A', 1),
            atom(RecordType::Atom, "CA", "MET", 'A', 1),
            atom(RecordType::Atom, "N", "GLN", 'A', 2),
            atom(RecordType::Atom, "N", "ILE", 'A', 7),
            atom(RecordType::Hetatm, "CA", "CAL", 'B', 40),
        ])
    }

    #[test]
    fn max_residue_number_is_per_chain() {
        let s = sample();
        assert_eq!(s.max_residue_number('A'), Some(7));
        assert_eq!(s.max_residue_number('B'), Some(40));
        assert_eq!(s.max_residue_number('C'), None);
    }

    #[test]
    fn chain_sequence_collapses_atoms_into_residues() {
        let s = sample();
        assert_eq!(s.chain_sequence('A', "p").as_string(), "MQI");
        assert!(s.chain_sequence('B', "s").is_empty());
    }

    #[test]
    fn chain_ids_and_renumbering() {
        let mut s = sample();
        assert_eq!(s.chain_ids(), vec!['B', 'A']);
        s.renumber_serials(10);
        assert_eq!(s.atoms[0].serial, 10);
        assert_eq!(s.atoms[5].serial, 15);
        s.set_chain('Z');
        assert_eq!(s.chain_ids(), vec!['Z']);
    }
}
