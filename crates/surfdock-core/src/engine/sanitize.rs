use super::config::{MergeOptions, MergeOrder};
use crate::core::models::atom::{PdbAtom, RecordType, ResidueKey};
use crate::core::models::structure::Structure;
use std::collections::{HashMap, HashSet};

/// Side-chain atoms and the parent each one needs to be present.
const SIDECHAIN_PARENTS: [(&str, &str); 13] = [
    ("CG", "CB"),
    ("OG", "CB"),
    ("OG1", "CB"),
    ("SG", "CB"),
    ("CD", "CG"),
    ("ND1", "CG"),
    ("CD1", "CG"),
    ("CD2", "CG"),
    ("CE", "CD"),
    ("NE", "CD"),
    ("NE2", "CD"),
    ("OE1", "CD"),
    ("OE2", "CD"),
];

const BACKBONE: [&str; 3] = ["N", "CA", "C"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub hydrogens_removed: usize,
    pub residues_kept: usize,
    pub residues_removed: Vec<ResidueKey>,
}

fn residue_is_complete(res_name: &str, names: &HashSet<&str>, options: &MergeOptions) -> bool {
    if !BACKBONE.iter().all(|n| names.contains(n)) {
        return false;
    }
    if options.require_oxygen && !names.contains("O") {
        return false;
    }
    if options.require_cb && res_name != "GLY" && !names.contains("CB") {
        return false;
    }
    if options.prune_dangling {
        let dangling = SIDECHAIN_PARENTS
            .iter()
            .any(|(child, parent)| names.contains(child) && !names.contains(parent));
        if dangling {
            return false;
        }
    }
    true
}

/// Removes hydrogens, non-`ATOM` records and incomplete residues from a protein structure.
pub fn sanitize_protein(protein: &Structure, options: &MergeOptions) -> (Structure, SanitizeReport) {
    let mut report = SanitizeReport::default();

    let candidates: Vec<&PdbAtom> = protein
        .atoms
        .iter()
        .filter(|a| a.record == RecordType::Atom)
        .filter(|a| {
            let drop = options.strip_hydrogens && a.is_hydrogen();
            if drop {
                report.hydrogens_removed += 1;
            }
            !drop
        })
        .collect();

    let mut order: Vec<ResidueKey> = Vec::new();
    let mut residues: HashMap<ResidueKey, (String, HashSet<&str>)> = HashMap::new();
    for atom in candidates.iter().copied() {
        let key = atom.residue_key();
        residues
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                (atom.res_name.clone(), HashSet::new())
            })
            .1
            .insert(atom.name.as_str());
    }

    let mut keep: HashSet<ResidueKey> = HashSet::new();
    for key in order {
        let (res_name, names) = &residues[&key];
        if residue_is_complete(res_name, names, options) {
            keep.insert(key);
        } else {
            report.residues_removed.push(key);
        }
    }
    report.residues_kept = keep.len();

    let atoms = candidates
        .into_iter()
        .filter(|a| keep.contains(&a.residue_key()))
        .cloned()
        .collect();

    (
        Structure {
            header: Vec::new(),
            atoms,
            ter_after: Default::default(),
        },
        report,
    )
}

/// Keeps surface atoms whose residue name matches the configured filter, if any.
pub fn sanitize_surface(surface: &Structure, options: &MergeOptions) -> Structure {
    let atoms = match options.surface_residue.as_deref() {
        Some(wanted) => surface
            .atoms
            .iter()
            .filter(|a| a.res_name.trim().eq_ignore_ascii_case(wanted))
            .cloned()
            .collect(),
        None => surface.atoms.clone(),
    };
    Structure::new(atoms)
}

/// Concatenates the partners with their chain ids forced, serials renumbered and optional `TER`.
pub fn merge_structures(
    protein: Option<Structure>,
    surface: Option<Structure>,
    options: &MergeOptions,
) -> Structure {
    let mut protein = protein.unwrap_or_default();
    let mut surface = surface.unwrap_or_default();
    protein.set_chain(options.chains.protein);
    surface.set_chain(options.chains.surface);

    let (first, second) = match options.order {
        MergeOrder::SurfaceFirst => (surface, protein),
        MergeOrder::ProteinFirst => (protein, surface),
    };

    let mut merged = Structure::default();
    let split = first.len();
    let both = !first.is_empty() && !second.is_empty();
    merged.atoms.extend(first.atoms);
    merged.atoms.extend(second.atoms);
    merged.renumber_serials(options.serial_start);
    if options.add_ter && both {
        merged.ter_after.insert(split - 1);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(res_name: &str, seq: isize, names: &[&str]) -> Vec<PdbAtom> {
        names
            .iter()
            .map(|n| PdbAtom::new(RecordType::Atom, n, res_name, 'X', seq))
            .collect()
    }

    fn protein() -> Structure {
        let mut atoms = Vec::new();
        atoms.extend(residue("ALA", 1, &["N", "CA", "C", "O", "CB", "H", "HA"]));
        atoms.extend(residue("GLY", 2, &["N", "CA", "C", "O"]));
        atoms.extend(residue("SER", 3, &["N", "CA", "C", "O"]));
        atoms.extend(residue("LYS", 4, &["N", "CA", "C", "O", "CB", "CD"]));
        atoms.extend(residue("VAL", 5, &["N", "CA", "C", "CB"]));
        atoms.push(PdbAtom::new(RecordType::Hetatm, "O", "HOH", 'X', 100));
        Structure::new(atoms)
    }

    #[test]
    fn sanitize_keeps_only_complete_residues() {
        let (clean, report) = sanitize_protein(&protein(), &MergeOptions::default());

        assert_eq!(report.hydrogens_removed, 2);
        assert_eq!(report.residues_kept, 2);
        let removed: Vec<isize> = report.residues_removed.iter().map(|k| k.res_seq).collect();
        assert_eq!(removed, vec![3, 4, 5]);
        assert_eq!(clean.len(), 5 + 4);
        assert!(clean.atoms.iter().all(|a| a.record == RecordType::Atom));
    }

    #[test]
    fn complete_aromatic_and_charged_residues_are_kept() {
        let mut atoms = Vec::new();
        atoms.extend(residue("PHE", 1, &["N", "CA", "C", "O", "CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ"]));
        atoms.extend(residue("TYR", 2, &["N", "CA", "C", "O", "CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ", "OH"]));
        atoms.extend(residue("ARG", 3, &["N", "CA", "C", "O", "CB", "CG", "CD", "NE", "CZ", "NH1", "NH2"]));
        atoms.extend(residue("LYS", 4, &["N", "CA", "C", "O", "CB", "CG", "CD", "CE", "NZ"]));
        atoms.extend(residue("HIS", 5, &["N", "CA", "C", "O", "CB", "CG", "ND1", "CD2", "CE1", "NE2"]));
        atoms.extend(residue("GLU", 6, &["N", "CA", "C", "O", "CB", "CG", "CD", "OE1", "OE2"]));

        let (clean, report) = sanitize_protein(&Structure::new(atoms), &MergeOptions::default());

        assert!(report.residues_removed.is_empty(), "removed {:?}", report.residues_removed);
        assert_eq!(report.residues_kept, 6);
        assert_eq!(clean.len(), 11 + 12 + 11 + 9 + 10 + 9);
    }

    #[test]
    fn relaxed_options_keep_more_residues() {
        let options = MergeOptions {
            require_oxygen: false,
            require_cb: false,
            prune_dangling: false,
            ..Default::default()
        };
        let (_, report) = sanitize_protein(&protein(), &options);
        assert_eq!(report.residues_kept, 5);
    }

    #[test]
    fn surface_filter_matches_residue_name() {
        let surface = Structure::new(vec![
            PdbAtom::new(RecordType::Hetatm, "CA", "CAL", 'S', 1),
            PdbAtom::new(RecordType::Hetatm, "C", "CO3", 'S', 2),
        ]);
        let options = MergeOptions {
            surface_residue: Some("cal".to_string()),
            ..Default::default()
        };
        assert_eq!(sanitize_surface(&surface, &options).len(), 1);
        assert_eq!(sanitize_surface(&surface, &MergeOptions::default()).len(), 1);

        let keep_all = MergeOptions {
            surface_residue: None,
            ..Default::default()
        };
        assert_eq!(sanitize_surface(&surface, &keep_all).len(), 2);
    }

    #[test]
    fn merge_orders_renumbers_and_marks_ter() {
        let protein = Structure::new(residue("GLY", 1, &["N", "CA"]));
        let surface = Structure::new(vec![PdbAtom::new(RecordType::Hetatm, "CA", "CAL", 'Q', 1)]);
        let options = MergeOptions {
            add_ter: true,
            serial_start: 10,
            ..Default::default()
        };

        let merged = merge_structures(Some(protein), Some(surface), &options);
        assert_eq!(merged.chain_ids(), vec!['B', 'A']);
        assert_eq!(merged.atoms[0].res_name, "CAL");
        assert_eq!(merged.atoms[0].serial, 10);
        assert_eq!(merged.atoms[2].serial, 12);
        assert!(merged.ter_after.contains(&0));
    }

    #[test]
    fn merge_with_single_partner_has_no_ter() {
        let protein = Structure::new(residue("GLY", 1, &["N", "CA"]));
        let options = MergeOptions {
            add_ter: true,
            order: MergeOrder::ProteinFirst,
            ..Default::default()
        };
        let merged = merge_structures(Some(protein), None, &options);
        assert_eq!(merged.len(), 2);
        assert!(merged.ter_after.is_empty());
    }
}
