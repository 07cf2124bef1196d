use super::config::ConfigError;
use super::error::EngineError;
use crate::core::models::fragment::{Fragment, FragmentLibrary, FragmentPosition, FragmentResidue};
use crate::core::models::sequence::Sequence;

pub const TEMPLATE_PDB_ID: &str = "xxxx";

/// The backbone conformation written for every residue of every placeholder fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentTemplate {
    pub secondary_structure: char,
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
}

impl Default for FragmentTemplate {
    fn default() -> Self {
        Self {
            secondary_structure: 'L',
            phi: -60.0,
            psi: -45.0,
            omega: 180.0,
        }
    }
}

/// Number of window start positions for `residue_count` residues: `N - K + 1`, or zero.
pub fn window_count(residue_count: usize, window: usize) -> usize {
    match residue_count.checked_sub(window) {
        Some(diff) if window > 0 => diff + 1,
        _ => 0,
    }
}

/// Builds a placeholder library with one templated fragment per valid window position.
///
/// Residue identities come from `sequence`; positions past its end are written as `X`.
pub fn synthesize(
    sequence: &Sequence,
    residue_count: usize,
    window: usize,
    template: &FragmentTemplate,
) -> Result<FragmentLibrary, EngineError> {
    if window == 0 {
        return Err(ConfigError::InvalidValue {
            name: "fragment window",
            reason: "must be at least 1".to_string(),
        }
        .into());
    }
    if sequence.len() < window {
        return Err(EngineError::InputTooShort {
            what: format!("Sequence '{}'", sequence.name),
            length: sequence.len(),
            window,
        });
    }
    if residue_count < window {
        return Err(EngineError::InputTooShort {
            what: "Protein chain".to_string(),
            length: residue_count,
            window,
        });
    }

    let positions = (1..=window_count(residue_count, window))
        .map(|position| {
            let residues = (position..position + window)
                .map(|res| FragmentResidue {
                    res_seq: res as isize,
                    residue: sequence.residue_at(res),
                    secondary_structure: template.secondary_structure,
                    phi: template.phi,
                    psi: template.psi,
                    omega: template.omega,
                })
                .collect();
            FragmentPosition {
                position,
                neighbors: vec![Fragment {
                    pdb_id: TEMPLATE_PDB_ID.to_string(),
                    chain_id: 'A',
                    residues,
                }],
            }
        })
        .collect();

    Ok(FragmentLibrary { window, positions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fragments::FragmentFile;
    use crate::core::io::traits::TextFile;
    use std::io::Cursor;

    const UBIQUITIN: &str = "MQIFVKTLTGKTITLEVEPSDTIENVKAKIQDKEGIPPDQQRLIFAGKQLEDGRTLSDYNIQKESTLHLVLRLRGG";

    #[test]
    fn window_count_is_n_minus_k_plus_one() {
        assert_eq!(window_count(76, 3), 74);
        assert_eq!(window_count(76, 9), 68);
        assert_eq!(window_count(9, 9), 1);
        assert_eq!(window_count(8, 9), 0);
        assert_eq!(window_count(5, 0), 0);
    }

    #[test]
    fn synthesized_library_has_one_record_per_window() {
        let seq = Sequence::new("ubq", UBIQUITIN);
        for (n, k) in [(76, 3), (76, 9), (20, 9), (9, 9)] {
            let lib = synthesize(&seq, n, k, &FragmentTemplate::default()).unwrap();
            assert_eq!(lib.len(), n - k + 1, "N={} K={}", n, k);
            assert!(lib.positions.iter().all(|p| p.neighbors.len() == 1));
            assert!(lib.positions.iter().all(|p| p.neighbors[0].residues.len() == k));
        }
    }

    #[test]
    fn fragment_residues_follow_the_sequence() {
        let seq = Sequence::new("ubq", "MQIFV");
        let lib = synthesize(&seq, 7, 3, &FragmentTemplate::default()).unwrap();
        let first: String = lib.positions[0].neighbors[0].residues.iter().map(|r| r.residue).collect();
        let last: String = lib.positions[4].neighbors[0].residues.iter().map(|r| r.residue).collect();
        assert_eq!(first, "MQI");
        assert_eq!(last, "VXX");
        assert_eq!(lib.positions[4].neighbors[0].residues[0].res_seq, 5);
    }

    #[test]
    fn written_file_contains_n_minus_k_plus_one_positions() {
        let seq = Sequence::new("ubq", UBIQUITIN);
        let lib = synthesize(&seq, 76, 9, &FragmentTemplate::default()).unwrap();
        let mut out = Vec::new();
        FragmentFile::write_to(&lib, &mut out).unwrap();

        let text = String::from_utf8(out.clone()).unwrap();
        assert_eq!(text.matches("position:").count(), 68);
        let parsed = FragmentFile::read_from(&mut Cursor::new(out)).unwrap();
        assert_eq!(parsed.window, 9);
        assert_eq!(parsed.len(), 68);
    }

    #[test]
    fn too_short_inputs_are_rejected() {
        let short = Sequence::new("tiny", "GIVE");
        assert!(matches!(
            synthesize(&short, 40, 9, &FragmentTemplate::default()),
            Err(EngineError::InputTooShort { length: 4, window: 9, .. })
        ));

        let seq = Sequence::new("ubq", UBIQUITIN);
        assert!(matches!(
            synthesize(&seq, 5, 9, &FragmentTemplate::default()),
            Err(EngineError::InputTooShort { length: 5, window: 9, .. })
        ));
    }
}
