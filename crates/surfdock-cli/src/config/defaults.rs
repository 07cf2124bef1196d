use std::path::PathBuf;
use surfdock::engine::config::DEFAULT_SURFACE_RESIDUE;

pub struct DefaultsConfig {
    pub rosetta_home: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub nstruct: usize,
    pub protein_chain: char,
    pub surface_chain: char,
    pub surface_residue: String,
    pub scorefile: String,
    pub top: usize,
    pub score_column: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rosetta_home: PathBuf::from("/opt/rosetta"),
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            nstruct: 10,
            protein_chain: 'A',
            surface_chain: 'B',
            surface_residue: DEFAULT_SURFACE_RESIDUE.to_string(),
            scorefile: "score.sc".to_string(),
            top: 5,
            score_column: "total_score".to_string(),
        }
    }
}
