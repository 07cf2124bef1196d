use std::path::{Path, PathBuf};

/// Conventional locations of the inputs below the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    root: PathBuf,
}

impl InputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn protein_pdb(&self, protein: &str) -> PathBuf {
        self.root.join("proteins").join(format!("{}.pdb", protein))
    }

    pub fn protein_fasta(&self, protein: &str) -> PathBuf {
        self.root.join("proteins").join(format!("{}.fasta", protein))
    }

    pub fn surface_pdb(&self, surface: &str) -> PathBuf {
        self.root.join("surfaces").join(format!("{}.pdb", surface))
    }

    pub fn surface_vectors(&self, surface: &str) -> PathBuf {
        self.root.join("surfaces").join(format!("{}.surf", surface))
    }

    pub fn merged_pdb(&self, protein: &str, surface: &str) -> PathBuf {
        self.root
            .join("merged")
            .join(format!("{}_{}.pdb", protein, surface))
    }
}

/// Files produced for a single docking run, all inside one run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    dir: PathBuf,
    protein: String,
}

impl RunLayout {
    pub fn new(output_root: &Path, protein: &str, surface: &str) -> Self {
        Self {
            dir: output_root.join(format!("{}_{}", protein, surface)),
            protein: protein.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn flags(&self) -> PathBuf {
        self.dir.join("docking.flags")
    }

    pub fn fragments(&self, window: usize) -> PathBuf {
        self.dir
            .join("fragments")
            .join(format!("{}.frag{}", self.protein, window))
    }

    pub fn log(&self) -> PathBuf {
        self.dir.join("docking.log")
    }

    pub fn scorefile(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_paths_follow_directory_convention() {
        let layout = InputLayout::new("input");
        assert_eq!(layout.protein_pdb("ubq"), PathBuf::from("input/proteins/ubq.pdb"));
        assert_eq!(layout.protein_fasta("ubq"), PathBuf::from("input/proteins/ubq.fasta"));
        assert_eq!(layout.surface_vectors("cal"), PathBuf::from("input/surfaces/cal.surf"));
        assert_eq!(layout.merged_pdb("ubq", "cal"), PathBuf::from("input/merged/ubq_cal.pdb"));
    }

    #[test]
    fn run_files_live_in_one_directory() {
        let run = RunLayout::new(Path::new("out"), "ubq", "cal");
        assert_eq!(run.dir(), Path::new("out/ubq_cal"));
        assert_eq!(run.fragments(9), PathBuf::from("out/ubq_cal/fragments/ubq.frag9"));
        assert_eq!(run.scorefile("score.sc"), PathBuf::from("out/ubq_cal/score.sc"));
    }
}
