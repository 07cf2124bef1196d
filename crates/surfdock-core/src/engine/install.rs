use super::config::RosettaConfig;
use super::error::EngineError;
use std::path::PathBuf;
use tracing::debug;

pub const EXECUTABLE_NAME: &str = "surface_docking";

pub const STANDARD_BUILDS: [&str; 4] = [
    "default.linuxgccrelease",
    "static.linuxgccrelease",
    "default.linuxclangrelease",
    "default.macosclangrelease",
];

/// A located docking executable together with the database it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosettaInstallation {
    pub binary: PathBuf,
    pub database: PathBuf,
}

impl RosettaInstallation {
    /// Locates the executable and database, failing on the first one that is absent.
    pub fn resolve(config: &RosettaConfig) -> Result<Self, EngineError> {
        let binary = match &config.binary {
            Some(path) => {
                if !path.is_file() {
                    return Err(EngineError::MissingDependency {
                        what: "docking executable",
                        path: path.clone(),
                    });
                }
                path.clone()
            }
            None => {
                let candidates = Self::binary_candidates(config);
                debug!("Searching for the docking executable in {:?}", candidates);
                candidates
                    .iter()
                    .find(|p| p.is_file())
                    .cloned()
                    .ok_or_else(|| EngineError::MissingDependency {
                        what: "docking executable",
                        path: candidates[0].clone(),
                    })?
            }
        };

        let database = config
            .database
            .clone()
            .unwrap_or_else(|| config.home.join("main").join("database"));
        if !database.is_dir() {
            return Err(EngineError::MissingDependency {
                what: "Rosetta database",
                path: database,
            });
        }

        Ok(Self { binary, database })
    }

    /// Executable paths tried in order: the configured build first, then the standard ones.
    pub fn binary_candidates(config: &RosettaConfig) -> Vec<PathBuf> {
        let bin_dir = config.home.join("main").join("source").join("bin");
        let mut builds: Vec<&str> = Vec::with_capacity(STANDARD_BUILDS.len() + 1);
        if let Some(build) = config.build.as_deref() {
            builds.push(build);
        }
        builds.extend(STANDARD_BUILDS.iter().filter(|b| Some(**b) != config.build.as_deref()));

        builds
            .into_iter()
            .map(|b| bin_dir.join(format!("{}.{}", EXECUTABLE_NAME, b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config(home: PathBuf) -> RosettaConfig {
        RosettaConfig {
            home,
            binary: None,
            database: None,
            build: None,
        }
    }

    #[test]
    fn resolves_standard_layout() {
        let tmp = tempdir().unwrap();
        let home = tmp.path().to_path_buf();
        let bin_dir = home.join("main/source/bin");
        fs::create_dir_all(&bin_dir).unwrap();
        fs::create_dir_all(home.join("main/database")).unwrap();
        fs::write(bin_dir.join("surface_docking.static.linuxgccrelease"), "").unwrap();

        let install = RosettaInstallation::resolve(&config(home.clone())).unwrap();
        assert_eq!(install.binary, bin_dir.join("surface_docking.static.linuxgccrelease"));
        assert_eq!(install.database, home.join("main/database"));
    }

    #[test]
    fn configured_build_is_tried_first() {
        let mut cfg = config(PathBuf::from("/r"));
        cfg.build = Some("mpi.linuxgccrelease".to_string());
        let candidates = RosettaInstallation::binary_candidates(&cfg);
        assert_eq!(
            candidates[0],
            PathBuf::from("/r/main/source/bin/surface_docking.mpi.linuxgccrelease")
        );
        assert_eq!(candidates.len(), 5);

        cfg.build = Some("default.linuxgccrelease".to_string());
        assert_eq!(RosettaInstallation::binary_candidates(&cfg).len(), 4);
    }

    #[test]
    fn missing_binary_and_database_are_dependency_errors() {
        let tmp = tempdir().unwrap();
        let home = tmp.path().to_path_buf();

        let err = RosettaInstallation::resolve(&config(home.clone())).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingDependency { what: "docking executable", .. }
        ));

        let binary = home.join("my_docking");
        fs::write(&binary, "").unwrap();
        let mut cfg = config(home);
        cfg.binary = Some(binary);
        let err = RosettaInstallation::resolve(&cfg).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingDependency { what: "Rosetta database", .. }
        ));
    }
}
