use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileDockingConfig};
use super::models::AppConfig;
use crate::cli::{DockArgs, SummarizeArgs};
use crate::error::{CliError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use surfdock::engine::config::{self as core_config, ChainAssignment, MergeOptions};

pub fn build_dock_config(args: &DockArgs, file_config: FileConfig) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let rosetta_file = file_config.rosetta.take().unwrap_or_default();
    let paths_file = file_config.paths.take().unwrap_or_default();
    let docking_file = file_config.docking.take().unwrap_or_default();

    let rosetta_home = args
        .rosetta_home
        .clone()
        .or(rosetta_file.home)
        .unwrap_or(defaults.rosetta_home);
    let input_dir = args
        .input_dir
        .clone()
        .or(paths_file.input_dir)
        .unwrap_or(defaults.input_dir);
    let output_dir = args
        .output_dir
        .clone()
        .or(paths_file.output_dir)
        .unwrap_or(defaults.output_dir);
    let nstruct = args
        .nstruct
        .or(docking_file.nstruct)
        .unwrap_or(defaults.nstruct);

    let merge = MergeOptions {
        chains: ChainAssignment {
            protein: docking_file.protein_chain.unwrap_or(defaults.protein_chain),
            surface: docking_file.surface_chain.unwrap_or(defaults.surface_chain),
        },
        surface_residue: surface_residue_filter(None, false, &docking_file),
        ..MergeOptions::default()
    };

    let mut extra_flags = docking_file.extra_flags.unwrap_or_default();
    extra_flags.extend(args.extra_flags.iter().cloned());

    let docking = core_config::DockingConfigBuilder::new()
        .protein_name(args.protein.clone())
        .surface_name(args.surface.clone())
        .nstruct(nstruct)
        .input_dir(input_dir)
        .output_dir(output_dir)
        .rosetta_home(rosetta_home)
        .rosetta_binary(args.rosetta_bin.clone().or(rosetta_file.binary))
        .rosetta_database(args.rosetta_db.clone().or(rosetta_file.database))
        .rosetta_build(args.build.clone().or(rosetta_file.build))
        .merge_options(merge)
        .scorefile_name(docking_file.scorefile.unwrap_or(defaults.scorefile))
        .extra_flags(extra_flags)
        .summary(build_summary(args.top, None, &file_config))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        docking,
        dry_run: args.dry_run,
    })
}

/// Residue name kept from the surface: an explicit name wins, `keep_all` (from the CLI or the
/// file) disables filtering, otherwise the file's name or the default `CAL`.
pub fn surface_residue_filter(
    explicit: Option<String>,
    keep_all: bool,
    docking_file: &FileDockingConfig,
) -> Option<String> {
    if let Some(name) = explicit {
        return Some(name);
    }
    if keep_all || docking_file.keep_all_surface.unwrap_or(false) {
        return None;
    }
    Some(
        docking_file
            .surface_residue
            .clone()
            .unwrap_or_else(|| DefaultsConfig::default().surface_residue),
    )
}

pub fn build_summary_config(args: &SummarizeArgs, file_config: &FileConfig) -> core_config::SummaryConfig {
    build_summary(args.top, args.column.clone(), file_config)
}

fn build_summary(
    top: Option<usize>,
    column: Option<String>,
    file_config: &FileConfig,
) -> core_config::SummaryConfig {
    let defaults = DefaultsConfig::default();
    let summary_file = file_config.summary.clone().unwrap_or_default();
    core_config::SummaryConfig {
        top: top.or(summary_file.top).unwrap_or(defaults.top),
        score_column: column
            .or(summary_file.score_column)
            .unwrap_or(defaults.score_column),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "rosetta.home" => {
                config.rosetta.get_or_insert_with(Default::default).home = Some(PathBuf::from(value_str));
            }
            "rosetta.binary" => {
                config.rosetta.get_or_insert_with(Default::default).binary = Some(PathBuf::from(value_str));
            }
            "rosetta.database" => {
                config.rosetta.get_or_insert_with(Default::default).database = Some(PathBuf::from(value_str));
            }
            "rosetta.build" => {
                config.rosetta.get_or_insert_with(Default::default).build = Some(value_str.to_string());
            }
            "paths.input-dir" => {
                config.paths.get_or_insert_with(Default::default).input_dir = Some(PathBuf::from(value_str));
            }
            "paths.output-dir" => {
                config.paths.get_or_insert_with(Default::default).output_dir = Some(PathBuf::from(value_str));
            }
            "docking.nstruct" => {
                config.docking.get_or_insert_with(Default::default).nstruct =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "docking.protein-chain" => {
                config.docking.get_or_insert_with(Default::default).protein_chain =
                    Some(parse_value(key, value_str, "chain")?);
            }
            "docking.surface-chain" => {
                config.docking.get_or_insert_with(Default::default).surface_chain =
                    Some(parse_value(key, value_str, "chain")?);
            }
            "docking.surface-residue" => {
                config.docking.get_or_insert_with(Default::default).surface_residue = Some(value_str.to_string());
            }
            "docking.keep-all-surface" => {
                config.docking.get_or_insert_with(Default::default).keep_all_surface =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "docking.scorefile" => {
                config.docking.get_or_insert_with(Default::default).scorefile = Some(value_str.to_string());
            }
            "docking.extra-flags" => {
                config
                    .docking
                    .get_or_insert_with(Default::default)
                    .extra_flags
                    .get_or_insert_with(Vec::new)
                    .push(value_str.to_string());
            }
            "summary.top" => {
                config.summary.get_or_insert_with(Default::default).top =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "summary.score-column" => {
                config.summary.get_or_insert_with(Default::default).score_column = Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn base_dock_args() -> DockArgs {
        DockArgs {
            protein: "ubq".to_string(),
            surface: "calcite".to_string(),
            ..DockArgs::default()
        }
    }

    #[test]
    fn defaults_fill_everything_not_given() {
        let app = build_dock_config(&base_dock_args(), FileConfig::default()).unwrap();
        let cfg = app.docking;
        let defaults = DefaultsConfig::default();

        assert_eq!(cfg.protein_name, "ubq");
        assert_eq!(cfg.nstruct, defaults.nstruct);
        assert_eq!(cfg.input_dir, defaults.input_dir);
        assert_eq!(cfg.output_dir, defaults.output_dir);
        assert_eq!(cfg.rosetta.home, defaults.rosetta_home);
        assert_eq!(cfg.rosetta.binary, None);
        assert_eq!(cfg.scorefile_name, "score.sc");
        assert_eq!(cfg.merge.chains, ChainAssignment::default());
        assert_eq!(cfg.merge.surface_residue.as_deref(), Some("CAL"));
        assert_eq!(cfg.summary.top, 5);
        assert_eq!(cfg.summary.score_column, "total_score");
        assert!(!app.dry_run);
    }

    #[test]
    fn file_values_are_used_and_cli_overrides_them() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("surfdock.toml");
        fs::write(
            &path,
            r#"
            [rosetta]
            home = "/srv/rosetta"
            [paths]
            output-dir = "runs"
            [docking]
            nstruct = 40
            surface-chain = "S"
            extra-flags = ["-mute all"]
            [summary]
            top = 8
            "#,
        )
        .unwrap();

        let mut args = base_dock_args();
        args.nstruct = Some(3);
        args.rosetta_bin = Some(PathBuf::from("/usr/local/bin/surface_docking"));
        args.extra_flags = vec!["-ex1".to_string()];

        let cfg = build_dock_config(&args, FileConfig::from_file(&path).unwrap())
            .unwrap()
            .docking;
        assert_eq!(cfg.nstruct, 3);
        assert_eq!(cfg.rosetta.home, PathBuf::from("/srv/rosetta"));
        assert_eq!(cfg.rosetta.binary, Some(PathBuf::from("/usr/local/bin/surface_docking")));
        assert_eq!(cfg.output_dir, PathBuf::from("runs"));
        assert_eq!(cfg.merge.chains.surface, 'S');
        assert_eq!(cfg.extra_flags, vec!["-mute all".to_string(), "-ex1".to_string()]);
        assert_eq!(cfg.summary.top, 8);
    }

    #[test]
    fn set_values_override_file_values() {
        let mut args = base_dock_args();
        args.set_values = vec![
            "docking.nstruct=99".to_string(),
            "rosetta.build=static.linuxgccrelease".to_string(),
            "paths.input-dir=/data/in".to_string(),
            "summary.score-column=I_sc".to_string(),
            "docking.extra-flags=-mute all".to_string(),
        ];

        let cfg = build_dock_config(&args, FileConfig::default()).unwrap().docking;
        assert_eq!(cfg.nstruct, 99);
        assert_eq!(cfg.rosetta.build.as_deref(), Some("static.linuxgccrelease"));
        assert_eq!(cfg.input_dir, PathBuf::from("/data/in"));
        assert_eq!(cfg.summary.score_column, "I_sc");
        assert_eq!(cfg.extra_flags, vec!["-mute all".to_string()]);
    }

    #[test]
    fn surface_filter_is_configurable_for_auto_merge() {
        let mut args = base_dock_args();
        args.set_values = vec!["docking.surface-residue=CO3".to_string()];
        let cfg = build_dock_config(&args, FileConfig::default()).unwrap().docking;
        assert_eq!(cfg.merge.surface_residue.as_deref(), Some("CO3"));

        args.set_values = vec!["docking.keep-all-surface=true".to_string()];
        let cfg = build_dock_config(&args, FileConfig::default()).unwrap().docking;
        assert_eq!(cfg.merge.surface_residue, None);
    }

    #[test]
    fn explicit_surface_residue_beats_keep_all_in_file() {
        let file = FileDockingConfig {
            keep_all_surface: Some(true),
            ..Default::default()
        };
        assert_eq!(surface_residue_filter(None, false, &file), None);
        assert_eq!(
            surface_residue_filter(Some("CO3".to_string()), false, &file).as_deref(),
            Some("CO3")
        );
        assert_eq!(
            surface_residue_filter(None, false, &FileDockingConfig::default()).as_deref(),
            Some("CAL")
        );
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in [
            "docking.nstruct",
            "docking.nstruct=many",
            "docking.keep-all-surface=maybe",
            "nonsense.key=1",
        ] {
            let mut args = base_dock_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_dock_config(&args, FileConfig::default()), Err(CliError::Config(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn zero_nstruct_is_a_config_error() {
        let mut args = base_dock_args();
        args.nstruct = Some(0);
        assert!(matches!(
            build_dock_config(&args, FileConfig::default()),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn summary_config_prefers_cli_over_file() {
        let mut file = FileConfig::default();
        file.summary = Some(super::super::file::FileSummaryConfig {
            top: Some(2),
            score_column: Some("rms".to_string()),
        });
        let args = SummarizeArgs {
            scorefile: PathBuf::from("score.sc"),
            column: Some("total_score".to_string()),
            ..SummarizeArgs::default()
        };

        let summary = build_summary_config(&args, &file);
        assert_eq!(summary.top, 2);
        assert_eq!(summary.score_column, "total_score");
    }
}
