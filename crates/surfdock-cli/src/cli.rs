use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

/// Exit status for a failed parse: 0 for `--help`/`--version`, 1 for usage errors.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "SURFDOCK CLI - Prepare, run and summarize Rosetta protein-on-surface docking.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file in TOML format.
    /// Defaults to `surfdock.toml` in the platform configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare the inputs for a protein/surface pair and run the docking executable.
    Dock(DockArgs),
    /// Rank the decoys of an existing score file.
    Summarize(SummarizeArgs),
    /// Sanitize and merge protein and surface structures into one PDB file.
    Merge(MergeArgs),
    /// Estimate surface lattice vectors from a slab structure.
    SurfaceVectors(SurfaceVectorsArgs),
    /// Cut a residue range out of a protein into a smaller test structure.
    ExtractDomain(ExtractDomainArgs),
}

/// Arguments for the `dock` subcommand.
#[derive(Args, Debug, Default)]
pub struct DockArgs {
    /// Protein name; inputs are looked up as `proteins/<NAME>.pdb|.fasta`.
    #[arg(required = true, value_name = "PROTEIN")]
    pub protein: String,

    /// Surface name; inputs are looked up as `surfaces/<NAME>.pdb|.surf`.
    #[arg(required = true, value_name = "SURFACE")]
    pub surface: String,

    /// Number of decoys to generate.
    #[arg(value_name = "NSTRUCT")]
    pub nstruct: Option<usize>,

    // --- Installation ---
    /// Rosetta installation directory.
    #[arg(long, env = "ROSETTA_HOME", value_name = "PATH")]
    pub rosetta_home: Option<PathBuf>,

    /// Docking executable, bypassing the search below the installation directory.
    #[arg(long, env = "ROSETTA_BIN", value_name = "PATH")]
    pub rosetta_bin: Option<PathBuf>,

    /// Rosetta database directory.
    #[arg(long, env = "ROSETTA_DB", value_name = "PATH")]
    pub rosetta_db: Option<PathBuf>,

    /// Build suffix tried first (e.g. 'default.linuxgccrelease').
    #[arg(long, value_name = "SUFFIX")]
    pub build: Option<String>,

    // --- Layout ---
    /// Directory holding the `proteins/`, `surfaces/` and `merged/` inputs.
    #[arg(long, env = "SURFDOCK_INPUT_DIR", value_name = "PATH")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving one `<protein>_<surface>/` run directory per pair.
    #[arg(long, env = "SURFDOCK_OUTPUT_DIR", value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    // --- Run ---
    /// Additional option appended to the flags file (e.g. '-mute all'). Repeatable.
    #[arg(short = 'x', long = "extra-flag", value_name = "FLAG", allow_hyphen_values = true)]
    pub extra_flags: Vec<String>,

    /// Number of best decoys to print.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top: Option<usize>,

    /// Prepare every input file and print the command line without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S docking.nstruct=50
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug, Default)]
pub struct SummarizeArgs {
    /// Score file written by a docking run.
    #[arg(required = true, value_name = "PATH")]
    pub scorefile: PathBuf,

    /// Score column to rank by.
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Number of best decoys to print.
    #[arg(short = 'n', long, value_name = "INT")]
    pub top: Option<usize>,

    /// Export every ranked decoy to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the `merge` subcommand.
#[derive(Args, Debug, Default)]
#[command(group(ArgGroup::new("partners").required(true).multiple(true).args(["protein", "surface"])))]
pub struct MergeArgs {
    /// Protein structure (PDB).
    #[arg(short, long, value_name = "PATH")]
    pub protein: Option<PathBuf>,

    /// Surface structure (PDB).
    #[arg(short, long, value_name = "PATH")]
    pub surface: Option<PathBuf>,

    /// Output path of the merged structure.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Chain identifier forced on the protein.
    #[arg(long, value_name = "CHAR")]
    pub protein_chain: Option<char>,

    /// Chain identifier forced on the surface.
    #[arg(long, value_name = "CHAR")]
    pub surface_chain: Option<char>,

    /// Write the protein before the surface.
    #[arg(long)]
    pub protein_first: bool,

    /// Insert a TER record between the two partners.
    #[arg(long)]
    pub ter: bool,

    /// Keep protein hydrogens and only require the N/CA/C backbone of each residue.
    #[arg(long)]
    pub no_sanitize: bool,

    /// Keep only surface atoms of this residue name [default: CAL].
    #[arg(long, value_name = "NAME")]
    pub surface_residue: Option<String>,

    /// Keep every surface atom instead of filtering by residue name.
    #[arg(long, conflicts_with = "surface_residue")]
    pub keep_all_surface: bool,

    /// First atom serial number.
    #[arg(long, default_value_t = 1, value_name = "INT")]
    pub serial_start: usize,
}

/// Arguments for the `surface-vectors` subcommand.
#[derive(Args, Debug)]
pub struct SurfaceVectorsArgs {
    /// Slab structure (PDB).
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output path; defaults to the input path with a `.surf` extension.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Shortest in-plane distance considered, in Angstroms.
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT")]
    pub min_distance: f64,

    /// Longest in-plane distance considered, in Angstroms.
    #[arg(long, default_value_t = 10.0, value_name = "FLOAT")]
    pub max_distance: f64,

    /// Width of the distance bins, in Angstroms.
    #[arg(long, default_value_t = 0.1, value_name = "FLOAT")]
    pub bin_width: f64,
}

/// Arguments for the `extract-domain` subcommand.
#[derive(Args, Debug)]
pub struct ExtractDomainArgs {
    /// Full protein structure (PDB).
    #[arg(required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Full protein sequence (FASTA).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub fasta: PathBuf,

    /// Chain to cut the domain from.
    #[arg(long, default_value_t = 'A', value_name = "CHAR")]
    pub chain: char,

    /// First residue of the domain.
    #[arg(long, default_value_t = 1, value_name = "INT")]
    pub start: usize,

    /// Last residue of the domain (inclusive).
    #[arg(long, default_value_t = 80, value_name = "INT")]
    pub end: usize,

    /// Directory receiving `<NAME>.fasta` and `<NAME>.pdb`.
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    pub output_dir: PathBuf,

    /// Base name of the written files; defaults to the PDB file stem.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_accepts_positional_nstruct() {
        let cli = Cli::try_parse_from(["surfdock", "dock", "ubq", "calcite", "25", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Dock(args) => {
                assert_eq!(args.protein, "ubq");
                assert_eq!(args.surface, "calcite");
                assert_eq!(args.nstruct, Some(25));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn extra_flags_may_start_with_a_dash() {
        let cli = Cli::try_parse_from(["surfdock", "dock", "ubq", "calcite", "-x", "-mute all", "-x", "-ex1"]).unwrap();
        let Commands::Dock(args) = cli.command else {
            panic!("expected dock");
        };
        assert_eq!(args.extra_flags, vec!["-mute all", "-ex1"]);
    }

    #[test]
    fn usage_errors_exit_with_one_and_help_with_zero() {
        let missing = Cli::try_parse_from(["surfdock", "dock", "ubq"]).unwrap_err();
        assert_eq!(parse_exit_code(&missing), 1);

        let unknown = Cli::try_parse_from(["surfdock", "dock", "ubq", "calcite", "--bogus"]).unwrap_err();
        assert_eq!(parse_exit_code(&unknown), 1);

        let help = Cli::try_parse_from(["surfdock", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&help), 0);

        let version = Cli::try_parse_from(["surfdock", "--version"]).unwrap_err();
        assert_eq!(parse_exit_code(&version), 0);
    }

    #[test]
    fn merge_keep_all_surface_conflicts_with_residue_name() {
        assert!(
            Cli::try_parse_from([
                "surfdock", "merge", "-s", "cal.pdb", "-o", "out.pdb", "--keep-all-surface",
                "--surface-residue", "CAL",
            ])
            .is_err()
        );
    }

    #[test]
    fn merge_requires_a_partner() {
        assert!(Cli::try_parse_from(["surfdock", "merge", "-o", "out.pdb"]).is_err());
        assert!(Cli::try_parse_from(["surfdock", "merge", "-s", "cal.pdb", "-o", "out.pdb"]).is_ok());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["surfdock", "summarize", "score.sc", "-vv", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["surfdock", "-q", "-v", "summarize", "score.sc"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
