//! Layered configuration: built-in defaults, then the TOML file (with `-S` overrides), then
//! environment variables and command-line flags.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{build_dock_config, build_summary_config, surface_residue_filter};
pub use file::FileConfig;
