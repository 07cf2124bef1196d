//! # SURFDOCK Core Library
//!
//! Input preparation, invocation and result summary for protein-on-surface docking runs
//! performed by Rosetta's external `surface_docking` executable.
//!
//! ## Architectural Philosophy
//!
//! The docking search itself lives in the external binary. This library owns everything
//! around it and is split into three layers:
//!
//! - **[`core`]: The Foundation.** Plain data models (`Structure`, `Sequence`,
//!   `SurfaceVectors`, `FragmentLibrary`, `FlagsFile`, `ScoreTable`), the text formats the
//!   binary reads and writes, and small geometric routines.
//!
//! - **[`engine`]: The Preparation Logic.** Configuration, installation discovery, structure
//!   sanitization, fragment and flags synthesis, the process runner and score ranking.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (`dock`, `merge`, `surface`,
//!   `domain`) that tie `engine` and `core` together and report progress to the caller.

pub mod core;
pub mod engine;
pub mod workflows;
