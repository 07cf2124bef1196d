//! # Workflows Module
//!
//! End-to-end procedures built from the engine pieces. Each one validates its inputs first,
//! then writes its outputs, reporting phases through a [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! - **Docking** ([`dock`]) - Prepare a run directory, invoke the docking executable, rank the decoys
//! - **Merge** ([`merge`]) - Sanitize and concatenate protein and surface structures
//! - **Surface vectors** ([`surface`]) - Estimate lattice vectors from a slab structure
//! - **Domain extraction** ([`domain`]) - Cut a residue range out of a larger protein

pub mod dock;
pub mod domain;
pub mod merge;
pub mod surface;
