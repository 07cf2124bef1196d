//! # Core Module
//!
//! Data models and file formats shared by every preparation step.
//!
//! - **Models** ([`models`]) - Atoms, structures, sequences, surface vectors
//! - **File I/O** ([`io`]) - PDB, FASTA, surface-vector, fragment, flags and score files
//! - **Geometry** ([`geometry`]) - Plane fitting and lattice-vector extraction for slabs

pub mod geometry;
pub mod io;
pub mod models;
