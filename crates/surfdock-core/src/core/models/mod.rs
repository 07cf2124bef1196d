//! In-memory models of the files exchanged with the docking executable.

pub mod atom;
pub mod flags;
pub mod fragment;
pub mod score;
pub mod sequence;
pub mod structure;
pub mod surface;
