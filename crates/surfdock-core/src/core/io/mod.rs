//! Readers and writers for the flat text files exchanged with the docking executable.
//!
//! Every format is owned by the external binary; the implementations here only reproduce
//! the layouts it expects. Formats that are both read and written implement [`traits::TextFile`].

pub mod fasta;
pub mod flags;
pub mod fragments;
pub mod pdb;
pub mod scorefile;
pub mod surface;
pub mod traits;
