//! # Engine Module
//!
//! The preparation logic that sits between the file formats in [`crate::core`] and the
//! end-to-end procedures in [`crate::workflows`].
//!
//! - **Configuration** ([`config`]) - Run parameters and their builder
//! - **Installation** ([`install`]) - Locating the docking executable and its database
//! - **Layout** ([`layout`]) - Where inputs are looked up and outputs are written
//! - **Sanitization** ([`sanitize`]) - Cleaning and merging protein and surface structures
//! - **Synthesis** ([`fragments`], [`flags`]) - Placeholder fragment libraries and the flags file
//! - **Invocation** ([`runner`]) - Spawning the executable and teeing its output
//! - **Reporting** ([`summary`], [`progress`]) - Ranking decoys and reporting progress
//! - **Errors** ([`error`])

pub mod config;
pub mod error;
pub mod flags;
pub mod fragments;
pub mod install;
pub mod layout;
pub mod progress;
pub mod runner;
pub mod sanitize;
pub mod summary;
