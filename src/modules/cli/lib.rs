//! cgen CLI
//!
//! This crate provides the command-line interface for cgen including:
//! - generate: Write completion scripts and man pages
//! - check: Validate a description file
//! - sample: Print a sample description

pub mod commands;

pub use commands::{Cli, Commands};
