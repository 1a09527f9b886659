//! Core domain logic for cgen
//!
//! This crate contains the definition model (tool, commands, arguments,
//! completions) and the error types shared by the loader, the generators
//! and the command-line front end.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{CgenError, Result};
