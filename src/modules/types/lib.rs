//! Type definitions for cgen
//!
//! This crate contains the closed vocabularies shared across the cgen codebase:
//! target shells, completion kinds and flag/value separator modes.

pub mod completion;
pub mod separator;
pub mod shell;

pub use completion::CompletionKind;
pub use separator::{LongSeparator, ShortSeparator};
pub use shell::Shell;
