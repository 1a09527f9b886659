//! Completion script synthesis for cgen
//!
//! Each backend walks the same definition tree and renders a standalone
//! script for its shell. Rendering never touches the file system; the
//! [`output`] module writes whatever the registered generators produce.

pub mod bash;
pub mod collect;
pub mod emitter;
pub mod escape;
pub mod fish;
pub mod man;
pub mod output;
pub mod registry;
pub mod zsh;

pub use emitter::Emitter;
pub use escape::{quote, quote_list};
pub use output::write_all;
pub use registry::{
    create_generator, CompletionGenerator, Generator, GeneratorRegistry, ManPageGenerator,
    RenderedFile,
};
