//! Definition model: the tool description shared by every generator

mod argument;
mod cli;
mod command;
mod completion;

pub use argument::Argument;
pub use cli::Cli;
pub use command::Command;
pub use completion::Completion;
