//! Target shell definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shells a completion script can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// GNU Bash (`complete -F`)
    Bash,
    /// fish (`complete -c`)
    Fish,
    /// Z shell (`_arguments`)
    Zsh,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Fish => write!(f, "fish"),
            Shell::Zsh => write!(f, "zsh"),
        }
    }
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(Shell::Bash),
            "fish" => Ok(Shell::Fish),
            "zsh" => Ok(Shell::Zsh),
            _ => Err(format!(
                "Unknown shell: {} (accepted values are bash, fish and zsh)",
                s
            )),
        }
    }
}

impl Shell {
    /// Returns all supported shells, in generation order
    pub fn all() -> &'static [Shell] {
        &[Shell::Bash, Shell::Fish, Shell::Zsh]
    }

    /// Returns true if the shell parses words with POSIX quoting rules
    pub fn is_posix(&self) -> bool {
        matches!(self, Shell::Bash | Shell::Zsh)
    }

    /// Directory (relative to the output root) completion files are installed into
    pub fn completion_dir(&self) -> &'static str {
        match self {
            Shell::Bash => "share/bash/completions",
            Shell::Fish => "share/fish/completions",
            Shell::Zsh => "share/zsh/completions",
        }
    }

    /// File name of the completion script for a tool
    pub fn file_name(&self, tool: &str) -> String {
        match self {
            Shell::Bash => format!("{}.bash", tool),
            Shell::Fish => format!("{}.fish", tool),
            Shell::Zsh => format!("_{}", tool),
        }
    }
}
