//! Completion kind definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an argument suggests when its value is being completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// No suggestions
    #[default]
    None,
    /// A fixed list of literal values
    Static,
    /// File system paths
    File,
    /// Directories only
    Folder,
    /// Candidates printed by a per-shell function body
    Function,
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionKind::None => write!(f, "none"),
            CompletionKind::Static => write!(f, "static"),
            CompletionKind::File => write!(f, "file"),
            CompletionKind::Folder => write!(f, "folder"),
            CompletionKind::Function => write!(f, "function"),
        }
    }
}

impl FromStr for CompletionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CompletionKind::None),
            "static" => Ok(CompletionKind::Static),
            "file" => Ok(CompletionKind::File),
            "folder" => Ok(CompletionKind::Folder),
            "function" => Ok(CompletionKind::Function),
            _ => Err(format!("Unknown completion type: {}", s)),
        }
    }
}

impl CompletionKind {
    /// Returns all completion kinds
    pub fn all() -> &'static [CompletionKind] {
        &[
            CompletionKind::None,
            CompletionKind::Static,
            CompletionKind::File,
            CompletionKind::Folder,
            CompletionKind::Function,
        ]
    }

    /// Accepted spellings, for error messages
    pub fn accepted() -> &'static str {
        "none, static, file, folder, function"
    }

    /// Returns true if completion comes from the file system
    pub fn is_path(&self) -> bool {
        matches!(self, CompletionKind::File | CompletionKind::Folder)
    }

    /// Returns true if this kind produces a word list
    pub fn is_word_list(&self) -> bool {
        matches!(self, CompletionKind::Static | CompletionKind::Function)
    }
}
