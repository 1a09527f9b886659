//! Flag/value separator modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a long flag (`--name`) is joined to its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongSeparator {
    /// `--name value`
    #[default]
    Space,
    /// `--name=value`
    Equal,
    /// Either form
    Both,
}

/// How a short flag (`-n`) is joined to its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortSeparator {
    /// `-n value`
    #[default]
    Space,
    /// `-nvalue`
    Attached,
    /// Either form
    Both,
}

impl fmt::Display for LongSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongSeparator::Space => write!(f, "space"),
            LongSeparator::Equal => write!(f, "equal"),
            LongSeparator::Both => write!(f, "both"),
        }
    }
}

impl FromStr for LongSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(LongSeparator::Space),
            "equal" => Ok(LongSeparator::Equal),
            "both" => Ok(LongSeparator::Both),
            _ => Err(format!("Unknown long value separator: {}", s)),
        }
    }
}

impl LongSeparator {
    /// Accepted spellings, for error messages
    pub fn accepted() -> &'static str {
        "space, equal, both"
    }

    /// The value may follow as the next word
    pub fn takes_separate_word(&self) -> bool {
        matches!(self, LongSeparator::Space | LongSeparator::Both)
    }

    /// The value may be joined with `=`
    pub fn takes_equal(&self) -> bool {
        matches!(self, LongSeparator::Equal | LongSeparator::Both)
    }
}

impl fmt::Display for ShortSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortSeparator::Space => write!(f, "space"),
            ShortSeparator::Attached => write!(f, "attached"),
            ShortSeparator::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ShortSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(ShortSeparator::Space),
            "attached" => Ok(ShortSeparator::Attached),
            "both" => Ok(ShortSeparator::Both),
            _ => Err(format!("Unknown short value separator: {}", s)),
        }
    }
}

impl ShortSeparator {
    /// Accepted spellings, for error messages
    pub fn accepted() -> &'static str {
        "space, attached, both"
    }

    /// The value may follow as the next word
    pub fn takes_separate_word(&self) -> bool {
        matches!(self, ShortSeparator::Space | ShortSeparator::Both)
    }

    /// The value may be glued to the flag
    pub fn takes_attached(&self) -> bool {
        matches!(self, ShortSeparator::Attached | ShortSeparator::Both)
    }
}
