//! How an argument's values are completed

use cgen_types::{CompletionKind, Shell};
use serde::Serialize;

/// Suggestion behavior attached to an argument
///
/// Which fields matter is decided by `kind`: `values` is only read for
/// [`CompletionKind::Static`], the per-shell bodies only for
/// [`CompletionKind::Function`]. Bodies are shell source and are emitted
/// verbatim; they are expected to print one candidate per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Completion {
    /// Kind of completion
    #[serde(rename = "type")]
    pub kind: CompletionKind,

    /// Literal values offered for static completion
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Bash source printing candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bash: Option<String>,

    /// Fish source printing candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fish: Option<String>,

    /// Zsh source printing candidates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zsh: Option<String>,
}

impl Default for Completion {
    fn default() -> Self {
        Self::none()
    }
}

impl Completion {
    /// Consumes a value but suggests nothing
    pub fn none() -> Self {
        Self {
            kind: CompletionKind::None,
            values: Vec::new(),
            bash: None,
            fish: None,
            zsh: None,
        }
    }

    /// Suggest a fixed list of values
    pub fn static_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: CompletionKind::Static,
            values: values.into_iter().map(Into::into).collect(),
            ..Self::none()
        }
    }

    /// Suggest file paths
    pub fn file() -> Self {
        Self {
            kind: CompletionKind::File,
            ..Self::none()
        }
    }

    /// Suggest directories
    pub fn folder() -> Self {
        Self {
            kind: CompletionKind::Folder,
            ..Self::none()
        }
    }

    /// Suggest whatever the per-shell bodies print
    pub fn function() -> Self {
        Self {
            kind: CompletionKind::Function,
            ..Self::none()
        }
    }

    /// Set the body used for one shell
    pub fn with_body(mut self, shell: Shell, body: impl Into<String>) -> Self {
        let body = Some(body.into());
        match shell {
            Shell::Bash => self.bash = body,
            Shell::Fish => self.fish = body,
            Shell::Zsh => self.zsh = body,
        }
        self
    }

    /// Set the same body for every shell
    pub fn with_body_for_all(self, body: impl Into<String>) -> Self {
        let body = body.into();
        Shell::all()
            .iter()
            .fold(self, |completion, shell| completion.with_body(*shell, body.clone()))
    }

    /// Function body for a shell, if this is a function completion that defines one
    pub fn body(&self, shell: Shell) -> Option<&str> {
        if self.kind != CompletionKind::Function {
            return None;
        }
        let body = match shell {
            Shell::Bash => self.bash.as_deref(),
            Shell::Fish => self.fish.as_deref(),
            Shell::Zsh => self.zsh.as_deref(),
        };
        body.filter(|b| !b.trim().is_empty())
    }

    /// Static values, empty unless this is a static completion
    pub fn static_list(&self) -> &[String] {
        if self.kind == CompletionKind::Static {
            &self.values
        } else {
            &[]
        }
    }
}
