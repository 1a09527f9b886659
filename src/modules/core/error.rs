//! Error types for cgen

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cgen operations
#[derive(Error, Debug)]
pub enum CgenError {
    /// Description file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Description is well-formed but structurally unusable
    #[error("Validation error: {0}")]
    Validation(String),

    /// An enumerated field holds a value outside its set
    #[error("Invalid value '{value}' for '{field}': accepted values are {accepted}")]
    InvalidValue {
        field: String,
        value: String,
        accepted: &'static str,
    },

    /// A string cannot be embedded into shell source
    #[error("Escape error: {0}")]
    Escape(String),

    /// A backend failed to render its output
    #[error("{target}: {source}")]
    Generate {
        target: String,
        #[source]
        source: Box<CgenError>,
    },

    /// Writing one output file failed
    #[error("{target}: failed to write {}: {source}", .path.display())]
    Write {
        target: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Several outputs failed; every failure is reported
    #[error("{} output(s) failed:\n{}", .0.len(), format_failures(.0))]
    Output(Vec<CgenError>),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_failures(failures: &[CgenError]) -> String {
    failures
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl CgenError {
    /// Build an `InvalidValue` error for a field path
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        accepted: &'static str,
    ) -> Self {
        CgenError::InvalidValue {
            field: field.into(),
            value: value.into(),
            accepted,
        }
    }

    /// Attribute a rendering failure to a backend
    pub fn generate(target: impl Into<String>, source: CgenError) -> Self {
        CgenError::Generate {
            target: target.into(),
            source: Box::new(source),
        }
    }

    /// Returns true if the input description is at fault
    pub fn is_config_error(&self) -> bool {
        match self {
            CgenError::Config(_)
            | CgenError::Validation(_)
            | CgenError::InvalidValue { .. }
            | CgenError::Escape(_)
            | CgenError::Yaml(_) => true,
            CgenError::Generate { source, .. } => source.is_config_error(),
            _ => false,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }
}

/// Result type alias using CgenError
pub type Result<T> = std::result::Result<T, CgenError>;
