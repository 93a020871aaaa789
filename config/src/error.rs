//! Error types for configuration parsing and finalization

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("line {line} too long")]
    LineTooLong { line: usize },

    #[error("missing ']' in section name at line {line}")]
    MissingBracket { line: usize },

    #[error("trailing characters {trailing:?} after section name {section} at line {line}")]
    TrailingCharacters {
        line: usize,
        trailing: String,
        section: String,
    },

    #[error("unknown option at line {line}: {name}")]
    UnknownOption { line: usize, name: String },

    #[error("option {name} outside of [options] section, at line {line}")]
    OutsideOptions { line: usize, name: String },

    #[error("invalid signature level {0}")]
    InvalidSigLevel(String),

    #[error("invalid value at line {line}: {source}")]
    InvalidValue {
        line: usize,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("invalid SigLevel for repo {repo:?}: {source}")]
    RepoSigLevel {
        repo: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Include directive without a path at line {line}")]
    MissingInclude { line: usize },

    #[error("error while processing Include directive at line {line}: {path}: {source}")]
    Include {
        line: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Include directive at line {line} exceeds the maximum nesting depth of {depth}")]
    IncludeDepth { line: usize, depth: usize },

    #[error("architecture is 'auto' but it could not be detected: {0}")]
    Architecture(#[source] std::io::Error),

    #[error("package engine error: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
