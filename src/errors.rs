// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskweaveError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid task reference: {0}")]
    InvalidReference(String),

    #[error("One or more tasks should be combined using {0}")]
    EmptyComposition(&'static str),

    #[error("Task name must be specified (callable has no name or display name)")]
    MissingName,

    #[error("Task never defined: '{name}' (referenced from '{parent}')")]
    UnresolvedReference { name: String, parent: String },

    #[error("Cyclic task composition: {0}")]
    CyclicComposition(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cycle detected in task file: {0}")]
    DagCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskweaveError>;
