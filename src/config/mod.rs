// src/config/mod.rs

//! Task file loading and validation for taskweave.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a task file from disk (`loader.rs`).
//! - Validate references and acyclicity (`validate.rs`).
//! - Register the tasks into a [`crate::graph::Registry`] (`build.rs`).

pub mod build;
pub mod loader;
pub mod model;
pub mod validate;

pub use build::shell_callable;
pub use loader::{
    default_config_path, load_and_validate, load_from_path, parse_and_validate, parse_raw,
    DEFAULT_TASK_FILE,
};
pub use model::{ChildSpec, ConfigSection, InlineTask, RawTaskFile, TaskBody, TaskConfig, TaskFile};
