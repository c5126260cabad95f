// src/lib.rs

//! Named tasks, series/parallel composition, and tree views of the result.
//!
//! ```
//! use taskweave::graph::{Callable, Registry};
//! use taskweave::tree::{NodeType, TreeNode, TreeOptions};
//!
//! let mut registry = Registry::new();
//! registry.register("lint", Callable::new(|| Ok(())))?;
//! registry.register("compile", Callable::new(|| Ok(())))?;
//! let build = registry.series(["lint", "compile"])?;
//! registry.register("build", build)?;
//!
//! let tree = registry.render_tree(TreeOptions::deep())?;
//! assert_eq!(
//!     tree[2],
//!     TreeNode::composite("build", NodeType::Series)
//!         .with_nodes(vec![TreeNode::leaf("lint"), TreeNode::leaf("compile")])
//! );
//! # Ok::<(), taskweave::errors::TaskweaveError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, OutputMode};
use crate::config::{default_config_path, load_and_validate, TaskFile};
use crate::tree::{simple_listing, to_text_tree};

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the task file, builds the registry, renders the tree
/// and prints it in the requested format.
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = args
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let file = load_and_validate(&config_path)?;

    let output = render_output(&args, &file, &config_path.display().to_string())?;
    println!("{output}");
    Ok(())
}

/// Produce the text `run` prints for an already-loaded task file.
pub fn render_output(args: &CliArgs, file: &TaskFile, source: &str) -> Result<String> {
    let registry = file.build_registry()?;
    let options = args.tree_options(file.config());
    let mode = args.output_mode();
    debug!(?mode, ?options, "rendering task listing");

    let output = match mode {
        OutputMode::Simple => {
            // Names only, never expanded.
            let nodes = registry.render_tree(Default::default())?;
            simple_listing(&nodes)
        }
        OutputMode::Json => {
            let nodes = registry.render_tree(options)?;
            serde_json::to_string_pretty(&nodes)?
        }
        OutputMode::Tree => {
            let nodes = registry.render_tree(options)?;
            let text = to_text_tree(format!("Tasks for {source}"), &nodes).to_string();
            text.trim_end().to_string()
        }
    };

    Ok(output)
}
