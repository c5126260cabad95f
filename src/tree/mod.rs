// src/tree/mod.rs

//! Tree views of the composition graph.
//!
//! - [`label`] decides which name is shown at each position.
//! - [`render`] walks registry roots into serializable [`TreeNode`]s.
//! - [`display`] turns rendered nodes into terminal output.

pub mod display;
pub mod label;
pub mod render;

pub use display::{simple_listing, to_text_tree};
pub use label::{derive_label, resolve_label, ANONYMOUS_LABEL, PARALLEL_LABEL, SERIES_LABEL};
pub use render::{NodeType, TreeNode, TreeOptions, TreeRenderer};
