// src/tree/display.rs

//! Terminal formatting of rendered trees (via `termtree`).

use termtree::Tree;

use crate::tree::render::TreeNode;

/// Build a printable tree with `title` as its root line.
///
/// Each task line is its label, followed by its description if set. Flags are
/// listed as extra lines directly under the task they document, before the
/// task's children.
pub fn to_text_tree(title: impl Into<String>, nodes: &[TreeNode]) -> Tree<String> {
    Tree::new(title.into()).with_leaves(nodes.iter().map(node_to_tree))
}

fn node_to_tree(node: &TreeNode) -> Tree<String> {
    let line = match &node.description {
        Some(description) => format!("{}  {}", node.label, description),
        None => node.label.clone(),
    };
    let mut tree = Tree::new(line);

    if let Some(flags) = &node.flag {
        for (flag, description) in flags {
            tree.push(Tree::new(format!("{flag}  {description}")));
        }
    }

    if let Some(children) = &node.nodes {
        for child in children {
            tree.push(node_to_tree(child));
        }
    }

    tree
}

/// Root labels, one per line (for `--tasks-simple`).
pub fn simple_listing(nodes: &[TreeNode]) -> String {
    nodes
        .iter()
        .map(|n| n.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
