// src/tree/render.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{Result, TaskweaveError};
use crate::graph::{Registry, Unit, UnitId, UnitKind, UnitRef};
use crate::tree::label::resolve_label;

/// How far to expand the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TreeOptions {
    /// Expand composites at all. Off by default: roots only.
    #[serde(default)]
    pub deep: bool,

    /// Maximum nesting level shown, roots being level 1. `None` is unbounded.
    #[serde(default)]
    pub depth: Option<usize>,
}

impl TreeOptions {
    /// Unbounded deep rendering.
    pub fn deep() -> Self {
        Self {
            deep: true,
            depth: None,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Whether a composite at `level` gets its children rendered.
    fn expands(&self, level: usize) -> bool {
        self.deep && self.depth.is_none_or(|max| level < max)
    }
}

/// Composite type as shown in a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Series,
    Parallel,
}

impl NodeType {
    fn from_kind(kind: UnitKind) -> Option<Self> {
        match kind {
            UnitKind::Leaf => None,
            UnitKind::Series => Some(NodeType::Series),
            UnitKind::Parallel => Some(NodeType::Parallel),
        }
    }
}

/// One unit at one tree position. Absent fields are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<IndexMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A node with only a label.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            node_type: None,
            description: None,
            flag: None,
            nodes: None,
        }
    }

    /// An unexpanded composite node.
    pub fn composite(label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            node_type: Some(node_type),
            ..Self::leaf(label)
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<TreeNode>) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_flag<I, K, V>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.flag = Some(
            flags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

/// Walks the registry and builds a depth-bounded tree of [`TreeNode`]s.
///
/// Every call re-walks the graph. Name refs are resolved at the moment their
/// parent is expanded, so forward references only have to exist by then.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer<'a> {
    registry: &'a Registry,
    options: TreeOptions,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(registry: &'a Registry, options: TreeOptions) -> Self {
        Self { registry, options }
    }

    /// One node per registry root, in registration order.
    pub fn render(&self) -> Result<Vec<TreeNode>> {
        debug!(
            roots = self.registry.len(),
            deep = self.options.deep,
            depth = ?self.options.depth,
            "rendering task tree"
        );

        self.registry
            .iter()
            .map(|(name, unit)| self.render_unit(unit, Some(name)))
            .collect()
    }

    /// Render a single subtree rooted at `unit`.
    ///
    /// `context_name` is the registry name the unit is shown under, if any.
    pub fn render_unit(&self, unit: &Unit, context_name: Option<&str>) -> Result<TreeNode> {
        let mut path = Vec::new();
        self.render_node(unit, context_name, 1, &mut path)
    }

    fn render_node(
        &self,
        unit: &Unit,
        context_name: Option<&str>,
        level: usize,
        path: &mut Vec<(UnitId, String)>,
    ) -> Result<TreeNode> {
        let label = resolve_label(unit, context_name);

        if path.iter().any(|(id, _)| *id == unit.id()) {
            let chain = path
                .iter()
                .map(|(_, l)| l.as_str())
                .chain(std::iter::once(label.as_str()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(TaskweaveError::CyclicComposition(chain));
        }

        trace!(label = %label, level, kind = %unit.kind(), "rendering node");

        let mut node = TreeNode {
            label,
            node_type: NodeType::from_kind(unit.kind()),
            description: unit.description(),
            flag: unit.flag(),
            nodes: None,
        };

        if unit.is_composite() && self.options.expands(level) {
            path.push((unit.id(), node.label.clone()));

            let mut nodes = Vec::with_capacity(unit.children().len());
            for child in unit.children() {
                let child_unit = self.resolve_child(child, &node.label)?;
                nodes.push(self.render_node(&child_unit, None, level + 1, path)?);
            }

            path.pop();
            node.nodes = Some(nodes);
        }

        Ok(node)
    }

    fn resolve_child(&self, child: &UnitRef, parent: &str) -> Result<Unit> {
        match child {
            UnitRef::Direct(unit) => Ok(unit.clone()),
            UnitRef::Name(name) => self.registry.lookup(name).cloned().ok_or_else(|| {
                TaskweaveError::UnresolvedReference {
                    name: name.clone(),
                    parent: parent.to_string(),
                }
            }),
        }
    }
}
