// src/graph/registry.rs

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{Result, TaskweaveError};
use crate::graph::callable::{Callable, CallableId};
use crate::graph::unit::Unit;
use crate::tree::label::derive_label;
use crate::tree::{TreeNode, TreeOptions, TreeRenderer};

/// What can be registered under a name.
#[derive(Debug, Clone)]
pub enum TaskTarget {
    /// A raw work function; wrapped in a leaf on first sighting.
    Callable(Callable),
    /// An existing unit (from a combinator or a previous `get`).
    Unit(Unit),
}

impl From<Callable> for TaskTarget {
    fn from(c: Callable) -> Self {
        TaskTarget::Callable(c)
    }
}

impl From<&Callable> for TaskTarget {
    fn from(c: &Callable) -> Self {
        TaskTarget::Callable(c.clone())
    }
}

impl From<Unit> for TaskTarget {
    fn from(u: Unit) -> Self {
        TaskTarget::Unit(u)
    }
}

impl From<&Unit> for TaskTarget {
    fn from(u: &Unit) -> Self {
        TaskTarget::Unit(u.clone())
    }
}

/// Named entry point to the composition graph.
///
/// Names keep their first registration position; re-registering a name swaps
/// the unit in place. The registry also owns the side map from callable
/// identity to the leaf that wraps it, so a callable gets exactly one leaf no
/// matter how often it is registered or composed.
#[derive(Debug, Default)]
pub struct Registry {
    tasks: IndexMap<String, Unit>,
    leaves: HashMap<CallableId, Unit>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `target` and return the bound unit.
    ///
    /// - An unseen callable becomes a new leaf labelled `name`.
    /// - A known callable or an existing unit is aliased: the mapping is
    ///   created but the unit's canonical label is left alone. A composite
    ///   that was never registered before takes `name` as its label.
    /// - An existing `name` is silently rebound.
    pub fn register(&mut self, name: impl Into<String>, target: impl Into<TaskTarget>) -> Result<Unit> {
        let name = name.into();
        ensure_valid_name(&name)?;

        let unit = match target.into() {
            TaskTarget::Callable(callable) => match self.leaves.get(&callable.id()) {
                Some(existing) => {
                    debug!(
                        task = %name,
                        canonical = %existing.canonical_label(),
                        "registering known callable as alias"
                    );
                    existing.clone()
                }
                None => {
                    let unit = Unit::leaf(callable.clone(), name.clone());
                    self.leaves.insert(callable.id(), unit.clone());
                    debug!(task = %name, "registered new leaf task");
                    unit
                }
            },
            TaskTarget::Unit(unit) => {
                if unit.bind_label(&name) {
                    debug!(task = %name, kind = %unit.kind(), "bound composite to its first name");
                } else {
                    debug!(
                        task = %name,
                        canonical = %unit.canonical_label(),
                        "registering existing unit as alias"
                    );
                }
                if let Some(callable) = unit.callable() {
                    self.leaves
                        .entry(callable.id())
                        .or_insert_with(|| unit.clone());
                }
                unit
            }
        };

        if let Some(previous) = self.tasks.insert(name.clone(), unit.clone()) {
            if !previous.ptr_eq(&unit) {
                debug!(task = %name, "task name rebound to a different unit");
            }
        }

        Ok(unit)
    }

    /// Register a callable under its own label (override, then intrinsic name).
    pub fn register_callable(&mut self, callable: &Callable) -> Result<Unit> {
        let name = callable.own_label().ok_or(TaskweaveError::MissingName)?;
        self.register(name, callable)
    }

    pub fn get(&self, name: &str) -> Result<Unit> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| TaskweaveError::NotFound(name.to_string()))
    }

    /// Non-failing lookup.
    pub fn lookup(&self, name: &str) -> Option<&Unit> {
        self.tasks.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered names in first-registration order.
    pub fn root_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.tasks.iter().map(|(name, unit)| (name.as_str(), unit))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Render the registry roots as a tree; see [`TreeRenderer`].
    pub fn render_tree(&self, options: TreeOptions) -> Result<Vec<TreeNode>> {
        TreeRenderer::new(self, options).render()
    }

    /// The leaf owning `callable`, created with a derived label on first use.
    pub(crate) fn leaf_for(&mut self, callable: &Callable) -> Unit {
        self.leaves
            .entry(callable.id())
            .or_insert_with(|| {
                let label = derive_label(None, callable);
                debug!(label = %label, "wrapped unregistered callable in a leaf");
                Unit::leaf(callable.clone(), label)
            })
            .clone()
    }
}

pub(crate) fn ensure_valid_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TaskweaveError::InvalidReference(
            "task names must not be empty".to_string(),
        ));
    }
    Ok(())
}
