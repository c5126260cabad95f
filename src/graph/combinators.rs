// src/graph/combinators.rs

//! `series` / `parallel`.
//!
//! Both build a fresh composite from an ordered list of references. They do
//! not touch the name mapping: callers decide whether (and under which
//! names) the result gets registered. They live on [`Registry`] only because
//! raw callables must be turned into the one leaf that owns them.

use tracing::debug;

use crate::errors::{Result, TaskweaveError};
use crate::graph::callable::Callable;
use crate::graph::registry::{ensure_valid_name, Registry};
use crate::graph::unit::{Unit, UnitKind, UnitRef};

/// A reference passed to a combinator.
#[derive(Debug, Clone)]
pub enum TaskRef {
    /// Resolved against the registry at render time.
    Name(String),
    /// Bound directly.
    Unit(Unit),
    /// Wrapped in (or mapped to) its leaf and bound directly.
    Callable(Callable),
}

impl From<&str> for TaskRef {
    fn from(name: &str) -> Self {
        TaskRef::Name(name.to_string())
    }
}

impl From<String> for TaskRef {
    fn from(name: String) -> Self {
        TaskRef::Name(name)
    }
}

impl From<&String> for TaskRef {
    fn from(name: &String) -> Self {
        TaskRef::Name(name.clone())
    }
}

impl From<Unit> for TaskRef {
    fn from(unit: Unit) -> Self {
        TaskRef::Unit(unit)
    }
}

impl From<&Unit> for TaskRef {
    fn from(unit: &Unit) -> Self {
        TaskRef::Unit(unit.clone())
    }
}

impl From<Callable> for TaskRef {
    fn from(callable: Callable) -> Self {
        TaskRef::Callable(callable)
    }
}

impl From<&Callable> for TaskRef {
    fn from(callable: &Callable) -> Self {
        TaskRef::Callable(callable.clone())
    }
}

impl Registry {
    /// Composite whose children run strictly in order.
    pub fn series<I, R>(&mut self, refs: I) -> Result<Unit>
    where
        I: IntoIterator<Item = R>,
        R: Into<TaskRef>,
    {
        self.compose(UnitKind::Series, refs)
    }

    /// Composite whose children run concurrently.
    pub fn parallel<I, R>(&mut self, refs: I) -> Result<Unit>
    where
        I: IntoIterator<Item = R>,
        R: Into<TaskRef>,
    {
        self.compose(UnitKind::Parallel, refs)
    }

    fn compose<I, R>(&mut self, kind: UnitKind, refs: I) -> Result<Unit>
    where
        I: IntoIterator<Item = R>,
        R: Into<TaskRef>,
    {
        let children = refs
            .into_iter()
            .map(|r| self.to_unit_ref(r.into()))
            .collect::<Result<Vec<_>>>()?;

        if children.is_empty() {
            return Err(TaskweaveError::EmptyComposition(kind.as_str()));
        }

        debug!(kind = %kind, children = children.len(), "built composite");
        Ok(Unit::composite(kind, children))
    }

    fn to_unit_ref(&mut self, r: TaskRef) -> Result<UnitRef> {
        match r {
            TaskRef::Name(name) => {
                ensure_valid_name(&name)?;
                Ok(UnitRef::Name(name))
            }
            TaskRef::Unit(unit) => Ok(UnitRef::Direct(unit)),
            TaskRef::Callable(callable) => Ok(UnitRef::Direct(self.leaf_for(&callable))),
        }
    }
}
