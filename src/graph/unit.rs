// src/graph/unit.rs

//! Nodes of the composition graph.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::callable::Callable;
use crate::tree::label::{ANONYMOUS_LABEL, PARALLEL_LABEL, SERIES_LABEL};

/// What a unit stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// One directly invokable work item.
    Leaf,
    /// Children run strictly in order.
    Series,
    /// Children run concurrently.
    Parallel,
}

impl UnitKind {
    pub fn is_composite(self) -> bool {
        !matches!(self, UnitKind::Leaf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Leaf => "leaf",
            UnitKind::Series => "series",
            UnitKind::Parallel => "parallel",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child reference inside a composite.
#[derive(Debug, Clone)]
pub enum UnitRef {
    /// Looked up in the registry when the tree is rendered.
    Name(String),
    /// Bound when the composite was built; never rebound.
    Direct(Unit),
}

/// Identity key for a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

/// Shared handle to one node of the composition graph.
///
/// Cloning is cheap and preserves identity: the registry, parent composites
/// and callers all hold the same node. Equality is identity.
#[derive(Clone)]
pub struct Unit {
    inner: Rc<UnitInner>,
}

struct UnitInner {
    kind: UnitKind,
    callable: Option<Callable>,
    /// Written at the first binding event, never afterwards.
    canonical_label: OnceCell<String>,
    children: Vec<UnitRef>,
    description: RefCell<Option<String>>,
    flag: RefCell<Option<IndexMap<String, String>>>,
}

impl Unit {
    pub(crate) fn leaf(callable: Callable, label: String) -> Self {
        let unit = Self::build(UnitKind::Leaf, Some(callable), Vec::new());
        unit.bind_label(&label);
        unit
    }

    /// Composites start unbound; their first registration names them.
    pub(crate) fn composite(kind: UnitKind, children: Vec<UnitRef>) -> Self {
        debug_assert!(kind.is_composite());
        Self::build(kind, None, children)
    }

    fn build(kind: UnitKind, callable: Option<Callable>, children: Vec<UnitRef>) -> Self {
        Self {
            inner: Rc::new(UnitInner {
                kind,
                callable,
                canonical_label: OnceCell::new(),
                children,
                description: RefCell::new(None),
                flag: RefCell::new(None),
            }),
        }
    }

    pub fn id(&self) -> UnitId {
        UnitId(Rc::as_ptr(&self.inner) as usize)
    }

    pub fn ptr_eq(&self, other: &Unit) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn kind(&self) -> UnitKind {
        self.inner.kind
    }

    pub fn is_composite(&self) -> bool {
        self.inner.kind.is_composite()
    }

    /// The wrapped work function (leaves only).
    pub fn callable(&self) -> Option<&Callable> {
        self.inner.callable.as_ref()
    }

    pub fn children(&self) -> &[UnitRef] {
        &self.inner.children
    }

    /// The stable label shown wherever this unit is not a registry root.
    ///
    /// Composites that were never registered report `<series>` or
    /// `<parallel>` without binding it.
    pub fn canonical_label(&self) -> &str {
        match self.inner.canonical_label.get() {
            Some(label) => label.as_str(),
            None => match self.inner.kind {
                UnitKind::Series => SERIES_LABEL,
                UnitKind::Parallel => PARALLEL_LABEL,
                UnitKind::Leaf => ANONYMOUS_LABEL,
            },
        }
    }

    pub fn is_bound(&self) -> bool {
        self.inner.canonical_label.get().is_some()
    }

    /// Bind the canonical label if it is still unset.
    ///
    /// Returns `true` if this call did the binding.
    pub(crate) fn bind_label(&self, label: &str) -> bool {
        self.inner.canonical_label.set(label.to_string()).is_ok()
    }

    pub fn description(&self) -> Option<String> {
        self.inner.description.borrow().clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        *self.inner.description.borrow_mut() = Some(description.into());
    }

    pub fn clear_description(&self) {
        self.inner.description.borrow_mut().take();
    }

    pub fn flag(&self) -> Option<IndexMap<String, String>> {
        self.inner.flag.borrow().clone()
    }

    /// Replace the whole flag map.
    pub fn set_flag<I, K, V>(&self, flags: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = flags
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        *self.inner.flag.borrow_mut() = Some(map);
    }

    /// Add (or replace) a single flag entry, keeping insertion order.
    pub fn add_flag(&self, flag: impl Into<String>, description: impl Into<String>) {
        self.inner
            .flag
            .borrow_mut()
            .get_or_insert_with(IndexMap::new)
            .insert(flag.into(), description.into());
    }

    pub fn clear_flag(&self) {
        self.inner.flag.borrow_mut().take();
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Unit {}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("kind", &self.inner.kind)
            .field("label", &self.canonical_label())
            .field("children", &self.inner.children)
            .finish()
    }
}
