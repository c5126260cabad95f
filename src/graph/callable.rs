// src/graph/callable.rs

//! Opaque work functions.
//!
//! A [`Callable`] is what build tooling hands to the registry: a closure plus
//! whatever naming information it carries. The composition graph only cares
//! about two things:
//! - identity (two clones of the same `Callable` are the same work item)
//! - naming (intrinsic name and an optional display-name override)
//!
//! Invoking the work is the executor's business; see [`crate::exec`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Work = dyn Fn() -> anyhow::Result<()>;

/// Identity key for a [`Callable`], stable for as long as any clone lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallableId(usize);

/// A shared, cheaply clonable handle to one piece of work.
#[derive(Clone)]
pub struct Callable {
    inner: Rc<CallableInner>,
}

struct CallableInner {
    /// The callable's own declared identifier, if it has one.
    name: Option<String>,
    /// Override label set by the caller before the callable is first wrapped.
    display_name: RefCell<Option<String>>,
    work: Box<Work>,
}

impl Callable {
    /// An anonymous callable.
    pub fn new<F>(work: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self::build(None, work)
    }

    /// A callable with an intrinsic name.
    pub fn named<F>(name: impl Into<String>, work: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self::build(Some(name.into()), work)
    }

    fn build<F>(name: Option<String>, work: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        Self {
            inner: Rc::new(CallableInner {
                name,
                display_name: RefCell::new(None),
                work: Box::new(work),
            }),
        }
    }

    pub fn id(&self) -> CallableId {
        CallableId(Rc::as_ptr(&self.inner) as usize)
    }

    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Intrinsic name; empty names count as absent.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn display_name(&self) -> Option<String> {
        self.inner
            .display_name
            .borrow()
            .as_ref()
            .filter(|n| !n.is_empty())
            .cloned()
    }

    /// Set the override label.
    ///
    /// Only honoured if set before the callable is first registered or used
    /// in a combinator; after that the owning unit's label is fixed.
    pub fn set_display_name(&self, label: impl Into<String>) {
        *self.inner.display_name.borrow_mut() = Some(label.into());
    }

    /// Builder-style variant of [`Callable::set_display_name`].
    pub fn with_display_name(self, label: impl Into<String>) -> Self {
        self.set_display_name(label);
        self
    }

    /// Override label first, then intrinsic name.
    pub fn own_label(&self) -> Option<String> {
        self.display_name()
            .or_else(|| self.name().map(str::to_string))
    }

    /// Run the work function.
    pub fn call(&self) -> anyhow::Result<()> {
        (self.inner.work)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.inner.name)
            .field("display_name", &self.inner.display_name.borrow())
            .finish_non_exhaustive()
    }
}
