// src/exec/mod.rs

//! Executor contract.
//!
//! Running tasks is not this crate's job, but the composite structure it
//! builds has to be consumable by whatever does run them. The contract:
//!
//! - [`UnitKind::Leaf`]: invoke the callable.
//! - [`UnitKind::Series`]: invoke children strictly in order, stop on the
//!   first failure.
//! - [`UnitKind::Parallel`]: invoke all children concurrently, aggregate
//!   failures.
//!
//! [`resolve_children`] does the registry lookups an implementation needs.

use crate::errors::{Result, TaskweaveError};
use crate::graph::{Registry, Unit, UnitKind, UnitRef};

/// Something that can run a unit of the composition graph.
pub trait Executor {
    fn execute(&mut self, unit: &Unit, registry: &Registry) -> Result<()>;

    /// Look `name` up and execute it.
    fn execute_named(&mut self, name: &str, registry: &Registry) -> Result<()> {
        let unit = registry.get(name)?;
        self.execute(&unit, registry)
    }
}

/// Children of `unit` as units, resolving name refs against `registry`.
///
/// Leaves have no children. Unknown names fail with
/// [`TaskweaveError::UnresolvedReference`].
pub fn resolve_children(unit: &Unit, registry: &Registry) -> Result<Vec<Unit>> {
    if unit.kind() == UnitKind::Leaf {
        return Ok(Vec::new());
    }

    unit.children()
        .iter()
        .map(|child| match child {
            UnitRef::Direct(u) => Ok(u.clone()),
            UnitRef::Name(name) => {
                registry
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| TaskweaveError::UnresolvedReference {
                        name: name.clone(),
                        parent: unit.canonical_label().to_string(),
                    })
            }
        })
        .collect()
}
