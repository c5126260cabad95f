// src/tree/label.rs

//! Label policy: which name appears at a given tree position.
//!
//! Two tiers:
//! - a registry root is always shown under the name it is registered as
//!   (its *contextual* label), so aliases show up distinctly;
//! - everywhere else a unit shows its *canonical* label, fixed once when the
//!   unit was first bound and never re-derived.

use crate::graph::{Callable, Unit};

/// Label for a callable with no name, no override and no registration name.
pub const ANONYMOUS_LABEL: &str = "<anonymous>";

/// Label for a series composite that was never registered.
pub const SERIES_LABEL: &str = "<series>";

/// Label for a parallel composite that was never registered.
pub const PARALLEL_LABEL: &str = "<parallel>";

/// Canonical label for a callable at the moment it is first wrapped.
///
/// Priority: explicit registration name, then the override label set on the
/// callable, then its intrinsic name, then [`ANONYMOUS_LABEL`].
pub fn derive_label(explicit: Option<&str>, callable: &Callable) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| callable.own_label())
        .unwrap_or_else(|| ANONYMOUS_LABEL.to_string())
}

/// Display label of `unit` at one tree position.
///
/// `context_name` is the registry name when the unit is rendered as a root.
pub fn resolve_label(unit: &Unit, context_name: Option<&str>) -> String {
    match context_name {
        Some(name) => name.to_string(),
        None => unit.canonical_label().to_string(),
    }
}
