// src/graph/mod.rs

//! The composition graph.
//!
//! - [`callable`] wraps raw work functions and gives them an identity.
//! - [`unit`] holds graph nodes (leaves, series, parallel) and child refs.
//! - [`registry`] maps names to units and remembers which callable already
//!   owns a leaf.
//! - [`combinators`] builds series/parallel composites.

pub mod callable;
pub mod combinators;
pub mod registry;
pub mod unit;

pub use callable::{Callable, CallableId};
pub use combinators::TaskRef;
pub use registry::{Registry, TaskTarget};
pub use unit::{Unit, UnitId, UnitKind, UnitRef};
