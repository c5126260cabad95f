use anyhow::anyhow;
use taskweave::errors::{Result, TaskweaveError};
use taskweave::exec::{resolve_children, Executor};
use taskweave::graph::{Registry, Unit, UnitKind};

/// A fake executor that:
/// - invokes leaf callables directly, on the calling thread
/// - records the canonical label of every leaf it invoked, in order
/// - runs parallel children one after another but keeps going on failure,
///   so the aggregation side of the contract can be checked.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub executed: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, unit: &Unit, registry: &Registry) -> Result<()> {
        match unit.kind() {
            UnitKind::Leaf => {
                self.executed.push(unit.canonical_label().to_string());
                match unit.callable() {
                    Some(callable) => callable.call().map_err(TaskweaveError::from),
                    None => Ok(()),
                }
            }
            UnitKind::Series => {
                for child in resolve_children(unit, registry)? {
                    self.execute(&child, registry)?;
                }
                Ok(())
            }
            UnitKind::Parallel => {
                let mut failures = Vec::new();
                for child in resolve_children(unit, registry)? {
                    if let Err(e) = self.execute(&child, registry) {
                        failures.push(e.to_string());
                    }
                }
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(anyhow!(
                        "{} parallel task(s) failed: {}",
                        failures.len(),
                        failures.join("; ")
                    )
                    .into())
                }
            }
        }
    }
}
