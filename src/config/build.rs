// src/config/build.rs

//! Turning a validated task file into a [`Registry`].

use std::process::Command;

use anyhow::{anyhow, Context};
use tracing::debug;

use crate::config::model::{ChildSpec, TaskBody, TaskFile};
use crate::errors::Result;
use crate::graph::{Callable, Registry, TaskRef};

impl TaskFile {
    /// Register every task, in document order, into a fresh registry.
    ///
    /// Composites reference other tasks by name, so declaration order does
    /// not matter. Inline commands become direct leaves.
    pub fn build_registry(&self) -> Result<Registry> {
        let mut registry = Registry::new();

        for (name, task) in self.tasks() {
            let unit = match task.body(name)? {
                TaskBody::Command(cmd) => registry.register(name, shell_callable(None, cmd))?,
                TaskBody::Series(children) => {
                    let refs = child_refs(children);
                    let unit = registry.series(refs)?;
                    registry.register(name, unit)?
                }
                TaskBody::Parallel(children) => {
                    let refs = child_refs(children);
                    let unit = registry.parallel(refs)?;
                    registry.register(name, unit)?
                }
            };

            if let Some(description) = &task.description {
                unit.set_description(description.clone());
            }
            if let Some(flag) = &task.flag {
                unit.set_flag(flag.clone());
            }
        }

        debug!(tasks = registry.len(), "built registry from task file");
        Ok(registry)
    }
}

fn child_refs(children: &[ChildSpec]) -> Vec<TaskRef> {
    children
        .iter()
        .map(|child| match child {
            ChildSpec::Name(name) => TaskRef::from(name),
            ChildSpec::Inline(inline) => {
                TaskRef::Callable(shell_callable(inline.name.as_deref(), &inline.cmd))
            }
        })
        .collect()
}

/// A callable that runs `cmd` through `sh -c` when an executor invokes it.
pub fn shell_callable(name: Option<&str>, cmd: &str) -> Callable {
    let cmd = cmd.to_string();
    let work = move || -> anyhow::Result<()> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(&cmd)
            .status()
            .with_context(|| format!("spawning `{}`", cmd))?;
        if status.success() {
            Ok(())
        } else {
            Err(anyhow!("command `{}` failed with {}", cmd, status))
        }
    };

    match name {
        Some(name) => Callable::named(name, work),
        None => Callable::new(work),
    }
}
