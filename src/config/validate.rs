// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ChildSpec, RawTaskFile, TaskBody, TaskFile};
use crate::errors::{Result, TaskweaveError};

impl TryFrom<RawTaskFile> for TaskFile {
    type Error = TaskweaveError;

    fn try_from(raw: RawTaskFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_task_file(&raw)?;
        Ok(TaskFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_task_file(raw: &RawTaskFile) -> Result<()> {
    ensure_has_tasks(raw)?;
    validate_task_bodies(raw)?;
    validate_references(raw)?;
    validate_dag(raw)?;
    Ok(())
}

fn ensure_has_tasks(raw: &RawTaskFile) -> Result<()> {
    if raw.task.is_empty() {
        return Err(TaskweaveError::ConfigError(
            "task file must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_bodies(raw: &RawTaskFile) -> Result<()> {
    for (name, task) in raw.task.iter() {
        if name.trim().is_empty() {
            return Err(TaskweaveError::ConfigError(
                "task names must not be empty".to_string(),
            ));
        }

        match task.body(name)? {
            TaskBody::Command(cmd) => {
                if cmd.trim().is_empty() {
                    return Err(TaskweaveError::ConfigError(format!(
                        "task '{}' has an empty `cmd`",
                        name
                    )));
                }
            }
            TaskBody::Series(children) | TaskBody::Parallel(children) => {
                if children.is_empty() {
                    return Err(TaskweaveError::ConfigError(format!(
                        "task '{}' must combine at least one task",
                        name
                    )));
                }
                for child in children {
                    if let ChildSpec::Inline(inline) = child {
                        if inline.cmd.trim().is_empty() {
                            return Err(TaskweaveError::ConfigError(format!(
                                "task '{}' has an inline task with an empty `cmd`",
                                name
                            )));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn validate_references(raw: &RawTaskFile) -> Result<()> {
    for (name, child) in named_children(raw) {
        if !raw.task.contains_key(child) {
            return Err(TaskweaveError::ConfigError(format!(
                "task '{}' references unknown task '{}'",
                name, child
            )));
        }
        if child == name {
            return Err(TaskweaveError::ConfigError(format!(
                "task '{}' cannot contain itself",
                name
            )));
        }
    }
    Ok(())
}

fn validate_dag(raw: &RawTaskFile) -> Result<()> {
    // Edge direction: composite -> referenced task.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in raw.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, child) in named_children(raw) {
        graph.add_edge(name, child, ());
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(TaskweaveError::DagCycle(format!(
            "cycle detected in task composition involving task '{}'",
            cycle.node_id()
        ))),
    }
}

/// `(composite name, referenced name)` for every name reference.
fn named_children(raw: &RawTaskFile) -> impl Iterator<Item = (&str, &str)> {
    raw.task.iter().flat_map(|(name, task)| {
        task.series
            .iter()
            .chain(task.parallel.iter())
            .flatten()
            .filter_map(move |child| match child {
                ChildSpec::Name(child) => Some((name.as_str(), child.as_str())),
                ChildSpec::Inline(_) => None,
            })
    })
}
