// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::{Result, TaskweaveError};
use crate::tree::TreeOptions;

/// Task file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// deep = true
/// depth = 2
///
/// [task.lint]
/// cmd = "cargo clippy"
/// description = "Run lints."
/// flag = { "--fix" = "Apply suggestions." }
///
/// [task.build]
/// series = ["lint", { cmd = "cargo build", name = "compile" }]
/// ```
///
/// Tasks keep their document order; that is the order they are registered
/// in, and so the order they are listed in.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTaskFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub task: IndexMap<String, TaskConfig>,
}

/// A validated task file. Build with `TaskFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct TaskFile {
    config: ConfigSection,
    task: IndexMap<String, TaskConfig>,
}

impl TaskFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: IndexMap<String, TaskConfig>) -> Self {
        Self { config, task }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn tasks(&self) -> impl Iterator<Item = (&str, &TaskConfig)> {
        self.task.iter().map(|(name, task)| (name.as_str(), task))
    }

    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.task.get(name)
    }

    pub fn len(&self) -> usize {
        self.task.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task.is_empty()
    }
}

/// `[config]` section: defaults for tree rendering.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigSection {
    #[serde(default)]
    pub deep: bool,

    #[serde(default)]
    pub depth: Option<usize>,
}

impl ConfigSection {
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            deep: self.deep,
            depth: self.depth,
        }
    }
}

/// `[task.<name>]` section. Exactly one of `cmd`, `series`, `parallel`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskConfig {
    #[serde(default)]
    pub cmd: Option<String>,

    #[serde(default)]
    pub series: Option<Vec<ChildSpec>>,

    #[serde(default)]
    pub parallel: Option<Vec<ChildSpec>>,

    #[serde(default)]
    pub description: Option<String>,

    /// CLI option documentation, e.g. `{ "--fix" = "Apply suggestions." }`.
    #[serde(default)]
    pub flag: Option<IndexMap<String, String>>,
}

/// The one body a task has.
#[derive(Debug, Clone, Copy)]
pub enum TaskBody<'a> {
    Command(&'a str),
    Series(&'a [ChildSpec]),
    Parallel(&'a [ChildSpec]),
}

impl TaskConfig {
    pub fn body(&self, name: &str) -> Result<TaskBody<'_>> {
        match (&self.cmd, &self.series, &self.parallel) {
            (Some(cmd), None, None) => Ok(TaskBody::Command(cmd)),
            (None, Some(children), None) => Ok(TaskBody::Series(children)),
            (None, None, Some(children)) => Ok(TaskBody::Parallel(children)),
            (None, None, None) => Err(TaskweaveError::ConfigError(format!(
                "task '{}' needs one of `cmd`, `series` or `parallel`",
                name
            ))),
            _ => Err(TaskweaveError::ConfigError(format!(
                "task '{}' must have only one of `cmd`, `series` or `parallel`",
                name
            ))),
        }
    }
}

/// An entry of a `series` / `parallel` list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChildSpec {
    /// Reference to another `[task.<name>]`.
    Name(String),
    /// A one-off command that is not registered on its own.
    Inline(InlineTask),
}

/// `{ cmd = "...", name = "..." }` inside a composition list.
///
/// `name` becomes the command's own name; without it the command is
/// anonymous.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InlineTask {
    pub cmd: String,

    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_document_order() {
        let raw: RawTaskFile = toml::from_str(
            r#"
[task.zeta]
cmd = "echo z"

[task.alpha]
parallel = ["zeta", { cmd = "echo inline" }]
"#,
        )
        .unwrap();

        let names: Vec<&String> = raw.task.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let alpha = &raw.task["alpha"];
        assert_eq!(
            alpha.parallel.as_deref(),
            Some(
                &[
                    ChildSpec::Name("zeta".into()),
                    ChildSpec::Inline(InlineTask {
                        cmd: "echo inline".into(),
                        name: None
                    }),
                ][..]
            )
        );
        assert_eq!(raw.config, ConfigSection::default());
    }

    #[test]
    fn body_requires_exactly_one_kind() {
        let both = TaskConfig {
            cmd: Some("echo".into()),
            series: Some(vec![ChildSpec::Name("a".into())]),
            ..TaskConfig::default()
        };
        assert!(matches!(both.body("x"), Err(TaskweaveError::ConfigError(_))));

        let none = TaskConfig::default();
        assert!(matches!(none.body("x"), Err(TaskweaveError::ConfigError(_))));

        let cmd = TaskConfig {
            cmd: Some("echo".into()),
            ..TaskConfig::default()
        };
        assert!(matches!(cmd.body("x"), Ok(TaskBody::Command("echo"))));
    }

    #[test]
    fn config_section_maps_to_tree_options() {
        let section = ConfigSection {
            deep: true,
            depth: Some(3),
        };
        assert_eq!(section.tree_options(), TreeOptions::deep().with_depth(3));
    }
}
