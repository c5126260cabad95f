#![allow(dead_code)]

use indexmap::IndexMap;
use taskweave::config::{ChildSpec, ConfigSection, InlineTask, RawTaskFile, TaskConfig, TaskFile};

/// Builder for `TaskFile` to simplify test setup.
pub struct TaskFileBuilder {
    file: RawTaskFile,
}

impl TaskFileBuilder {
    pub fn new() -> Self {
        Self {
            file: RawTaskFile {
                config: ConfigSection::default(),
                task: IndexMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.file.task.insert(name.to_string(), task);
        self
    }

    pub fn deep(mut self, val: bool) -> Self {
        self.file.config.deep = val;
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.file.config.depth = Some(depth);
        self
    }

    /// The unvalidated file, for tests that expect validation to fail.
    pub fn build_raw(self) -> RawTaskFile {
        self.file
    }

    pub fn build(self) -> TaskFile {
        TaskFile::try_from(self.file).expect("Failed to build valid task file from builder")
    }
}

impl Default for TaskFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskBuilder {
    task: TaskConfig,
}

impl TaskBuilder {
    pub fn cmd(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: Some(cmd.to_string()),
                ..TaskConfig::default()
            },
        }
    }

    pub fn series(children: &[&str]) -> Self {
        Self {
            task: TaskConfig {
                series: Some(names(children)),
                ..TaskConfig::default()
            },
        }
    }

    pub fn parallel(children: &[&str]) -> Self {
        Self {
            task: TaskConfig {
                parallel: Some(names(children)),
                ..TaskConfig::default()
            },
        }
    }

    /// Append an inline command to the task's `series` or `parallel` list.
    pub fn inline(mut self, cmd: &str, name: Option<&str>) -> Self {
        let child = ChildSpec::Inline(InlineTask {
            cmd: cmd.to_string(),
            name: name.map(str::to_string),
        });
        match (&mut self.task.series, &mut self.task.parallel) {
            (Some(children), _) | (None, Some(children)) => children.push(child),
            (None, None) => panic!("inline() needs a series or parallel task"),
        }
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    pub fn flag(mut self, flag: &str, description: &str) -> Self {
        self.task
            .flag
            .get_or_insert_with(IndexMap::new)
            .insert(flag.to_string(), description.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}

fn names(children: &[&str]) -> Vec<ChildSpec> {
    children
        .iter()
        .map(|c| ChildSpec::Name(c.to_string()))
        .collect()
}
