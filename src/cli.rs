// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::ConfigSection;
use crate::tree::TreeOptions;

/// Command-line arguments for `taskweave`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskweave",
    version,
    about = "List the tasks of a task file and how they are composed.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML).
    ///
    /// Default: `Taskweave.toml` in the current working directory, or the
    /// `TASKWEAVE_FILE` environment variable.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Print the task tree (default output).
    #[arg(long, conflicts_with_all = ["tasks_simple", "tasks_json"])]
    pub tasks: bool,

    /// Print only the top-level task names, one per line.
    #[arg(long, conflicts_with = "tasks_json")]
    pub tasks_simple: bool,

    /// Print the task tree as JSON.
    #[arg(long)]
    pub tasks_json: bool,

    /// Expand composite tasks into their children.
    #[arg(long)]
    pub deep: bool,

    /// Maximum tree depth (top-level tasks are depth 1). Implies `--deep`.
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKWEAVE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// What to print.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Tree,
    Simple,
    Json,
}

impl CliArgs {
    pub fn output_mode(&self) -> OutputMode {
        if self.tasks_simple {
            OutputMode::Simple
        } else if self.tasks_json {
            OutputMode::Json
        } else {
            OutputMode::Tree
        }
    }

    /// Tree options: CLI flags layered over the task file's `[config]`.
    pub fn tree_options(&self, defaults: &ConfigSection) -> TreeOptions {
        let depth = self.depth.or(defaults.depth);
        TreeOptions {
            deep: self.deep || self.depth.is_some() || defaults.deep,
            depth,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
