//! CLI Tooling
//!
//! Command-line interface for the simulator. Every one-shot subcommand loads
//! the workspace snapshot, runs one operation, and writes the snapshot back
//! if the operation changed anything (the cursor included). Without a
//! subcommand the interactive shell starts.

use super::format::{format_journal, format_listing, format_stats, format_tree};
use super::shell::{Shell, ShellOptions};
use crate::config::{ConfigLoader, FssimConfig};
use crate::error::ApiError;
use crate::journal::{read_journal, Journal};
use crate::simulator::Simulator;
use crate::store::FileSnapshotStore;
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// fssim - in-memory file system simulator
#[derive(Parser, Debug)]
#[command(name = "fssim")]
#[command(about = "Simulated hierarchical file system with snapshot persistence and an operation journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// List the current directory, or the directory at PATH
    Ls { path: Option<String> },
    /// Print the current directory
    Pwd,
    /// Change the current directory (name, `..`, or a path)
    Cd { path: String },
    /// Create a directory in the current directory
    Mkdir { name: String },
    /// Create a file in the current directory
    Mkfile {
        name: String,
        /// Initial content
        #[arg(default_value = "")]
        content: String,
    },
    /// Print a file's content
    Cat { name: String },
    /// Replace a file's content
    Write { name: String, content: String },
    /// Remove a file or directory, recursively
    Rm { name: String },
    /// Rename a file or directory
    Mv { old: String, new: String },
    /// Copy a file, optionally into another directory
    Cp {
        source: String,
        destination: Option<String>,
    },
    /// Show the whole tree
    Tree,
    /// Count directories, files, and content bytes
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show journal records
    Journal {
        /// Only the last N records
        #[arg(long)]
        tail: Option<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
}

impl Commands {
    /// Whether a successful run changes persisted state.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Cd { .. }
                | Commands::Mkdir { .. }
                | Commands::Mkfile { .. }
                | Commands::Write { .. }
                | Commands::Rm { .. }
                | Commands::Mv { .. }
                | Commands::Cp { .. }
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Commands::Shell => "shell",
            Commands::Ls { .. } => "ls",
            Commands::Pwd => "pwd",
            Commands::Cd { .. } => "cd",
            Commands::Mkdir { .. } => "mkdir",
            Commands::Mkfile { .. } => "mkfile",
            Commands::Cat { .. } => "cat",
            Commands::Write { .. } => "write",
            Commands::Rm { .. } => "rm",
            Commands::Mv { .. } => "mv",
            Commands::Cp { .. } => "cp",
            Commands::Tree => "tree",
            Commands::Stats { .. } => "stats",
            Commands::Journal { .. } => "journal",
            Commands::Config => "config",
        }
    }
}

/// CLI context for one workspace
pub struct CliContext {
    workspace_root: PathBuf,
    config: FssimConfig,
    snapshot_path: PathBuf,
    journal_path: PathBuf,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    /// Create a context from an already-loaded configuration.
    pub fn with_config(workspace_root: PathBuf, config: FssimConfig) -> Self {
        let (snapshot_path, journal_path) = config.storage.resolve_paths(&workspace_root);
        Self {
            workspace_root,
            config,
            snapshot_path,
            journal_path,
        }
    }

    pub fn config(&self) -> &FssimConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    /// Load the workspace simulator from its snapshot file.
    pub fn open_simulator(&self) -> Simulator {
        Simulator::load(
            Arc::new(FileSnapshotStore::new(&self.snapshot_path)),
            Journal::to_file(&self.journal_path),
        )
    }

    /// Build the interactive shell for this workspace.
    pub fn shell(&self) -> Shell {
        Shell::new(
            self.open_simulator(),
            ShellOptions {
                color: io::stdout().is_terminal(),
                save_on_exit: self.config.storage.save_on_exit,
                journal_path: Some(self.journal_path.clone()),
            },
        )
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command.name(), workspace = %self.workspace_root.display(), "Executing command");
        match command {
            Commands::Shell => {
                let mut shell = self.shell();
                shell
                    .run(io::stdin().lock(), io::stdout().lock())
                    .map_err(|e| ApiError::StorageError(e.into()))?;
                Ok(String::new())
            }
            Commands::Journal { tail } => {
                let entries = read_journal(&self.journal_path)?;
                let skip = tail.map_or(0, |n| entries.len().saturating_sub(n));
                Ok(format_journal(&entries[skip..]))
            }
            Commands::Config => self.config.to_toml(),
            other => {
                let mut sim = self.open_simulator();
                let output = run_on_simulator(&mut sim, other)?;
                if other.mutates() {
                    sim.try_save()?;
                }
                Ok(output)
            }
        }
    }
}

/// Run a single one-shot command against `sim`.
///
/// Failed operations come back as errors; the simulator is left unchanged
/// by them, so the caller only saves on success.
pub fn run_on_simulator(sim: &mut Simulator, command: &Commands) -> Result<String, ApiError> {
    match command {
        Commands::Ls { path } => {
            let entries = sim.list_directory(path.as_deref())?;
            let shown = path.clone().unwrap_or_else(|| sim.current_path());
            Ok(format_listing(&shown, &entries))
        }
        Commands::Pwd => Ok(sim.current_path()),
        Commands::Cd { path } => {
            let moved = if path.contains('/') || path == "." {
                sim.change_directory_path(path)
            } else {
                sim.change_directory(path)
            };
            if moved {
                Ok(sim.current_path())
            } else {
                Err(ApiError::Usage(format!("cd: {}: no such directory", path)))
            }
        }
        Commands::Mkdir { name } => {
            sim.make_directory(name)?;
            Ok(format!("Created directory {}", child_path(sim, name)))
        }
        Commands::Mkfile { name, content } => {
            sim.make_file(name, content)?;
            Ok(format!("Created file {}", child_path(sim, name)))
        }
        Commands::Cat { name } => Ok(sim.file_content(name)?),
        Commands::Write { name, content } => {
            sim.write_file(name, content)?;
            Ok(format!("Wrote {} bytes to {}", content.len(), child_path(sim, name)))
        }
        Commands::Rm { name } => {
            sim.remove(name)?;
            Ok(format!("Removed {}", child_path(sim, name)))
        }
        Commands::Mv { old, new } => {
            sim.rename(old, new)?;
            Ok(format!("Renamed {} to {}", old, new))
        }
        Commands::Cp {
            source,
            destination,
        } => {
            let outcome = sim.copy(source, destination.as_deref())?;
            Ok(format!("Copied to {}", outcome.destination_path))
        }
        Commands::Tree => Ok(format_tree(&sim.walk())),
        Commands::Stats { format } => match format.as_str() {
            "text" => Ok(format_stats(&sim.stats())),
            "json" => serde_json::to_string_pretty(&sim.stats())
                .map_err(|e| ApiError::StorageError(e.into())),
            other => Err(ApiError::Usage(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        },
        Commands::Shell | Commands::Journal { .. } | Commands::Config => Err(ApiError::Usage(
            format!("'{}' does not run against a loaded tree", command.name()),
        )),
    }
}

fn child_path(sim: &Simulator, name: &str) -> String {
    let cwd = sim.current_path();
    if cwd == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", cwd, name)
    }
}
