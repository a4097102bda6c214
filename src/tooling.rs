//! Tooling & Integration Layer
//!
//! Front ends over the simulator: the one-shot CLI and the interactive shell,
//! plus the text rendering they share.

pub mod cli;
pub mod format;
pub mod shell;

pub use cli::{Cli, CliContext, Commands};
pub use shell::{Shell, ShellControl, ShellOptions};
