//! Interactive Shell
//!
//! Line-oriented front end over a [`Simulator`]. Input and output are generic
//! so the loop can be driven from stdin/stdout or from in-memory buffers.

use super::format::{
    format_error, format_help, format_journal, format_listing, format_stats, format_tree,
};
use crate::error::OpError;
use crate::journal::read_journal;
use crate::simulator::Simulator;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Default number of records shown by `history`.
pub const DEFAULT_HISTORY: usize = 20;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Colored error lines and headings
    pub color: bool,
    /// Write the snapshot on `exit`, `quit`, and end of input
    pub save_on_exit: bool,
    /// Journal file read back by `history`
    pub journal_path: Option<PathBuf>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            color: false,
            save_on_exit: true,
            journal_path: None,
        }
    }
}

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellControl {
    Continue,
    Exit,
}

pub struct Shell {
    sim: Simulator,
    options: ShellOptions,
}

impl Shell {
    pub fn new(sim: Simulator, options: ShellOptions) -> Self {
        Self { sim, options }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn into_simulator(self) -> Simulator {
        self.sim
    }

    /// Prompt, read, execute until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(
            output,
            "fssim shell. Type 'help' for commands, 'exit' to leave."
        )?;
        let mut line = String::new();
        loop {
            write!(output, "{}> ", self.sim.current_path())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                self.leave(&mut output)?;
                return Ok(());
            }
            if self.execute_line(&line, &mut output)? == ShellControl::Exit {
                return Ok(());
            }
        }
    }

    /// Execute a single command line. Blank lines are ignored.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<ShellControl> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ShellControl::Continue);
        }
        let (command, rest) = split_word(line);
        let (arg, tail) = split_word(rest);
        let arg = non_empty(arg);
        let tail = non_empty(tail);
        debug!(command = command, "Shell command");

        let lowered = command.to_ascii_lowercase();
        if let (Some(usage), Some(_)) = (single_argument_usage(&lowered), tail) {
            self.fail(out, usage)?;
            return Ok(ShellControl::Continue);
        }

        match lowered.as_str() {
            "help" | "?" => writeln!(out, "{}", format_help(self.options.color))?,
            "ls" | "dir" => match self.sim.list_directory(arg) {
                Ok(entries) => {
                    let shown = match arg {
                        Some(path) => path.to_string(),
                        None => self.sim.current_path(),
                    };
                    writeln!(out, "{}", format_listing(&shown, &entries))?;
                }
                Err(_) => self.fail(
                    out,
                    &format!("ls: {}: no such directory", arg.unwrap_or_default()),
                )?,
            },
            "pwd" => writeln!(out, "{}", self.sim.current_path())?,
            "cd" => match arg {
                Some(target) => self.change_directory(target, out)?,
                None => self.fail(out, "usage: cd <name|path|..>")?,
            },
            "mkdir" => match arg {
                Some(name) => {
                    let result = self.sim.make_directory(name);
                    self.report(out, "mkdir", result)?;
                }
                None => self.fail(out, "usage: mkdir <name>")?,
            },
            "mkfile" | "touch" => match arg {
                Some(name) => {
                    let result = self.sim.make_file(name, tail.unwrap_or_default());
                    self.report(out, "mkfile", result)?;
                }
                None => self.fail(out, "usage: mkfile <name> [content]")?,
            },
            "cat" => match arg {
                Some(name) => match self.sim.file_content(name) {
                    Ok(content) => writeln!(out, "{}", content)?,
                    Err(e) => self.fail(out, &format!("cat: {}", e))?,
                },
                None => self.fail(out, "usage: cat <name>")?,
            },
            "write" => match arg {
                Some(name) => {
                    let result = self.sim.write_file(name, tail.unwrap_or_default());
                    self.report(out, "write", result)?;
                }
                None => self.fail(out, "usage: write <name> <content>")?,
            },
            "rm" => match arg {
                Some(name) => {
                    let result = self.sim.remove(name);
                    if result.is_ok() {
                        writeln!(out, "Removed '{}'.", name)?;
                    }
                    self.report(out, "rm", result)?;
                }
                None => self.fail(out, "usage: rm <name>")?,
            },
            "mv" => match (arg, tail) {
                (Some(old), Some(new)) => {
                    let result = self.sim.rename(old, new);
                    self.report(out, "mv", result)?;
                }
                _ => self.fail(out, "usage: mv <old> <new>")?,
            },
            "cp" => match arg {
                Some(source) => match self.sim.copy(source, tail) {
                    Ok(outcome) => writeln!(out, "Copied to {}", outcome.destination_path)?,
                    Err(e) => self.fail(out, &format!("cp: {}", e))?,
                },
                None => self.fail(out, "usage: cp <file> [dest dir]")?,
            },
            "tree" => writeln!(out, "{}", format_tree(&self.sim.walk()))?,
            "stats" => writeln!(out, "{}", format_stats(&self.sim.stats()))?,
            "history" => {
                let count = match arg.map(str::parse::<usize>) {
                    None => Some(DEFAULT_HISTORY),
                    Some(Ok(n)) => Some(n),
                    Some(Err(_)) => None,
                };
                match count {
                    Some(n) => self.history(n, out)?,
                    None => self.fail(out, "usage: history [n]")?,
                }
            }
            "save" => {
                if self.sim.save() {
                    writeln!(out, "Snapshot saved.")?;
                } else {
                    self.fail(out, "save: snapshot could not be written (see log)")?;
                }
            }
            "cls" | "clear" => write!(out, "{}", CLEAR_SCREEN)?,
            "exit" | "quit" => {
                self.leave(out)?;
                return Ok(ShellControl::Exit);
            }
            _ => self.fail(
                out,
                &format!("unknown command '{}'. Type 'help' for commands.", command),
            )?,
        }
        Ok(ShellControl::Continue)
    }

    fn change_directory<W: Write>(&mut self, target: &str, out: &mut W) -> io::Result<()> {
        let moved = if target.contains('/') || target == "." {
            self.sim.change_directory_path(target)
        } else {
            self.sim.change_directory(target)
        };
        if moved {
            return Ok(());
        }
        let message = if target == ".." {
            "cd: already at the root directory".to_string()
        } else if self.sim.list_children().iter().any(|c| c.name == target) {
            format!("cd: {}: not a directory", target)
        } else {
            format!("cd: {}: no such directory", target)
        };
        self.fail(out, &message)
    }

    fn history<W: Write>(&self, count: usize, out: &mut W) -> io::Result<()> {
        let Some(path) = &self.options.journal_path else {
            return self.fail(out, "history: no journal file configured");
        };
        match read_journal(path) {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(count);
                writeln!(out, "{}", format_journal(&entries[skip..]))
            }
            Err(e) => self.fail(out, &format!("history: {}", e)),
        }
    }

    fn leave<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.options.save_on_exit {
            if self.sim.save() {
                writeln!(out, "Snapshot saved.")?;
            } else {
                self.fail(out, "snapshot could not be written (see log)")?;
            }
        }
        info!(cwd = %self.sim.current_path(), "Shell session ended");
        writeln!(out, "Goodbye.")
    }

    fn report<W: Write>(&self, out: &mut W, command: &str, result: Result<(), OpError>) -> io::Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(out, &format!("{}: {}", command, e)),
        }
    }

    fn fail<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}", format_error(message, self.options.color))
    }
}

/// Usage line for commands that take at most one argument.
fn single_argument_usage(command: &str) -> Option<&'static str> {
    match command {
        "ls" | "dir" => Some("usage: ls [path]"),
        "cd" => Some("usage: cd <name|path|..>"),
        "mkdir" => Some("usage: mkdir <name>"),
        "cat" => Some("usage: cat <name>"),
        "rm" => Some("usage: rm <name>"),
        "history" => Some("usage: history [n]"),
        _ => None,
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
