//! Text rendering shared by the shell and the one-shot CLI.

use crate::journal::JournalEntry;
use crate::types::{ChildEntry, NodeKind, TreeEntry, TreeStats};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Shell commands: (command, usage, description). Also drives `help`.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("ls / dir", "ls [path]", "List the current (or given) directory"),
    ("pwd", "pwd", "Print the current directory"),
    ("cd", "cd <name|path|..>", "Change directory"),
    ("mkdir", "mkdir <name>", "Create a directory"),
    ("mkfile / touch", "mkfile <name> [content]", "Create a file"),
    ("cat", "cat <name>", "Print a file's content"),
    ("write", "write <name> <content>", "Replace a file's content"),
    ("rm", "rm <name>", "Remove a file or directory (recursive)"),
    ("mv", "mv <old> <new>", "Rename a file or directory"),
    ("cp", "cp <file> [dest dir]", "Copy a file, renaming on clash"),
    ("tree", "tree", "Show the whole tree"),
    ("stats", "stats", "Count directories, files and bytes"),
    ("history", "history [n]", "Show the last n journal records"),
    ("save", "save", "Write the snapshot now"),
    ("cls / clear", "cls", "Clear the screen"),
    ("exit / quit", "exit", "Save (if configured) and leave"),
];

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

pub fn format_help(color: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Command", "Usage", "Description"]);
    for (command, usage, description) in COMMANDS {
        table.add_row(vec![*command, *usage, *description]);
    }
    format!("{}\n{}", format_section_heading("Commands", color), table)
}

/// Listing in the `[DIR]  name` / `[FILE] name` layout.
pub fn format_listing(path: &str, entries: &[ChildEntry]) -> String {
    let mut out = format!("Contents of {}:\n", path);
    if entries.is_empty() {
        out.push_str("(empty directory)");
        return out;
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| format!("{} {}", entry.kind.tag(), entry.name))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

/// Indented tree, directories suffixed with `/`.
pub fn format_tree(entries: &[TreeEntry]) -> String {
    let mut out = String::from("/");
    for entry in entries {
        let name = entry.path.rsplit('/').next().unwrap_or_default();
        let suffix = if entry.kind == NodeKind::Directory { "/" } else { "" };
        out.push('\n');
        out.push_str(&"  ".repeat(entry.depth + 1));
        out.push_str(name);
        out.push_str(suffix);
    }
    out
}

pub fn format_stats(stats: &TreeStats) -> String {
    format!(
        "Directories: {}\nFiles: {}\nContent bytes: {}",
        stats.directories, stats.files, stats.content_bytes
    )
}

/// Journal records as a table, oldest first.
pub fn format_journal(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "(journal is empty)".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Time", "Operation", "Target", "Status"]);
    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.operation.clone(),
            entry.target.clone(),
            entry.status.clone(),
        ]);
    }
    table.to_string()
}

/// Error line as the shell prints it.
pub fn format_error(message: &str, color: bool) -> String {
    if color {
        format!("{} {}", ">>".red().bold(), message.red())
    } else {
        format!(">> {}", message)
    }
}
