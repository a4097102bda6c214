use fssim::journal::{read_journal, Journal, JournalEntry};
use fssim::store::MemorySnapshotStore;
use fssim::Simulator;
use std::sync::Arc;

fn simulator_with_file_journal(path: &std::path::Path) -> Simulator {
    Simulator::new(Arc::new(MemorySnapshotStore::new()), Journal::to_file(path))
}

#[test]
fn every_mutation_writes_start_and_outcome_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("filesystem_journal.log");
    let mut sim = simulator_with_file_journal(&path);

    sim.make_directory("docs").unwrap();
    sim.make_file("a.txt", "x").unwrap();
    let _ = sim.make_file("a.txt", "x");
    sim.copy("a.txt", Some("docs")).unwrap();
    sim.write_file("a.txt", "y").unwrap();
    sim.rename("a.txt", "b.txt").unwrap();
    sim.remove("docs").unwrap();
    sim.change_directory("..");

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 14);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("] [MKDIR] docs - START"));
    assert!(lines[5].ends_with("] [MKFILE] a.txt - FAIL - EXISTS"));
    assert!(lines[7].ends_with("] [COPY] a.txt -> docs - SUCCESS"));
    assert!(lines[11].ends_with("] [RENAME] a.txt -> b.txt - SUCCESS"));
    assert!(lines[13].ends_with("] [DELETE] docs - SUCCESS"));
}

#[test]
fn journal_file_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.log");
    let mut sim = simulator_with_file_journal(&path);
    sim.make_directory("d").unwrap();
    let _ = sim.remove("ghost");

    let entries = read_journal(&path).unwrap();
    let summary: Vec<(String, String, String)> = entries
        .iter()
        .map(|e| (e.operation.clone(), e.target.clone(), e.status.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("MKDIR".into(), "d".into(), "START".into()),
            ("MKDIR".into(), "d".into(), "SUCCESS".into()),
            ("DELETE".into(), "ghost".into(), "START".into()),
            ("DELETE".into(), "ghost".into(), "FAIL - NOT FOUND".into()),
        ]
    );
    assert!(entries[3].is_failure());
    assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn journal_line_round_trips_through_display() {
    let line = "[2026-10-17T09:12:44.031+02:00] [COPY] a - b -> . - FAIL - NOT FOUND";
    let entry: JournalEntry = line.parse().unwrap();
    assert_eq!(entry.operation, "COPY");
    assert_eq!(entry.target, "a - b -> .");
    assert_eq!(entry.status, "FAIL - NOT FOUND");
    assert_eq!(entry.to_string(), line);
}

#[test]
fn names_with_separators_stay_one_record_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.log");
    let mut sim = simulator_with_file_journal(&path);

    assert!(matches!(
        sim.make_directory("a\nb"),
        Err(fssim::OpError::InvalidName(_))
    ));
    sim.make_directory("x - FAIL").unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);

    let entries = read_journal(&path).unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].target, "a\\nb");
    assert_eq!(entries[1].status, "FAIL - INVALID NAME");
    assert_eq!(entries[2].target, "x - FAIL");
    assert_eq!(entries[3].target, "x - FAIL");
    assert_eq!(entries[3].status, "SUCCESS");
    assert!(!entries[3].is_failure());
}

#[test]
fn unwritable_journal_does_not_fail_operations() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the log file should be makes every append fail.
    let mut sim = simulator_with_file_journal(dir.path());
    sim.make_directory("still-works").unwrap();
    assert_eq!(sim.list_children().len(), 1);
}

#[test]
fn missing_journal_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_journal(&dir.path().join("none.log")).unwrap().is_empty());
}
