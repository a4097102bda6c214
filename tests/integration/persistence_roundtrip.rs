use fssim::journal::{Journal, MemoryJournalSink};
use fssim::store::{FileSnapshotStore, SnapshotStore};
use fssim::Simulator;
use std::sync::Arc;
use tempfile::TempDir;

fn quiet_journal() -> Journal {
    Journal::new(Arc::new(MemoryJournalSink::new()))
}

fn open(dir: &TempDir) -> Simulator {
    let store = Arc::new(FileSnapshotStore::new(dir.path().join("virtual_disk.json")));
    Simulator::load(store, quiet_journal())
}

#[test]
fn save_then_load_restores_structure_content_and_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = open(&dir);
    sim.make_directory("projects").unwrap();
    sim.make_file("todo.md", "- ship it\n- rest").unwrap();
    sim.change_directory("projects");
    sim.make_directory("fssim").unwrap();
    sim.make_file("empty", "").unwrap();
    sim.change_directory("fssim");
    sim.make_file("notes.txt", "unicode: \u{00e9}\u{4e2d}").unwrap();
    assert!(sim.save());

    let restored = open(&dir);
    assert_eq!(restored.current_path(), "/projects/fssim");
    assert_eq!(restored.walk(), sim.walk());
    assert_eq!(restored.stats(), sim.stats());
    assert_eq!(
        restored.file_content("notes.txt").unwrap(),
        "unicode: \u{00e9}\u{4e2d}"
    );
}

#[test]
fn missing_snapshot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let sim = open(&dir);
    assert_eq!(sim.current_path(), "/");
    assert!(sim.walk().is_empty());
}

#[test]
fn corrupt_snapshot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("virtual_disk.json"), b"\x00\x01garbage").unwrap();
    let sim = open(&dir);
    assert_eq!(sim.current_path(), "/");
    assert!(sim.walk().is_empty());
}

#[test]
fn later_save_replaces_earlier_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = open(&dir);
    sim.make_file("a", "").unwrap();
    assert!(sim.save());
    sim.remove("a").unwrap();
    sim.make_file("b", "").unwrap();
    assert!(sim.save());

    let restored = open(&dir);
    let names: Vec<String> = restored.list_children().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["b"]);
}

#[test]
fn unsaved_changes_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = open(&dir);
    sim.make_file("kept", "").unwrap();
    assert!(sim.save());
    sim.make_file("lost", "").unwrap();
    drop(sim);

    let restored = open(&dir);
    assert_eq!(restored.list_children().len(), 1);
}

#[test]
fn save_failure_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    // The snapshot path is an existing directory, so the final rename fails.
    let blocked = dir.path().join("blocked");
    std::fs::create_dir_all(blocked.join("inner")).unwrap();
    let store = Arc::new(FileSnapshotStore::new(&blocked));
    let mut sim = Simulator::new(store.clone(), quiet_journal());
    sim.make_file("f", "").unwrap();

    assert!(!sim.save());
    assert!(sim.try_save().is_err());
    assert_eq!(sim.list_children().len(), 1);
    assert!(store.load().is_err());
}

#[test]
fn deeply_nested_tree_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = open(&dir);
    for depth in 0..250 {
        let name = format!("d{}", depth);
        sim.make_directory(&name).unwrap();
        assert!(sim.change_directory(&name));
    }
    sim.make_file("leaf.txt", "bottom").unwrap();
    let deepest = sim.current_path();
    assert!(sim.save());

    let restored = open(&dir);
    assert_eq!(restored.current_path(), deepest);
    assert_eq!(restored.tree().len(), sim.tree().len());
    assert_eq!(restored.file_content("leaf.txt").unwrap(), "bottom");
}
