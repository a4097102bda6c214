use fssim::config::FssimConfig;
use fssim::tooling::{CliContext, Shell, ShellOptions};
use std::io::Cursor;

fn session(ctx: &CliContext, script: &str) -> String {
    let mut shell = Shell::new(
        ctx.open_simulator(),
        ShellOptions {
            color: false,
            save_on_exit: ctx.config().storage.save_on_exit,
            journal_path: Some(ctx.journal_path().to_path_buf()),
        },
    );
    let mut out = Vec::new();
    shell.run(Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn scripted_session_persists_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CliContext::with_config(dir.path().to_path_buf(), FssimConfig::default());

    let out = session(
        &ctx,
        "mkdir docs\ncd docs\nmkfile a.txt hello world\ncp a.txt\nls\nexit\n",
    );
    assert!(out.contains("/> "));
    assert!(out.contains("/docs> "));
    assert!(out.contains("Copied to /docs/a1.txt"));
    assert!(out.contains("Contents of /docs:\n[FILE] a.txt\n[FILE] a1.txt"));
    assert!(out.contains("Snapshot saved."));

    let out = session(&ctx, "pwd\ncat a1.txt\nquit\n");
    assert!(out.contains("/docs\n"));
    assert!(out.contains("hello world\n"));
}

#[test]
fn end_of_input_behaves_like_exit() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CliContext::with_config(dir.path().to_path_buf(), FssimConfig::default());
    let out = session(&ctx, "mkdir kept");
    assert!(out.contains("Goodbye."));
    assert!(ctx.snapshot_path().exists());
}

#[test]
fn save_on_exit_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = FssimConfig::default();
    config.storage.save_on_exit = false;
    let ctx = CliContext::with_config(dir.path().to_path_buf(), config);

    let out = session(&ctx, "mkdir gone\nexit\n");
    assert!(!out.contains("Snapshot saved."));
    assert!(!ctx.snapshot_path().exists());

    session(&ctx, "mkdir kept\nsave\nexit\n");
    assert!(ctx.snapshot_path().exists());
}

#[test]
fn history_shows_recent_journal_records() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CliContext::with_config(dir.path().to_path_buf(), FssimConfig::default());
    let out = session(&ctx, "mkdir a\nrm missing\nhistory 2\nexit\n");
    assert!(out.contains("FAIL - NOT FOUND"));
    assert!(out.contains(">> rm: 'missing' not found"));
    // Only the two DELETE records fit in `history 2`.
    assert!(!out.contains("MKDIR"));
}

#[test]
fn tree_and_stats_views() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = CliContext::with_config(dir.path().to_path_buf(), FssimConfig::default());
    let out = session(
        &ctx,
        "mkdir a\ncd a\nmkdir b\ntouch f.txt abc\ncd /\ntree\nstats\nexit\n",
    );
    assert!(out.contains("/\n  a/\n    b/\n    f.txt\n"));
    assert!(out.contains("Directories: 2\nFiles: 1\nContent bytes: 3"));
}
