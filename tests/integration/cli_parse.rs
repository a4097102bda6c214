use clap::{CommandFactory, Parser};
use fssim::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["fssim"],
        vec!["fssim", "shell"],
        vec!["fssim", "ls"],
        vec!["fssim", "ls", "/docs"],
        vec!["fssim", "pwd"],
        vec!["fssim", "cd", ".."],
        vec!["fssim", "mkdir", "docs"],
        vec!["fssim", "mkfile", "a.txt"],
        vec!["fssim", "mkfile", "a.txt", "hello world"],
        vec!["fssim", "cat", "a.txt"],
        vec!["fssim", "write", "a.txt", "body"],
        vec!["fssim", "rm", "docs"],
        vec!["fssim", "mv", "a", "b"],
        vec!["fssim", "cp", "a.txt"],
        vec!["fssim", "cp", "a.txt", "/backup"],
        vec!["fssim", "tree"],
        vec!["fssim", "stats", "--format", "json"],
        vec!["fssim", "journal", "--tail", "5"],
        vec!["fssim", "config"],
        vec![
            "fssim",
            "--workspace",
            "/tmp/ws",
            "--log-level",
            "debug",
            "--log-output",
            "stderr",
            "pwd",
        ],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_missing_arguments() {
    for args in [
        vec!["fssim", "mkdir"],
        vec!["fssim", "mv", "only-one"],
        vec!["fssim", "write", "a.txt"],
        vec!["fssim", "journal", "--tail", "many"],
        vec!["fssim", "format-disk"],
    ] {
        assert!(Cli::try_parse_from(args.clone()).is_err(), "{args:?}");
    }
}

#[test]
fn no_subcommand_means_shell() {
    let cli = Cli::try_parse_from(["fssim"]).unwrap();
    assert_eq!(cli.command.unwrap_or(Commands::Shell), Commands::Shell);
}

#[test]
fn mutating_commands_are_flagged() {
    let cli = Cli::try_parse_from(["fssim", "cp", "a", "b"]).unwrap();
    assert!(cli.command.unwrap().mutates());
    let cli = Cli::try_parse_from(["fssim", "cat", "a"]).unwrap();
    assert!(!cli.command.unwrap().mutates());
}

#[test]
fn help_lists_every_subcommand() {
    let help = Cli::command().render_long_help().to_string();
    for name in [
        "shell", "ls", "pwd", "cd", "mkdir", "mkfile", "cat", "write", "rm", "mv", "cp", "tree",
        "stats", "journal", "config",
    ] {
        assert!(help.contains(name), "help missing {name}");
    }
}
