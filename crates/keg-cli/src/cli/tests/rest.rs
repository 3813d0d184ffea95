//! Tests for the remaining subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap::Parser;

#[test]
fn cli_parse_list() {
    assert!(matches!(parse(&["keg", "list"]), CliCommand::List));
}

#[test]
fn cli_parse_available() {
    assert!(matches!(parse(&["keg", "available"]), CliCommand::Available));
}

#[test]
fn cli_parse_show() {
    match parse(&["keg", "show", "janus"]) {
        CliCommand::Show { formula } => assert_eq!(formula, "janus"),
        _ => panic!("expected Show"),
    }
}

#[test]
fn cli_parse_remove() {
    match parse(&["keg", "remove", "janus"]) {
        CliCommand::Remove { name } => assert_eq!(name, "janus"),
        _ => panic!("expected Remove"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["keg", "checksum", "/tmp/artifact.tar.gz"]) {
        CliCommand::Checksum { path } => assert_eq!(path, "/tmp/artifact.tar.gz"),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["keg", "completions", "bash"]) {
        CliCommand::Completions { shell } => {
            assert_eq!(shell, clap_complete::Shell::Bash);
        }
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["keg", "frobnicate"]).is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["keg"]).is_err());
}
