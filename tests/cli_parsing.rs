//! Tests for CLI subcommand parsing.

use clap::Parser;
use ipscope::config::{Command, LogFormat, LogLevel, Opt};
use ipscope::Config;
use std::path::PathBuf;

#[test]
fn test_cli_defaults_to_shell() {
    let opt = Opt::try_parse_from(["ipscope"]).expect("Should parse without arguments");
    assert!(opt.command.is_none());
    assert_eq!(
        log::LevelFilter::from(opt.log_level.clone()),
        log::LevelFilter::from(LogLevel::Warn)
    );
    match opt.log_format {
        LogFormat::Plain => {}
        LogFormat::Json => panic!("Default log format should be plain"),
    }
    assert_eq!(opt.store_dir, PathBuf::from(".ipscope"));
    assert!(!opt.ephemeral);
}

#[test]
fn test_cli_lookup_command_parsing() {
    let opt = Opt::try_parse_from(["ipscope", "lookup", "8.8.8.8"]).expect("Should parse lookup");
    match opt.command {
        Some(Command::Lookup { ip }) => assert_eq!(ip, "8.8.8.8"),
        other => panic!("Expected lookup, got {:?}", other),
    }
}

#[test]
fn test_cli_list_with_filter() {
    let opt = Opt::try_parse_from(["ipscope", "list", "--filter", "united states"])
        .expect("Should parse list");
    match opt.command {
        Some(Command::List { filter }) => assert_eq!(filter.as_deref(), Some("united states")),
        other => panic!("Expected list, got {:?}", other),
    }

    let opt = Opt::try_parse_from(["ipscope", "list"]).expect("Should parse bare list");
    assert!(matches!(opt.command, Some(Command::List { filter: None })));
}

#[test]
fn test_cli_show_and_delete_require_numeric_id() {
    let opt = Opt::try_parse_from(["ipscope", "show", "1718000000000"]).expect("Should parse show");
    assert!(matches!(opt.command, Some(Command::Show { id: 1718000000000 })));

    let opt = Opt::try_parse_from(["ipscope", "delete", "42"]).expect("Should parse delete");
    assert!(matches!(opt.command, Some(Command::Delete { id: 42 })));

    assert!(Opt::try_parse_from(["ipscope", "delete", "abc"]).is_err());
    assert!(Opt::try_parse_from(["ipscope", "show"]).is_err());
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let opt = Opt::try_parse_from([
        "ipscope",
        "lookup",
        "1.1.1.1",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--store-dir",
        "/tmp/ipscope-test",
        "--api-url",
        "http://127.0.0.1:8080",
        "--timeout-seconds",
        "2",
    ])
    .expect("Global flags should be accepted after the subcommand");

    let config = Config::from(&opt);
    assert_eq!(
        log::LevelFilter::from(config.log_level.clone()),
        log::LevelFilter::Debug
    );
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.store_dir, PathBuf::from("/tmp/ipscope-test"));
    assert_eq!(config.api_url, "http://127.0.0.1:8080");
    assert_eq!(config.timeout_seconds, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_rejects_unknown_log_level() {
    assert!(Opt::try_parse_from(["ipscope", "--log-level", "loud"]).is_err());
}
