//! CLI argument parsing tests
//!
//! Tests for verifying clap argument parsing works correctly

use clap::Parser as ClapParser;
use gem_cli::{Cli, CLI_MAX_CALL_DEPTH};

/// Test parsing no arguments (default behavior)
#[test]
fn cli_parse_no_args() {
    let cli = Cli::try_parse_from(["gem"]).unwrap();

    assert_eq!(cli.file, None);
    assert_eq!(cli.eval, None);
    assert!(!cli.repl);
    assert!(!cli.print_tokens);
    assert!(!cli.print_ast);
    assert_eq!(cli.frames, None);
    assert_eq!(cli.frame_ms, 16);
    assert_eq!(cli.max_depth, CLI_MAX_CALL_DEPTH);
    assert_eq!(CLI_MAX_CALL_DEPTH, 1000);
    assert_eq!(cli.verbose, 0);
    assert!(cli.wants_repl());
}

/// Test the positional script path
#[test]
fn cli_parse_file() {
    let cli = Cli::try_parse_from(["gem", "game.gem"]).unwrap();

    assert_eq!(cli.file, Some("game.gem".to_string()));
    assert!(!cli.wants_repl());
}

/// Test parsing --eval and -e
#[test]
fn cli_parse_eval() {
    let cli = Cli::try_parse_from(["gem", "--eval", "emit 1"]).unwrap();
    assert_eq!(cli.eval, Some("emit 1".to_string()));

    let cli = Cli::try_parse_from(["gem", "-e", "1 + 2"]).unwrap();
    assert_eq!(cli.eval, Some("1 + 2".to_string()));
    assert!(!cli.wants_repl());
}

/// A file and --eval cannot be combined
#[test]
fn cli_parse_eval_conflicts_with_file() {
    assert!(Cli::try_parse_from(["gem", "game.gem", "-e", "emit 1"]).is_err());
}

/// Test parsing --repl and -r
#[test]
fn cli_parse_repl() {
    assert!(Cli::try_parse_from(["gem", "--repl"]).unwrap().repl);
    assert!(Cli::try_parse_from(["gem", "-r"]).unwrap().repl);
}

/// Test the debug printing flags
#[test]
fn cli_parse_print_flags() {
    let cli = Cli::try_parse_from(["gem", "--print-tokens", "--print-ast", "a.gem"]).unwrap();

    assert!(cli.print_tokens);
    assert!(cli.print_ast);
}

/// Test the frame loop options
#[test]
fn cli_parse_frame_options() {
    let cli = Cli::try_parse_from(["gem", "--frames", "60", "--frame-ms", "0", "a.gem"]).unwrap();

    assert_eq!(cli.frames, Some(60));
    assert_eq!(cli.frame_ms, 0);
    let config = cli.surface_config();
    assert_eq!(config.max_frames, Some(60));
    assert!(config.frame_interval.is_zero());
}

/// Test the call depth option
#[test]
fn cli_parse_max_depth() {
    let cli = Cli::try_parse_from(["gem", "--max-depth", "50"]).unwrap();
    assert_eq!(cli.max_depth, 50);
}

/// Repeated -v raises verbosity
#[test]
fn cli_parse_verbosity() {
    assert_eq!(Cli::try_parse_from(["gem", "-v"]).unwrap().verbose, 1);
    assert_eq!(Cli::try_parse_from(["gem", "-vvv"]).unwrap().verbose, 3);
}

/// Non-numeric values are rejected
#[test]
fn cli_parse_invalid_numbers() {
    assert!(Cli::try_parse_from(["gem", "--frames", "many"]).is_err());
    assert!(Cli::try_parse_from(["gem", "--max-depth", "-1"]).is_err());
}

/// Unknown flags are rejected
#[test]
fn cli_parse_unknown_flag() {
    assert!(Cli::try_parse_from(["gem", "--jit"]).is_err());
}

/// Test the convenience constructor
#[test]
fn cli_with_file() {
    let cli = Cli::with_file("script.gem");
    assert_eq!(cli.file, Some("script.gem".to_string()));
    assert_eq!(cli, {
        let mut parsed = Cli::try_parse_from(["gem", "script.gem"]).unwrap();
        parsed.file = Some("script.gem".to_string());
        parsed
    });
}
