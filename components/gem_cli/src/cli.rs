//! Command-line arguments

use builtins::SurfaceConfig;
use clap::Parser as ClapParser;
use std::time::Duration;

/// Default `--max-depth`; the binary runs scripts on a 256 MiB stack
pub const CLI_MAX_CALL_DEPTH: usize = 1000;

/// Gemstone script runner
#[derive(ClapParser, Debug, Clone, PartialEq)]
#[command(name = "gem", version, about = "Run Gemstone scripts or start the REPL")]
pub struct Cli {
    /// Script file to execute
    pub file: Option<String>,

    /// Evaluate inline source and print its result
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    pub eval: Option<String>,

    /// Start the interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// Print the token stream before execution
    #[arg(long)]
    pub print_tokens: bool,

    /// Print the parsed program before execution
    #[arg(long)]
    pub print_ast: bool,

    /// Stop the frame loop after N ticks
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Milliseconds between frame loop ticks
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub frame_ms: u64,

    /// Maximum nesting of user function calls
    #[arg(long, value_name = "N", default_value_t = CLI_MAX_CALL_DEPTH)]
    pub max_depth: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Arguments for running `file` with every other option at its default
    pub fn with_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            eval: None,
            repl: false,
            print_tokens: false,
            print_ast: false,
            frames: None,
            frame_ms: 16,
            max_depth: CLI_MAX_CALL_DEPTH,
            verbose: 0,
        }
    }

    /// Host surface settings derived from the frame options
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            frame_interval: Duration::from_millis(self.frame_ms),
            max_frames: self.frames,
            ..SurfaceConfig::default()
        }
    }

    /// Whether the REPL should run: asked for, or nothing else to do
    pub fn wants_repl(&self) -> bool {
        self.repl || (self.file.is_none() && self.eval.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_config_from_flags() {
        let cli = Cli::try_parse_from(["gem", "--frames", "3", "--frame-ms", "0"]).unwrap();
        let config = cli.surface_config();
        assert_eq!(config.max_frames, Some(3));
        assert_eq!(config.frame_interval, Duration::ZERO);
        assert_eq!(config.default_title, "Gemstone VM");
    }

    #[test]
    fn test_wants_repl() {
        assert!(Cli::try_parse_from(["gem"]).unwrap().wants_repl());
        assert!(!Cli::with_file("a.gem").wants_repl());
        assert!(Cli::try_parse_from(["gem", "a.gem", "-r"]).unwrap().wants_repl());
    }
}
