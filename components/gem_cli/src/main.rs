//! Gemstone CLI
//!
//! Entry point for the `gem` binary. Parses CLI arguments and delegates to
//! the Runtime for execution.

use clap::Parser as ClapParser;
use gem_cli::{logging, Cli, CliResult, Runtime};
use interpreter::Value;
use std::process::ExitCode;
use std::thread;
use tracing::{error, info};

/// Deeply recursive scripts need far more than the default main stack
const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let worker = thread::Builder::new()
        .name("gem-interpreter".to_string())
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || run(cli));

    match worker.map(|handle| handle.join()) {
        Ok(Ok(Ok(()))) => ExitCode::SUCCESS,
        Ok(Ok(Err(e))) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Ok(Err(_)) => {
            error!("interpreter thread panicked");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: could not start interpreter thread: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut runtime = Runtime::new()
        .with_print_tokens(cli.print_tokens)
        .with_print_ast(cli.print_ast)
        .with_surface_config(cli.surface_config())
        .with_max_call_depth(cli.max_depth);

    if let Some(file) = &cli.file {
        info!(file = %file, "file mode");
        runtime.execute_file(file)?;
    } else if let Some(code) = &cli.eval {
        info!("eval mode");
        let result = runtime.execute_string(code)?;
        if !matches!(result, Value::Nothing) {
            println!("{}", result.repr());
        }
    }

    if cli.wants_repl() {
        info!("repl mode");
        runtime.repl()?;
    }

    Ok(())
}
