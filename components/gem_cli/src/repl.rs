//! REPL (Read-Eval-Print Loop) implementation

use crate::error::{CliError, CliResult};
use crate::runtime::Runtime;
use interpreter::Value;
use parser::{Keyword, Punctuator, Token};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

const PROMPT: &str = "Gemstone > ";
const CONTINUATION_PROMPT: &str = "... ";

/// Run the interactive REPL
///
/// Each complete input is one program unit. Results of non-`emit`
/// statements are echoed; an error is reported and the loop goes on.
pub fn run_repl(runtime: &mut Runtime) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("Gemstone {}", env!("CARGO_PKG_VERSION"));
    println!("Type Gemstone code, .help for commands, or 'exit' to quit.");
    println!();

    let mut line_buffer = String::new();

    loop {
        let prompt = if line_buffer.is_empty() {
            PROMPT
        } else {
            CONTINUATION_PROMPT
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if line_buffer.is_empty() {
                    if trimmed.eq_ignore_ascii_case("exit") {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed.starts_with('.') {
                        handle_repl_command(trimmed, runtime);
                        continue;
                    }
                } else {
                    line_buffer.push('\n');
                }
                line_buffer.push_str(&line);

                if !is_input_complete(&line_buffer) {
                    continue;
                }

                let _ = editor.add_history_entry(line_buffer.as_str());
                debug!(input = %line_buffer, "evaluating REPL input");

                if let Err(e) = runtime.execute_line(&line_buffer, |value| {
                    println!("{}", format_value(value))
                }) {
                    eprintln!("{}", e);
                }
                line_buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                if line_buffer.is_empty() {
                    println!("Press Ctrl-D or type 'exit' to quit");
                } else {
                    println!("^C");
                    line_buffer.clear();
                }
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D
                println!();
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Handle special REPL commands
fn handle_repl_command(command: &str, runtime: &mut Runtime) {
    match command {
        ".help" => {
            println!("REPL Commands:");
            println!("  .help     - Show this help message");
            println!("  .clear    - Clear the screen");
            println!("  .vars     - List global variables and functions");
            println!("  exit      - Exit the REPL");
        }
        ".clear" => {
            print!("\x1B[2J\x1B[1;1H");
        }
        ".vars" => {
            let globals = runtime.interpreter().globals();
            let globals = globals.borrow();
            for name in globals.local_names() {
                match globals.get(&name) {
                    Some(Value::NativeFunction(_)) | None => {}
                    Some(value) => println!("  {} = {}", name, format_value(&value)),
                }
            }
        }
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
}

/// Check if the input is a complete program unit
///
/// Input is incomplete while an `if`, `while`, `for` or `def` is missing
/// its `end`, or a bracket is left open. Input that does not lex is
/// complete, so the error is reported instead of waiting for more lines.
fn is_input_complete(input: &str) -> bool {
    let tokens = match parser::tokenize(input) {
        Ok(tokens) => tokens,
        Err(_) => return true,
    };

    let mut blocks = 0i32;
    let mut brackets = 0i32;
    for spanned in &tokens {
        match &spanned.token {
            Token::Keyword(Keyword::If | Keyword::While | Keyword::For | Keyword::Def) => {
                blocks += 1
            }
            Token::Keyword(Keyword::End) => blocks -= 1,
            Token::Punctuator(Punctuator::LParen | Punctuator::LBracket | Punctuator::LBrace) => {
                brackets += 1
            }
            Token::Punctuator(Punctuator::RParen | Punctuator::RBracket | Punctuator::RBrace) => {
                brackets -= 1
            }
            _ => {}
        }
    }

    blocks <= 0 && brackets <= 0
}

/// Format an echoed value; strings are quoted
fn format_value(value: &Value) -> String {
    value.repr()
}
