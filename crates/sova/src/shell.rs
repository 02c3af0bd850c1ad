// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sova shell` command implementation.
//!
//! Interactive REPL with colored prompt and readline history. The whole
//! session talks as a single conversation identity.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sova_config::SovaConfig;
use sova_core::SovaError;
use tracing::debug;

/// A line typed at the shell prompt.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    Help,
    Reset,
    Empty,
    Question(&'a str),
}

fn parse_input(line: &str) -> ShellInput<'_> {
    match line.trim() {
        "" => ShellInput::Empty,
        "/quit" | "/exit" => ShellInput::Quit,
        "/help" => ShellInput::Help,
        "/reset" => ShellInput::Reset,
        question => ShellInput::Question(question),
    }
}

/// Runs the `sova shell` interactive REPL.
pub async fn run_shell(config: &SovaConfig, user_id: &str) -> Result<(), SovaError> {
    let processor = crate::build_processor(config).await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| SovaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} shell", config.agent.name).bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match parse_input(&line) {
                ShellInput::Quit => break,
                ShellInput::Empty => continue,
                ShellInput::Help => print_help(),
                ShellInput::Reset => {
                    if processor.reset_history(user_id) {
                        println!("{}", "История диалога сброшена. Начнем заново!".cyan());
                    } else {
                        println!(
                            "{}",
                            "История диалога уже пуста. Можете начать новый разговор!".cyan()
                        );
                    }
                }
                ShellInput::Question(question) => {
                    remember(&mut rl, question);
                    let reply = processor.answer(user_id, question).await;
                    println!("{reply}\n");
                }
            },
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}

/// Adds `line` to the readline history. A failure only costs arrow-key recall.
fn remember(rl: &mut DefaultEditor, line: &str) {
    if let Err(e) = rl.add_history_entry(line) {
        debug!(error = %e, "failed to record shell history entry");
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}  clear this conversation's history", "/reset".yellow());
    println!("  {}   show this message", "/help".yellow());
    println!("  {}   exit the shell", "/quit".yellow());
    println!("Anything else is sent as a question.\n");
}
