// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sova - a knowledge-base question answering assistant.
//!
//! This is the binary entry point for the operator CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod ask;
mod check;
mod shell;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sova_agent::QueryProcessor;
use sova_config::SovaConfig;
use sova_core::SovaError;
use sova_openai::OpenAiProvider;

/// Sova - answers questions from a knowledge base and remembers the conversation.
#[derive(Parser, Debug)]
#[command(name = "sova", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the standard lookup locations.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (default).
    Shell {
        /// Conversation identity for this session.
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Answer a single question and exit.
    Ask {
        question: String,
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Validate configuration and the knowledge base without calling any model.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => sova_config::load_and_validate_path(path),
        None => sova_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            sova_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Check) => check::run_check(&config).await,
        Some(Commands::Ask { question, user }) => ask::run_ask(&config, &user, &question).await,
        Some(Commands::Shell { user }) => shell::run_shell(&config, &user).await,
        None => shell::run_shell(&config, "local").await,
    };

    if let Err(e) = result {
        eprintln!("error: {}", e.chain());
        std::process::exit(1);
    }
}

/// Connects to the configured provider and builds the query processor.
pub(crate) async fn build_processor(config: &SovaConfig) -> Result<QueryProcessor, SovaError> {
    let provider = Arc::new(OpenAiProvider::new(&config.provider)?);
    sova_agent::bootstrap(config, provider.clone(), provider).await
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sova={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
