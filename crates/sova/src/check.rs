// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sova check` command implementation.
//!
//! Loads the knowledge base and resolves the system prompt, then prints a
//! summary. No model or network call is made.

use std::path::Path;

use colored::Colorize;
use sova_config::SovaConfig;
use sova_core::SovaError;

/// Validates that the assistant could start with this configuration.
pub async fn run_check(config: &SovaConfig) -> Result<(), SovaError> {
    let fragments = sova_knowledge::load(Path::new(&config.knowledge.path)).await?;
    let prompt = sova_agent::load_system_prompt(&config.agent).await;
    let api_key = sova_openai::resolve_api_key(config.provider.api_key.as_deref());

    println!("{}", "sova check".bold().green());
    println!("  knowledge base: {}", config.knowledge.path);
    println!("  fragments:      {}", fragments.len());
    println!("  system prompt:  {} chars", prompt.chars().count());
    println!("  provider:       {}", config.provider.base_url);
    println!("  chat model:     {}", config.provider.chat_model);
    println!("  embed model:    {}", config.provider.embedding_model);
    match api_key {
        Ok(_) => println!("  api key:        {}", "found".green()),
        Err(_) => println!("  api key:        {}", "missing".yellow()),
    }
    println!("{}", "ok".green());
    Ok(())
}
