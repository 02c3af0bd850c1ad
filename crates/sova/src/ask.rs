// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sova ask` command implementation.

use sova_config::SovaConfig;
use sova_core::SovaError;

/// Answers one question and prints the reply to stdout.
pub async fn run_ask(config: &SovaConfig, user_id: &str, question: &str) -> Result<(), SovaError> {
    let processor = crate::build_processor(config).await?;
    let reply = processor.answer(user_id, question).await;
    println!("{reply}");
    Ok(())
}
