// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction resolution.

use sova_config::model::AgentConfig;
use tracing::{info, warn};

/// Built-in instruction for a design school rules assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Ты — полезный ассистент для студентов школы дизайна. Ты отвечаешь на вопросы о правилах поведения в школе.
Ты умеешь находить информацию в базе знаний и предоставлять точные ответы.

Используй предоставленный контекст для ответа на вопрос. Если в контексте нет прямого ответа, \
сообщи об этом пользователю, но постарайся быть полезным. Не выдумывай информацию.

Анализируй историю диалога для понимания контекста вопроса. Если в новом вопросе не хватает \
деталей, но они упоминались ранее в диалоге, используй их для формирования ответа.

При ответе на вопросы о времени, расписании или других конкретных деталях, \
всегда давай точную информацию из базы знаний. Например, на вопрос \"Во сколько начинается вторая пара?\", \
нужно ответить с конкретным временем из расписания звонков.";

/// Resolves the system instruction: file > inline > built-in default.
///
/// An unreadable or blank file falls through to the next source.
pub async fn load_system_prompt(config: &AgentConfig) -> String {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return trimmed.to_string();
                }
                warn!(path = file_path.as_str(), "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt {
        let trimmed = prompt.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    DEFAULT_SYSTEM_PROMPT.to_string()
}
