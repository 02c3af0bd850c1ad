// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::SovaConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SovaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.knowledge.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "knowledge.path must not be empty".to_string(),
        });
    }

    if config.knowledge.top_n == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.top_n must be at least 1".to_string(),
        });
    }

    if config.knowledge.embed_batch_size == 0 {
        errors.push(ConfigError::Validation {
            message: "knowledge.embed_batch_size must be at least 1".to_string(),
        });
    }

    // The system message plus at least one turn.
    if config.memory.max_history < 2 {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.max_history must be at least 2, got {}",
                config.memory.max_history
            ),
        });
    }

    if config.provider.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "provider.base_url must not be empty".to_string(),
        });
    }

    if config.provider.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "provider.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(temperature) = config.provider.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "provider.temperature must be between 0.0 and 2.0, got {temperature}"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn parsed_section_defaults_validate() {
        let config: SovaConfig = toml::from_str("[knowledge]\ntop_n = 5\n").unwrap();
        assert_eq!(config.knowledge.top_n, 5);
        assert_eq!(config.memory.max_history, 10);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn parsed_zero_batch_size_fails_validation() {
        let config: SovaConfig =
            toml::from_str("[knowledge]\nembed_batch_size = 0\n").unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "embed_batch_size"));
    }

    #[test]
    fn unknown_field_rejected_by_deserializer() {
        assert!(toml::from_str::<SovaConfig>("[memory]\nmax_turns = 4\n").is_err());
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SovaConfig::default()).is_ok());
    }

    #[test]
    fn empty_knowledge_path_fails_validation() {
        let mut config = SovaConfig::default();
        config.knowledge.path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "knowledge.path"));
    }

    #[test]
    fn zero_top_n_fails_validation() {
        let mut config = SovaConfig::default();
        config.knowledge.top_n = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "top_n"));
    }

    #[test]
    fn history_must_hold_system_message_and_a_turn() {
        let mut config = SovaConfig::default();
        config.memory.max_history = 1;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "max_history"));

        config.memory.max_history = 2;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SovaConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log_level"));
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let mut config = SovaConfig::default();
        config.provider.temperature = Some(3.5);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "temperature"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SovaConfig::default();
        config.knowledge.path = String::new();
        config.knowledge.embed_batch_size = 0;
        config.provider.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
