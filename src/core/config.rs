//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::quiz::QuizMode;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the quiz shuffle RNG.
    /// Same seed produces the same card order.
    pub seed: u64,

    /// Key the persistence transport stores the flushed snapshot under.
    pub storage_key: String,

    /// Base name for exported files (`.json` is appended).
    pub export_file_name: String,

    /// Quiz mode active when the application starts.
    pub initial_quiz_mode: QuizMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            storage_key: "kanji-deck".to_string(),
            export_file_name: "Quiz".to_string(),
            initial_quiz_mode: QuizMode::Character,
        }
    }
}

impl EngineConfig {
    /// Use a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a custom local storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a custom export file name (without extension).
    #[must_use]
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Start in a different quiz mode.
    #[must_use]
    pub fn with_initial_quiz_mode(mut self, mode: QuizMode) -> Self {
        self.initial_quiz_mode = mode;
        self
    }

    /// File name handed to the download collaborator.
    #[must_use]
    pub fn export_file(&self) -> String {
        format!("{}.json", self.export_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.storage_key, "kanji-deck");
        assert_eq!(config.export_file(), "Quiz.json");
        assert_eq!(config.initial_quiz_mode, QuizMode::Character);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(123)
            .with_storage_key("deck")
            .with_export_file_name("Backup")
            .with_initial_quiz_mode(QuizMode::Onyomi);

        assert_eq!(config.seed, 123);
        assert_eq!(config.storage_key, "deck");
        assert_eq!(config.export_file(), "Backup.json");
        assert_eq!(config.initial_quiz_mode, QuizMode::Onyomi);
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
