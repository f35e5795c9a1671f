//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Environment variable naming the model to use.
pub const MODEL_ENV_VAR: &str = "OPENROUTER_MODEL";

/// Configuration surface of the pipeline.
///
/// Alters which model answers and how records are tagged; never the
/// reconciliation algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model identifier passed to the AI collaborator.
    ///
    /// Default: `openai/gpt-4o`.
    pub model: String,

    /// Prompt revision tag, stamped on every final record.
    pub prompt_version: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "openai/gpt-4o".to_string(),
            prompt_version: "2025-12-02-01".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the model from `OPENROUTER_MODEL`, falling back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var(MODEL_ENV_VAR) {
            if !model.is_empty() {
                config.model = model;
            }
        }
        config
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the prompt revision tag.
    pub fn with_prompt_version(mut self, version: impl Into<String>) -> Self {
        self.prompt_version = version.into();
        self
    }
}
