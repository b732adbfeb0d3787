use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversation::TIMELINE_WINDOW;
use crate::error::ConfigError;
use crate::persona::{Persona, PersonaMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Simulated analysis cost per submission.
    pub processing_latency_ms: u64,
    pub timeline_window: usize,
    pub persona: PersonaMode,
    pub persona_name: String,
    /// Seeds the random source. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// NDJSON audit trail of completed entries.
    pub session_log: Option<PathBuf>,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            processing_latency_ms: 1000,
            timeline_window: TIMELINE_WINDOW,
            persona: PersonaMode::Companion,
            persona_name: "Jordan".to_string(),
            seed: None,
            session_log: None,
        }
    }
}

impl CompanionConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeline_window == 0 {
            return Err(ConfigError::Invalid(
                "timeline_window must be at least 1".to_string(),
            ));
        }
        if self.persona_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "persona_name must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.processing_latency_ms)
    }

    pub fn build_persona(&self) -> Persona {
        Persona::new(self.persona_name.clone(), self.persona)
    }
}
