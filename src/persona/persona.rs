use serde::{Deserialize, Serialize};
use tracing::info;

use super::response;
use crate::engine::{detect_shifts, BaselineProfile, FieldShift, ToneResult};

pub const UTILITY_REPLY: &str = "How can I assist you today?";

/// How much of the affect pipeline a persona pays attention to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaMode {
    /// Plain assistant: ignores tone, never reports shifts.
    Utility,
    #[default]
    Companion,
    /// Companion with a tighter shift sensitivity.
    Therapist,
    /// Companion that also logs every detected shift.
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonaConfig {
    pub mode: PersonaMode,
    pub track_tone: bool,
    pub detect_shifts: bool,
    pub field_shift_sensitivity: f64,
    pub enable_debug_output: bool,
}

impl PersonaConfig {
    pub fn for_mode(mode: PersonaMode) -> Self {
        let mut config = Self {
            mode,
            track_tone: false,
            detect_shifts: false,
            field_shift_sensitivity: 0.4,
            enable_debug_output: false,
        };
        match mode {
            PersonaMode::Utility => {}
            PersonaMode::Companion => {
                config.track_tone = true;
                config.detect_shifts = true;
            }
            PersonaMode::Therapist => {
                config.track_tone = true;
                config.detect_shifts = true;
                config.field_shift_sensitivity = 0.25;
            }
            PersonaMode::Debug => {
                config.track_tone = true;
                config.detect_shifts = true;
                config.enable_debug_output = true;
            }
        }
        config
    }
}

impl From<PersonaMode> for PersonaConfig {
    fn from(mode: PersonaMode) -> Self {
        Self::for_mode(mode)
    }
}

/// The voice that turns a tone analysis into a reply.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub config: PersonaConfig,
    pub profile: BaselineProfile,
}

impl Persona {
    pub fn new(name: impl Into<String>, mode: PersonaMode) -> Self {
        Self {
            name: name.into(),
            config: PersonaConfig::for_mode(mode),
            profile: BaselineProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: BaselineProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn react(&self, tone: &ToneResult) -> String {
        if self.config.track_tone {
            response::synthesize(tone.dominant_tone.as_str()).to_string()
        } else {
            UTILITY_REPLY.to_string()
        }
    }

    /// Empty unless the mode enables shift detection.
    pub fn observe_shifts(&self, tone: &ToneResult) -> Vec<FieldShift> {
        if !self.config.detect_shifts {
            return Vec::new();
        }
        let shifts = detect_shifts(
            &tone.vector,
            &self.profile,
            self.config.field_shift_sensitivity,
        );
        if self.config.enable_debug_output {
            for shift in &shifts {
                info!(
                    persona = %self.name,
                    dimension = %shift.dimension,
                    delta = shift.delta,
                    severity = ?shift.severity,
                    "Field shift detected"
                );
            }
        }
        shifts
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new("Jordan", PersonaMode::Companion)
    }
}
