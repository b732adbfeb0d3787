use tracing::debug;

use super::random::{EntropySource, RandomSource};
use crate::analyzer::TokenQualifier;
use crate::conversation::Analysis;
use crate::engine::{ToneEngine, ToneResult};
use crate::persona::Persona;

/// Synchronous analysis step: tokenize, score tone, pick the dominant
/// tone, react. No I/O, no timers, no history.
///
/// Both the qualifier and the tone engine read the same raw string and
/// share one random source, tokens drawing first.
pub struct Analyzer {
    qualifier: TokenQualifier,
    engine: ToneEngine,
    persona: Persona,
    rng: Box<dyn RandomSource>,
}

impl Analyzer {
    pub fn new(persona: Persona, rng: Box<dyn RandomSource>) -> Self {
        Self {
            qualifier: TokenQualifier::new(),
            engine: ToneEngine::new(),
            persona,
            rng,
        }
    }

    pub fn with_entropy(persona: Persona) -> Self {
        Self::new(persona, Box::new(EntropySource::new()))
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// `text` must be non-empty after trimming; the caller enforces this.
    pub fn analyze(&mut self, text: &str) -> Analysis {
        let tokens = self.qualifier.qualify(text, self.rng.as_mut());
        let vector = self.engine.infer(text, self.rng.as_mut());
        let tone = ToneResult::from_vector(vector);
        let response = self.persona.react(&tone);
        let shifts = self.persona.observe_shifts(&tone);

        debug!(
            tokens = tokens.len(),
            dominant = %tone.dominant_tone,
            intensity = tone.intensity,
            shifts = shifts.len(),
            "Analysis complete"
        );

        Analysis {
            tokens,
            tone,
            response,
            shifts,
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("persona", &self.persona)
            .finish_non_exhaustive()
    }
}
