use serde::{Deserialize, Serialize};
use std::fmt;

use crate::kernel::random::RandomSource;

/// One axis of the affect space.
///
/// Declaration order is load-bearing: `ToneDimension::ALL` is the iteration
/// order for dominant-tone selection, and earlier dimensions win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneDimension {
    Joy,
    Fear,
    Anger,
    Sadness,
    Surprise,
}

impl ToneDimension {
    pub const ALL: [ToneDimension; 5] = [
        ToneDimension::Joy,
        ToneDimension::Fear,
        ToneDimension::Anger,
        ToneDimension::Sadness,
        ToneDimension::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneDimension::Joy => "joy",
            ToneDimension::Fear => "fear",
            ToneDimension::Anger => "anger",
            ToneDimension::Sadness => "sadness",
            ToneDimension::Surprise => "surprise",
        }
    }

    /// Capitalized display label ("Joy", "Fear", ...).
    pub fn label(&self) -> &'static str {
        match self {
            ToneDimension::Joy => "Joy",
            ToneDimension::Fear => "Fear",
            ToneDimension::Anger => "Anger",
            ToneDimension::Sadness => "Sadness",
            ToneDimension::Surprise => "Surprise",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }

    /// Upper bound (exclusive) of the random baseline for this dimension.
    pub fn baseline_cap(&self) -> f64 {
        self.cue().baseline_cap
    }

    /// Additive bonus applied when any cue word is present.
    pub fn cue_bonus(&self) -> f64 {
        self.cue().bonus
    }

    pub fn cue_words(&self) -> &'static [&'static str] {
        self.cue().words
    }

    fn cue(&self) -> &'static LexicalCue {
        &CUES[*self as usize]
    }
}

impl fmt::Display for ToneDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct LexicalCue {
    baseline_cap: f64,
    bonus: f64,
    words: &'static [&'static str],
}

// Indexed by `ToneDimension as usize`.
const CUES: [LexicalCue; 5] = [
    LexicalCue {
        baseline_cap: 0.8,
        bonus: 0.3,
        words: &["happy", "great"],
    },
    LexicalCue {
        baseline_cap: 0.6,
        bonus: 0.4,
        words: &["scared", "worried"],
    },
    LexicalCue {
        baseline_cap: 0.5,
        bonus: 0.5,
        words: &["angry", "mad"],
    },
    LexicalCue {
        baseline_cap: 0.6,
        bonus: 0.4,
        words: &["sad", "depressed"],
    },
    LexicalCue {
        baseline_cap: 0.7,
        bonus: 0.3,
        words: &["wow", "amazing"],
    },
];

/// Five non-negative affect scores. Components are independent; they are
/// not normalized against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneVector {
    pub joy: f64,
    pub fear: f64,
    pub anger: f64,
    pub sadness: f64,
    pub surprise: f64,
}

impl ToneVector {
    pub fn new(joy: f64, fear: f64, anger: f64, sadness: f64, surprise: f64) -> Self {
        Self {
            joy,
            fear,
            anger,
            sadness,
            surprise,
        }
    }

    /// Resting state shown before any utterance has been analyzed.
    pub fn neutral() -> Self {
        Self::new(0.2, 0.1, 0.1, 0.1, 0.1)
    }

    pub fn get(&self, dimension: ToneDimension) -> f64 {
        match dimension {
            ToneDimension::Joy => self.joy,
            ToneDimension::Fear => self.fear,
            ToneDimension::Anger => self.anger,
            ToneDimension::Sadness => self.sadness,
            ToneDimension::Surprise => self.surprise,
        }
    }

    pub fn set(&mut self, dimension: ToneDimension, value: f64) {
        match dimension {
            ToneDimension::Joy => self.joy = value,
            ToneDimension::Fear => self.fear = value,
            ToneDimension::Anger => self.anger = value,
            ToneDimension::Sadness => self.sadness = value,
            ToneDimension::Surprise => self.surprise = value,
        }
    }

    /// `(dimension, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ToneDimension, f64)> + '_ {
        ToneDimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Largest component.
    pub fn intensity(&self) -> f64 {
        self.iter().map(|(_, v)| v).fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for ToneVector {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Full tone analysis of one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneResult {
    pub dominant_tone: ToneDimension,
    /// Maximum component of `vector`.
    pub intensity: f64,
    pub vector: ToneVector,
}

impl ToneResult {
    pub fn from_vector(vector: ToneVector) -> Self {
        Self {
            dominant_tone: super::dominant::select_dominant(&vector),
            intensity: vector.intensity(),
            vector,
        }
    }
}

/// Lexical-cue tone scorer with a stochastic baseline mood.
///
/// Each dimension is `max(0, baseline + bonus)` where the baseline is a
/// uniform draw scaled by the dimension cap and the bonus fires on
/// case-sensitive substring containment of any cue word. Substring matching
/// is loose on purpose: "sad" also fires inside "sadly".
#[derive(Debug, Default, Clone, Copy)]
pub struct ToneEngine;

impl ToneEngine {
    pub fn new() -> Self {
        Self
    }

    /// Draws one baseline per dimension, in declaration order.
    pub fn infer(&self, text: &str, rng: &mut dyn RandomSource) -> ToneVector {
        let mut vector = ToneVector::new(0.0, 0.0, 0.0, 0.0, 0.0);
        for dimension in ToneDimension::ALL {
            let baseline = rng.next_unit() * dimension.baseline_cap();
            let bonus = if Self::cue_fires(text, dimension) {
                dimension.cue_bonus()
            } else {
                0.0
            };
            vector.set(dimension, (baseline + bonus).max(0.0));
        }
        vector
    }

    pub fn cue_fires(text: &str, dimension: ToneDimension) -> bool {
        dimension.cue_words().iter().any(|w| text.contains(w))
    }
}
