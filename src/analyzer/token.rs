use serde::{Deserialize, Serialize};

use crate::kernel::random::RandomSource;

/// Per-token confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Qualification {
    Qualified,
    Ambiguous,
    Unstable,
}

impl Qualification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualification::Qualified => "QUALIFIED",
            Qualification::Ambiguous => "AMBIGUOUS",
            Qualification::Unstable => "UNSTABLE",
        }
    }

    /// Maps one uniform draw onto the categorical distribution
    /// UNSTABLE 0.3 / AMBIGUOUS 0.3 / QUALIFIED 0.4.
    pub fn from_draw(u: f64) -> Self {
        if u >= UNSTABLE_FLOOR {
            Qualification::Unstable
        } else if u >= AMBIGUOUS_FLOOR {
            Qualification::Ambiguous
        } else {
            Qualification::Qualified
        }
    }
}

const UNSTABLE_FLOOR: f64 = 0.7;
const AMBIGUOUS_FLOOR: f64 = 0.4;

/// Exclusive upper bound for `field_intensity`.
pub const MAX_FIELD_INTENSITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
    /// Stand-in signal strength in [0, 0.8). Not derived from the token text.
    pub field_intensity: f64,
    pub qualification: Qualification,
}

/// Whitespace tokenizer that stamps each token with a random field
/// intensity and qualification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenQualifier;

impl TokenQualifier {
    pub fn new() -> Self {
        Self
    }

    /// Splits on whitespace with no further normalization. Two draws per
    /// token: field intensity, then qualification.
    pub fn qualify(&self, text: &str, rng: &mut dyn RandomSource) -> Vec<Token> {
        text.split_whitespace()
            .map(|segment| {
                let field_intensity = rng.next_unit() * MAX_FIELD_INTENSITY;
                let qualification = Qualification::from_draw(rng.next_unit());
                Token {
                    token: segment.to_string(),
                    field_intensity,
                    qualification,
                }
            })
            .collect()
    }
}
