use serde::{Deserialize, Serialize};

use super::tone::{ToneDimension, ToneVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftSeverity {
    Mild,
    Moderate,
    Extreme,
}

impl ShiftSeverity {
    pub fn classify(delta: f64) -> Self {
        if delta > 0.6 {
            ShiftSeverity::Extreme
        } else if delta > 0.4 {
            ShiftSeverity::Moderate
        } else {
            ShiftSeverity::Mild
        }
    }
}

/// A dimension that moved far enough from the persona's baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldShift {
    pub dimension: ToneDimension,
    pub value: f64,
    pub threshold: f64,
    /// `|value - threshold|`, rounded to 3 decimals.
    pub delta: f64,
    pub severity: ShiftSeverity,
}

/// Per-dimension resting thresholds a persona expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    pub thresholds: ToneVector,
}

impl BaselineProfile {
    pub fn uniform(threshold: f64) -> Self {
        Self {
            thresholds: ToneVector::new(threshold, threshold, threshold, threshold, threshold),
        }
    }
}

impl Default for BaselineProfile {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

/// Compares every dimension against its threshold and reports those whose
/// distance exceeds `sensitivity`. Output follows declaration order.
pub fn detect_shifts(
    vector: &ToneVector,
    profile: &BaselineProfile,
    sensitivity: f64,
) -> Vec<FieldShift> {
    let mut shifts = Vec::new();
    for (dimension, value) in vector.iter() {
        let threshold = profile.thresholds.get(dimension);
        let delta = (value - threshold).abs();
        if delta <= sensitivity {
            continue;
        }
        shifts.push(FieldShift {
            dimension,
            value,
            threshold,
            delta: (delta * 1000.0).round() / 1000.0,
            severity: ShiftSeverity::classify(delta),
        });
    }
    shifts
}
