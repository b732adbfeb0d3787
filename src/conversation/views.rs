use serde::{Deserialize, Serialize};

use super::types::ConversationEntry;
use crate::engine::{ToneDimension, ToneVector};

/// Number of entries the timeline shows by default.
pub const TIMELINE_WINDOW: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub dimension: ToneDimension,
    pub label: String,
    /// `round(component * 100)`.
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// 1-based position inside the window.
    pub index: usize,
    /// `round(max component * 100)`.
    pub intensity: u32,
    pub dominant_tone: ToneDimension,
}

/// Scales a score to a whole percentage. Negative and NaN inputs map to 0.
pub fn to_percent(value: f64) -> u32 {
    let scaled = (value * 100.0).round();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        scaled as u32
    }
}

/// One point per dimension, declaration order.
pub fn radar(vector: &ToneVector) -> Vec<RadarPoint> {
    vector
        .iter()
        .map(|(dimension, value)| RadarPoint {
            dimension,
            label: dimension.label().to_string(),
            value: to_percent(value),
        })
        .collect()
}

/// The last `window` entries of `history`, oldest first.
pub fn timeline(history: &[ConversationEntry], window: usize) -> Vec<TimelinePoint> {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .enumerate()
        .map(|(i, entry)| TimelinePoint {
            index: i + 1,
            intensity: to_percent(entry.tone.vector.intensity()),
            dominant_tone: entry.tone.dominant_tone,
        })
        .collect()
}
