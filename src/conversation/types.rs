use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analyzer::Token;
use crate::engine::{FieldShift, ToneResult};

/// Monotonic per-aggregator entry id. The first entry is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of one utterance and its full analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub input: String,
    pub tone: ToneResult,
    pub tokens: Vec<Token>,
    pub response: String,
    /// Empty when the persona does not detect shifts.
    #[serde(default)]
    pub shifts: Vec<FieldShift>,
}

/// Output of one pass through the analysis stages, before it is stamped
/// with an id and appended to history.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub tone: ToneResult,
    pub response: String,
    pub shifts: Vec<FieldShift>,
}
