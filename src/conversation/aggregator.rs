use chrono::Utc;

use super::types::{Analysis, ConversationEntry, EntryId};
use super::views::{self, RadarPoint, TimelinePoint, TIMELINE_WINDOW};
use crate::engine::ToneVector;

/// Owns the append-only conversation history and the current-tone cell.
///
/// Invariants:
/// - entries are appended in creation order with strictly increasing ids
/// - entries are never edited, reordered or removed
/// - `current_tone` is replaced wholesale by each new entry's vector
///
/// The radar and timeline views are recomputed from this state on every
/// call and never stored.
#[derive(Debug, Clone)]
pub struct Aggregator {
    history: Vec<ConversationEntry>,
    current_tone: ToneVector,
    next_id: u64,
    timeline_window: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_window(TIMELINE_WINDOW)
    }

    /// A window of 0 is raised to 1.
    pub fn with_window(timeline_window: usize) -> Self {
        Self {
            history: Vec::new(),
            current_tone: ToneVector::neutral(),
            next_id: 1,
            timeline_window: timeline_window.max(1),
        }
    }

    /// Stamps a completed analysis with an id and timestamp, appends it to
    /// history and makes its vector the current tone.
    pub fn record(&mut self, input: impl Into<String>, analysis: Analysis) -> ConversationEntry {
        let id = EntryId(self.next_id);
        self.next_id += 1;

        let entry = ConversationEntry {
            id,
            timestamp: Utc::now(),
            input: input.into(),
            tone: analysis.tone,
            tokens: analysis.tokens,
            response: analysis.response,
            shifts: analysis.shifts,
        };

        self.current_tone = entry.tone.vector;
        self.history.push(entry.clone());
        entry
    }

    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    pub fn current_tone(&self) -> ToneVector {
        self.current_tone
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn timeline_window(&self) -> usize {
        self.timeline_window
    }

    /// Last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[ConversationEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn radar(&self) -> Vec<RadarPoint> {
        views::radar(&self.current_tone)
    }

    pub fn timeline(&self) -> Vec<TimelinePoint> {
        views::timeline(&self.history, self.timeline_window)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
