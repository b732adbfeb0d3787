use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

use super::event::{RejectionReason, TelemetryEvent};
use crate::engine::{ShiftSeverity, ToneDimension};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub accepted: u64,
    pub rejected_empty: u64,
    pub rejected_busy: u64,
    pub completed: u64,
    pub dominant_counts: BTreeMap<ToneDimension, u64>,
    pub avg_latency_ms: f64,
    pub max_latency_ms: u64,
    pub shift_stats: ShiftStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShiftStats {
    pub mild: u64,
    pub moderate: u64,
    pub extreme: u64,
}

impl ShiftStats {
    pub fn total(&self) -> u64 {
        self.mild + self.moderate + self.extreme
    }
}

/// Pure fold over the recorded events.
pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();
    let mut total_latency_ms: u64 = 0;

    for event in events {
        match event {
            TelemetryEvent::SubmissionAccepted => snap.accepted += 1,
            TelemetryEvent::SubmissionRejected { reason } => match reason {
                RejectionReason::Empty => snap.rejected_empty += 1,
                RejectionReason::Busy => snap.rejected_busy += 1,
            },
            TelemetryEvent::AnalysisCompleted {
                dominant,
                latency_ms,
                ..
            } => {
                snap.completed += 1;
                *snap.dominant_counts.entry(*dominant).or_insert(0) += 1;
                total_latency_ms += latency_ms;
                snap.max_latency_ms = snap.max_latency_ms.max(*latency_ms);
            }
            TelemetryEvent::FieldShiftDetected { severity, .. } => match severity {
                ShiftSeverity::Mild => snap.shift_stats.mild += 1,
                ShiftSeverity::Moderate => snap.shift_stats.moderate += 1,
                ShiftSeverity::Extreme => snap.shift_stats.extreme += 1,
            },
        }
    }

    if snap.completed > 0 {
        snap.avg_latency_ms = total_latency_ms as f64 / snap.completed as f64;
    }

    snap
}

impl TelemetrySnapshot {
    /// Most frequent dominant tone; ties go to the earlier dimension.
    pub fn prevailing_tone(&self) -> Option<ToneDimension> {
        let mut best: Option<(ToneDimension, u64)> = None;
        for dimension in ToneDimension::ALL {
            let count = self.dominant_counts.get(&dimension).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((dimension, count)),
            }
        }
        best.map(|(d, _)| d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::EntryId;

    fn completed(id: u64, dominant: ToneDimension, latency_ms: u64) -> TelemetryEvent {
        TelemetryEvent::AnalysisCompleted {
            entry_id: EntryId(id),
            dominant,
            intensity_pct: 80,
            latency_ms,
        }
    }

    #[test]
    fn folds_counts_and_latency() {
        let events: VecDeque<_> = vec![
            TelemetryEvent::SubmissionAccepted,
            completed(1, ToneDimension::Fear, 100),
            TelemetryEvent::SubmissionRejected {
                reason: RejectionReason::Busy,
            },
            TelemetryEvent::SubmissionRejected {
                reason: RejectionReason::Empty,
            },
            TelemetryEvent::SubmissionAccepted,
            completed(2, ToneDimension::Joy, 300),
            TelemetryEvent::FieldShiftDetected {
                dimension: ToneDimension::Joy,
                severity: ShiftSeverity::Extreme,
            },
        ]
        .into();

        let snap = compute_snapshot(&events);
        assert_eq!(snap.accepted, 2);
        assert_eq!(snap.rejected_busy, 1);
        assert_eq!(snap.rejected_empty, 1);
        assert_eq!(snap.completed, 2);
        assert_eq!(snap.avg_latency_ms, 200.0);
        assert_eq!(snap.max_latency_ms, 300);
        assert_eq!(snap.shift_stats.extreme, 1);
        assert_eq!(snap.shift_stats.total(), 1);
        assert_eq!(snap.prevailing_tone(), Some(ToneDimension::Joy));
    }

    #[test]
    fn empty_buffer() {
        let snap = compute_snapshot(&VecDeque::new());
        assert_eq!(snap, TelemetrySnapshot::default());
        assert_eq!(snap.prevailing_tone(), None);
    }
}
