use serde::{Deserialize, Serialize};

use crate::conversation::EntryId;
use crate::engine::{ShiftSeverity, ToneDimension};
use crate::error::SubmitError;

// Allowed: IDs, labels, percentages, durations, counts
// Forbidden: input text, tokens, responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    SubmissionAccepted,

    SubmissionRejected {
        reason: RejectionReason,
    },

    AnalysisCompleted {
        entry_id: EntryId,
        dominant: ToneDimension,
        intensity_pct: u32,
        latency_ms: u64,
    },

    FieldShiftDetected {
        dimension: ToneDimension,
        severity: ShiftSeverity,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionReason {
    Empty,
    Busy,
}

impl From<SubmitError> for RejectionReason {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Empty => RejectionReason::Empty,
            SubmitError::Busy => RejectionReason::Busy,
        }
    }
}
