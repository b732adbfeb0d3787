//! Pipeline telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. Nothing in the analysis
//! pipeline or the aggregator reads it back.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain user content (utterances, tokens, replies).
//! Only entry ids, tone labels, percentages and durations are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{RejectionReason, TelemetryEvent};
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::TelemetryRecorder;
