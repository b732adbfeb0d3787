//! Heuristic affect analysis for a conversational companion.
//!
//! An utterance flows through the token qualifier and the tone engine, the
//! dominant tone picks a canned reply, and the aggregator appends the result
//! to an in-memory history that backs the radar and timeline views.
//! A token graph keeps every utterance for replay. `Companion` drives that
//! pipeline one submission at a time.

pub mod analyzer;
pub mod audit;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod memory;
pub mod persona;

pub use config::CompanionConfig;
pub use conversation::{Aggregator, ConversationEntry, EntryId};
pub use engine::{ToneDimension, ToneResult, ToneVector};
pub use error::{PipelineError, SubmitError};
pub use kernel::{Companion, CompanionView, Submission};
