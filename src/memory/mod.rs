//! Token-level conversation memory.
//!
//! Every completed entry is split into a chain of token nodes. Utterance
//! summaries link each entry to the one before it, and the replayer
//! expands the newest summaries back into their tokens.

pub mod graph;
pub mod inferencer;
pub mod replay;

pub use graph::{GraphMemory, NodeId, TokenNode, UtteranceSummary};
pub use inferencer::{KeywordInferencer, SymbolicInferencer, LOONEY_TUNES_GROUP};
pub use replay::{Replayer, REPLAY_DEPTH};
