pub mod analysis;
pub mod companion;
pub mod random;
pub mod telemetry;

pub use analysis::Analyzer;
pub use companion::{Companion, CompanionView, Submission};
pub use random::{EntropySource, RandomSource, ScriptedSource};
