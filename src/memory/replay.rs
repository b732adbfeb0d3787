use super::graph::{GraphMemory, TokenNode};

/// How many utterances `Replayer::replay_default` expands.
pub const REPLAY_DEPTH: usize = 5;

/// Walks the most recent utterances back out into their token nodes.
#[derive(Debug, Clone, Copy)]
pub struct Replayer<'a> {
    memory: &'a GraphMemory,
}

impl<'a> Replayer<'a> {
    pub fn new(memory: &'a GraphMemory) -> Self {
        Self { memory }
    }

    /// One token list per utterance for the last `n` utterances, oldest
    /// first.
    pub fn replay(&self, n: usize) -> Vec<Vec<TokenNode>> {
        self.memory
            .fetch_recent(n)
            .iter()
            .map(|summary| self.memory.expand(summary))
            .collect()
    }

    pub fn replay_default(&self) -> Vec<Vec<TokenNode>> {
        self.replay(REPLAY_DEPTH)
    }
}
