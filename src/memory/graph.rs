use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

use super::inferencer::{KeywordInferencer, SymbolicInferencer};
use crate::conversation::{ConversationEntry, EntryId};
use crate::engine::ToneDimension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One token of a stored utterance. Tokens of the same utterance form a
/// chain: each node points at the token before it and lists the tokens
/// after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenNode {
    pub id: NodeId,
    pub text: String,
    /// Dominant tone of the owning utterance.
    pub tone: ToneDimension,
    pub field_intensity: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub symbols: Vec<String>,
    pub link_groups: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Utterance-level record. Summaries are linked back to the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceSummary {
    pub utterance_id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub dominant_tone: ToneDimension,
    pub token_ids: Vec<NodeId>,
    pub prev_utterance_id: Option<EntryId>,
}

/// In-memory token graph of the conversation. Nothing is persisted.
pub struct GraphMemory {
    nodes: HashMap<NodeId, TokenNode>,
    utterances: Vec<UtteranceSummary>,
    link_groups: BTreeMap<String, Vec<NodeId>>,
    inferencer: Box<dyn SymbolicInferencer>,
}

impl GraphMemory {
    pub fn new() -> Self {
        Self::with_inferencer(Box::new(KeywordInferencer))
    }

    pub fn with_inferencer(inferencer: Box<dyn SymbolicInferencer>) -> Self {
        Self {
            nodes: HashMap::new(),
            utterances: Vec::new(),
            link_groups: BTreeMap::new(),
            inferencer,
        }
    }

    /// Adds one node per token, chained in utterance order, and appends a
    /// summary that points at the previous utterance.
    pub fn store_entry(&mut self, entry: &ConversationEntry) -> &UtteranceSummary {
        let tone = entry.tone.dominant_tone;
        let mut token_ids = Vec::with_capacity(entry.tokens.len());
        let mut prev: Option<NodeId> = None;

        for token in &entry.tokens {
            let symbols = self.inferencer.infer_symbols(&token.token);
            let link_groups = self.inferencer.infer_link_groups(&symbols);
            let node = TokenNode {
                id: NodeId::new(),
                text: token.token.clone(),
                tone,
                field_intensity: token.field_intensity,
                parent: prev,
                children: Vec::new(),
                symbols,
                link_groups,
                timestamp: entry.timestamp,
            };

            if let Some(parent) = prev.and_then(|id| self.nodes.get_mut(&id)) {
                parent.children.push(node.id);
            }
            for group in &node.link_groups {
                self.link_groups
                    .entry(group.clone())
                    .or_default()
                    .push(node.id);
            }

            prev = Some(node.id);
            token_ids.push(node.id);
            self.nodes.insert(node.id, node);
        }

        let prev_utterance_id = self.utterances.last().map(|u| u.utterance_id);
        self.utterances.push(UtteranceSummary {
            utterance_id: entry.id,
            timestamp: entry.timestamp,
            dominant_tone: tone,
            token_ids,
            prev_utterance_id,
        });
        &self.utterances[self.utterances.len() - 1]
    }

    /// Last `n` summaries, oldest first.
    pub fn fetch_recent(&self, n: usize) -> &[UtteranceSummary] {
        let start = self.utterances.len().saturating_sub(n);
        &self.utterances[start..]
    }

    /// Token nodes of one utterance in token order.
    pub fn expand(&self, summary: &UtteranceSummary) -> Vec<TokenNode> {
        summary
            .token_ids
            .iter()
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect()
    }

    pub fn node(&self, id: NodeId) -> Option<&TokenNode> {
        self.nodes.get(&id)
    }

    /// Nodes that joined `group`, in insertion order.
    pub fn link_group(&self, group: &str) -> &[NodeId] {
        self.link_groups
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn utterances(&self) -> &[UtteranceSummary] {
        &self.utterances
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }
}

impl Default for GraphMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphMemory")
            .field("utterances", &self.utterances.len())
            .field("nodes", &self.nodes.len())
            .field("link_groups", &self.link_groups.len())
            .finish_non_exhaustive()
    }
}
