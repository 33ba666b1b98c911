//! Dependency graph built from token pairs, plus the passes that order it.

pub mod cycle;
pub mod topology;

pub use cycle::break_cycle;
pub use topology::Scheduler;

use crate::error::{Result, TsortError};
use crate::registry::{NodeId, Registry};
use std::io;
use tracing::debug;

/// Phase-scoped link carried by every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Link {
    /// Not part of the ready list or of a cycle scan.
    #[default]
    Unused,
    /// Queued for emission; holds the next node of the ready list.
    Queued(Option<NodeId>),
    /// Visited by a cycle scan; holds the node this one has an edge to.
    Scanning(Option<NodeId>),
}

/// Graph-side state of one key.
#[derive(Debug, Default)]
pub struct NodeState {
    /// Predecessor edges not yet retired.
    pub indegree: usize,
    /// Dependents, most recently recorded last. Visited in reverse.
    pub successors: Vec<NodeId>,
    pub emitted: bool,
    pub link: Link,
}

/// Keys plus the edges between them.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) registry: Registry,
    pub(crate) nodes: Vec<NodeState>,
    edges: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a token stream read as `(predecessor, successor)` pairs.
    pub fn build<I>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
    {
        let mut graph = Self::new();
        let mut pending: Option<NodeId> = None;

        for token in tokens {
            let id = graph.intern(&token?);
            match pending.take() {
                Some(pred) => graph.record_relation(pred, id),
                None => pending = Some(id),
            }
        }

        if pending.is_some() {
            return Err(TsortError::OddTokenCount);
        }

        debug!(nodes = graph.len(), edges = graph.edges, "graph built");
        Ok(graph)
    }

    /// Register `key`, returning its node id.
    pub fn intern(&mut self, key: &[u8]) -> NodeId {
        let id = self.registry.find_or_insert(key);
        if id == self.nodes.len() {
            self.nodes.push(NodeState::default());
        }
        id
    }

    /// Record that `pred` must come before `succ`. Self-loops are ignored.
    pub fn record_relation(&mut self, pred: NodeId, succ: NodeId) {
        if pred == succ {
            return;
        }
        self.nodes[succ].indegree += 1;
        self.nodes[pred].successors.push(succ);
        self.edges += 1;
    }

    /// Remove one `pred -> succ` edge, the most recently recorded one.
    ///
    /// Returns false if no such edge exists.
    pub fn retract_relation(&mut self, pred: NodeId, succ: NodeId) -> bool {
        let successors = &mut self.nodes[pred].successors;
        let Some(pos) = successors.iter().rposition(|&s| s == succ) else {
            return false;
        };
        successors.remove(pos);
        self.nodes[succ].indegree -= 1;
        self.edges -= 1;
        true
    }

    /// Count the nodes by walking the registry.
    pub fn count_nodes(&self) -> usize {
        self.registry.in_order().count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of recorded edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn key(&self, id: NodeId) -> &[u8] {
        self.registry.key(id)
    }

    pub fn lookup(&self, key: &[u8]) -> Option<NodeId> {
        self.registry.get(key)
    }

    pub fn node(&self, id: NodeId) -> &NodeState {
        &self.nodes[id]
    }
}
