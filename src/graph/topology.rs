//! Kahn-style emission driven by a singly linked ready list.

use super::{Graph, Link, NodeState};
use crate::registry::NodeId;
use std::io::{self, Write};
use tracing::trace;

/// FIFO of ready nodes, chained through each node's [`Link::Queued`] slot.
#[derive(Debug, Default)]
struct ReadyList {
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl ReadyList {
    fn push(&mut self, nodes: &mut [NodeState], id: NodeId) {
        nodes[id].link = Link::Queued(None);
        match self.tail {
            Some(tail) => nodes[tail].link = Link::Queued(Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    fn pop(&mut self, nodes: &mut [NodeState]) -> Option<NodeId> {
        let id = self.head?;
        self.head = match std::mem::take(&mut nodes[id].link) {
            Link::Queued(next) => next,
            _ => None,
        };
        if self.head.is_none() {
            self.tail = None;
        }
        Some(id)
    }
}

/// Emission state threaded through the seed, drain and cycle-breaking phases.
#[derive(Debug)]
pub struct Scheduler {
    ready: ReadyList,
    remaining: usize,
}

impl Scheduler {
    pub fn new(graph: &Graph) -> Self {
        Self {
            ready: ReadyList::default(),
            remaining: graph.count_nodes(),
        }
    }

    /// Nodes not yet emitted.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Queue every unemitted node without predecessors, in key order.
    ///
    /// Returns the number of nodes queued.
    pub fn seed(&mut self, graph: &mut Graph) -> usize {
        let Graph {
            registry, nodes, ..
        } = graph;

        let mut queued = 0;
        for id in registry.in_order() {
            let node = &nodes[id];
            if node.indegree == 0 && !node.emitted && node.link == Link::Unused {
                self.ready.push(nodes, id);
                queued += 1;
            }
        }

        trace!(queued, remaining = self.remaining, "seeded ready list");
        queued
    }

    /// Emit queued nodes until the ready list runs dry.
    ///
    /// Nodes freed along the way join the tail of the list in the order they
    /// become ready. Returns the number of nodes written.
    pub fn drain<W: Write>(&mut self, graph: &mut Graph, out: &mut W) -> io::Result<usize> {
        let mut written = 0;

        while let Some(id) = self.ready.pop(&mut graph.nodes) {
            out.write_all(graph.registry.key(id))?;
            out.write_all(b"\n")?;
            graph.nodes[id].emitted = true;
            self.remaining -= 1;
            written += 1;

            for i in (0..graph.nodes[id].successors.len()).rev() {
                let succ = graph.nodes[id].successors[i];
                let target = &mut graph.nodes[succ];
                target.indegree -= 1;
                if target.indegree == 0 {
                    self.ready.push(&mut graph.nodes, succ);
                }
            }
        }

        Ok(written)
    }
}
