//! Finding and breaking loops once no node is ready.

use super::{Graph, Link, NodeState};
use crate::registry::{NodeId, Registry};
use std::io::{self, Write};
use tracing::debug;

/// Header written to the diagnostic stream before each loop.
pub const LOOP_HEADER: &str = "tsort: input contains a loop:";

/// Outcome of one walk over the registry.
enum Pass {
    /// `k` is already in the chain and has an edge to its head.
    Closed(NodeId),
    /// The chain gained at least one node.
    Extended,
    /// Nothing changed.
    Idle,
}

/// Walk the registry once, growing a chain of predecessors in front of `head`.
///
/// Every node pushed has an edge to the previous head, so following the
/// [`Link::Scanning`] links from the head walks edges forward. The first node
/// of a scan has no link yet and may be pushed a second time, which closes
/// the chain into a ring.
fn scan_pass(registry: &Registry, nodes: &mut [NodeState], head: &mut Option<NodeId>) -> Pass {
    let mut pass = Pass::Idle;

    for k in registry.in_order() {
        let node = &nodes[k];
        if node.emitted || node.indegree == 0 {
            continue;
        }

        let Some(h) = *head else {
            nodes[k].link = Link::Scanning(None);
            *head = Some(k);
            pass = Pass::Extended;
            continue;
        };

        if !node.successors.contains(&h) {
            continue;
        }
        if matches!(node.link, Link::Scanning(Some(_))) {
            return Pass::Closed(k);
        }

        nodes[k].link = Link::Scanning(Some(h));
        *head = Some(k);
        pass = Pass::Extended;
    }

    pass
}

/// Members of the chain from `head` up to and including `last`.
fn chain_members(nodes: &[NodeState], head: NodeId, last: NodeId) -> Vec<NodeId> {
    let mut members = vec![head];
    let mut at = head;
    while at != last {
        let Link::Scanning(Some(next)) = nodes[at].link else {
            break;
        };
        at = next;
        members.push(at);
    }
    members
}

fn clear_chain(nodes: &mut [NodeState], head: Option<NodeId>) {
    let mut at = head;
    while let Some(id) = at {
        at = match std::mem::take(&mut nodes[id].link) {
            Link::Scanning(next) => next,
            _ => None,
        };
    }
}

/// Find one loop among the unemitted nodes and retract one of its edges.
///
/// Returns the loop members in edge order, starting with the node whose
/// in-degree was reduced, or `None` if no loop could be found.
pub fn break_cycle(graph: &mut Graph) -> Option<Vec<NodeId>> {
    let mut head = None;

    let closing = loop {
        match scan_pass(&graph.registry, &mut graph.nodes, &mut head) {
            Pass::Closed(k) => break Some(k),
            Pass::Extended => continue,
            Pass::Idle => break None,
        }
    };

    let members = match (closing, head) {
        (Some(k), Some(h)) => Some((k, h, chain_members(&graph.nodes, h, k))),
        _ => None,
    };
    clear_chain(&mut graph.nodes, head);

    let (k, h, members) = members?;
    graph.retract_relation(k, h);
    debug!(
        length = members.len(),
        freed = %String::from_utf8_lossy(graph.key(h)),
        "broke loop"
    );
    Some(members)
}

/// Write the loop report for `members` to `diag`.
pub fn write_report<W: Write>(graph: &Graph, members: &[NodeId], diag: &mut W) -> io::Result<()> {
    writeln!(diag, "{LOOP_HEADER}")?;
    for &id in members {
        diag.write_all(b"tsort: ")?;
        diag.write_all(graph.key(id))?;
        diag.write_all(b"\n")?;
    }
    diag.flush()
}
