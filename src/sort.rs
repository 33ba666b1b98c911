//! Top-level sort: read pairs, emit a total order, report loops.

use crate::error::{Result, TsortError};
use crate::graph::{self, Graph, Scheduler};
use crate::tokens::Tokens;
use std::io::{BufRead, Write};
use tracing::debug;

/// Summary of one sort run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortReport {
    /// Keys written to the output.
    pub emitted: usize,
    /// Loops that had to be broken, each listed as its member keys.
    pub cycles: Vec<Vec<Vec<u8>>>,
}

impl SortReport {
    /// True when the input described a partial order and no edge was dropped.
    pub fn is_total_order(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Sort the pairs read from `input`, writing keys to `out` and loop reports
/// to `diag`.
///
/// Nothing is written if the input is malformed.
pub fn tsort<R, W, D>(input: R, out: &mut W, diag: &mut D) -> Result<SortReport>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let mut graph = Graph::build(Tokens::new(input))?;
    sort_graph(&mut graph, out, diag)
}

/// Emit every node of an already built graph.
pub fn sort_graph<W, D>(graph: &mut Graph, out: &mut W, diag: &mut D) -> Result<SortReport>
where
    W: Write,
    D: Write,
{
    let mut scheduler = Scheduler::new(graph);
    let mut report = SortReport::default();

    while scheduler.remaining() > 0 {
        scheduler.seed(graph);
        report.emitted += scheduler.drain(graph, out)?;

        if scheduler.remaining() == 0 {
            break;
        }

        // Flush sorted output first so it precedes the loop report when
        // both streams share a terminal.
        out.flush()?;

        let Some(members) = graph::break_cycle(graph) else {
            return Err(TsortError::Stalled {
                remaining: scheduler.remaining(),
            });
        };
        graph::cycle::write_report(graph, &members, diag)?;
        report
            .cycles
            .push(members.iter().map(|&id| graph.key(id).to_vec()).collect());
    }

    out.flush()?;
    debug!(
        emitted = report.emitted,
        loops = report.cycles.len(),
        "sort finished"
    );
    Ok(report)
}
