use crate::cli::Input;
use crate::sort::{SortReport, tsort};
use anyhow::Context;
use std::io::{self, BufWriter};

/// Handle a sort of `input`, writing keys to stdout and loop reports to stderr
pub fn handle_sort(input: &Input) -> anyhow::Result<SortReport> {
    let reader = input.open().with_context(|| input.to_string())?;

    let mut out = BufWriter::new(io::stdout().lock());
    let mut diag = io::stderr().lock();

    let report = tsort(reader, &mut out, &mut diag)?;
    Ok(report)
}
