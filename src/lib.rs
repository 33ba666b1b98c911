pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod graph;
pub mod registry;
pub mod sort;
pub mod tokens;

pub use error::{Result, TsortError};
pub use sort::{SortReport, sort_graph, tsort};
