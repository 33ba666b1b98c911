use thiserror::Error;

/// All possible errors while sorting
#[derive(Error, Debug)]
pub enum TsortError {
    #[error("input contains an odd number of tokens")]
    OddTokenCount,

    #[error("no node became ready after breaking a loop ({remaining} nodes remain)")]
    Stalled { remaining: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TsortError>;
