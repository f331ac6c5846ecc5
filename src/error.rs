use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("could not read pattern file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write pattern file {}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("pattern is not valid: {0}")]
    Parse(String),
    #[error("window {rows}x{cols} does not fit in the {max_rows}x{max_cols} grid")]
    WindowTooLarge {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },
    #[error("stop the simulation first")]
    Running,
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
