use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace {0:?} has no samples")]
    Empty(String),

    #[error("trace {trace:?} is not contiguous: expected timestep {expected}, found {found}")]
    Gap {
        trace:    String,
        expected: i64,
        found:    i64,
    },

    #[error("trace {trace:?} sample at timestep {timestep} has a non-finite coordinate or heading")]
    NonFinite { trace: String, timestep: i64 },

    #[error("invalid trace parameters: {0}")]
    Params(String),

    #[error("trace parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TraceResult<T> = Result<T, TraceError>;
