use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("severity level {0} is outside 0..=8")]
    InvalidLevel(i64),
    #[error("unknown severity level `{0}`")]
    UnknownLevel(String),
    #[error("channel `{channel}` is bound to backend `{bound}`, requested `{requested}`")]
    BackendMismatch {
        channel: String,
        bound: &'static str,
        requested: &'static str,
    },
    #[error("channel table is full ({capacity} channels)")]
    CapacityExhausted { capacity: usize },
    #[error("a fixed channel table needs a non-zero capacity")]
    ZeroCapacity,
    #[error("cannot allocate a channel table of {capacity} channels")]
    AllocationFailed { capacity: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
