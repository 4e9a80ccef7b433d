use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("{0} must not be empty")]
    EmptyReference(&'static str),

    #[error("{what} length {got} does not match expected length {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{what} decreases at index {index}")]
    NotMonotonic {
        what:  &'static str,
        index: usize,
    },

    #[error("timestamp {0} is outside the representable calendar range")]
    TimestampOutOfRange(i64),
}

pub type AlignResult<T> = Result<T, AlignError>;
