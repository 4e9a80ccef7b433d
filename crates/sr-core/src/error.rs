//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SrError` as one variant
//! where they need to surface configuration problems.

use thiserror::Error;

/// The top-level error type for `sr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SrError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `sr-*` crates.
pub type SrResult<T> = Result<T, SrError>;
