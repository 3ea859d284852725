//! Error types for the resource pool

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid pool argument: {0}")]
    InvalidArgument(String),

    #[error("Pool is closed")]
    Closed,

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Maximum active resources limit reached")]
    Exhausted,
}

pub type PoolResult<T> = Result<T, PoolError>;
