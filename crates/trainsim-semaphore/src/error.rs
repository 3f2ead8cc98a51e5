use thiserror::Error;

use trainsim_core::EdgeKey;

#[derive(Debug, Error)]
pub enum SemaphoreError {
    #[error("edge {0} is not registered with this semaphore")]
    UnknownEdge(EdgeKey),
}

pub type SemaphoreResult<T> = Result<T, SemaphoreError>;
