//! Common base error type.
//!
//! Sub-crates define their own error enums and convert into/from `CoreError`
//! via `From` impls, or wrap it as one variant, following the same pattern as
//! every other crate's `XxxError`.

use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
