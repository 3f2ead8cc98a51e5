//! Map-subsystem error type.

use thiserror::Error;

use trainsim_core::{EdgeKey, NodeId};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in map")]
    NodeNotFound(NodeId),

    #[error("no vertex named {0:?}")]
    UnknownVertexName(String),

    #[error("edge {0} not found in map")]
    UnknownEdge(EdgeKey),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed map file ({file}): {reason}")]
    Malformed { file: &'static str, reason: String },
}

pub type MapResult<T> = Result<T, MapError>;
