use thiserror::Error;

use trainsim_core::{DeviceId, NodeId};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("no vertex at position matching client {0} request")]
    UnresolvedPosition(DeviceId),

    #[error(transparent)]
    Map(#[from] trainsim_map::MapError),

    #[error(transparent)]
    Net(#[from] trainsim_net::NetError),

    #[error(transparent)]
    Semaphore(#[from] trainsim_semaphore::SemaphoreError),

    #[error("train has no current node (path entry {0} unreachable)")]
    NoCurrentNode(NodeId),
}

pub type AgentResult<T> = Result<T, AgentError>;
