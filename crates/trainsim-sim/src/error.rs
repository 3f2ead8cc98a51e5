use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Map(#[from] trainsim_map::MapError),

    #[error(transparent)]
    Net(#[from] trainsim_net::NetError),

    #[error(transparent)]
    Semaphore(#[from] trainsim_semaphore::SemaphoreError),

    #[error(transparent)]
    Agent(#[from] trainsim_agents::AgentError),

    #[error("simulation configuration error: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;
