use thiserror::Error;

use trainsim_core::DeviceId;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("device {0} is not registered on the bus")]
    UnregisteredDevice(DeviceId),
}

pub type NetResult<T> = Result<T, NetError>;
