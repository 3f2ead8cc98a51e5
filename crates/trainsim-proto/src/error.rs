//! Codec error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("unknown message type {0:?}")]
    UnknownType(String),

    #[error("message is missing field {0:?}")]
    MissingField(&'static str),

    #[error("field {field:?} has invalid value {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

pub type ProtoResult<T> = Result<T, ProtoError>;
