//! `trainsim-proto` — the wire message vocabulary and its textual codec.
//!
//! # Crate layout
//!
//! | Module    | Contents                                    |
//! |-----------|----------------------------------------------|
//! | [`message`] | `Message`, the six election/dispatch variants |
//! | [`codec`]   | `encode`/`decode` for the `;`-delimited wire form |
//! | [`error`]   | `ProtoError`, `ProtoResult<T>`               |
//!
//! There is no real socket here (spec: "no networking over real sockets;
//! messages are in-process broadcast") — the codec exists because the spec
//! requires messages to be "self-describing textual records", not because
//! anything in this simulation actually serializes bytes onto a wire. Any
//! future transport (real sockets, a replay log) can reuse this codec
//! unchanged.

pub mod codec;
pub mod error;
pub mod message;


pub use codec::{decode, encode};
pub use error::{ProtoError, ProtoResult};
pub use message::Message;
