//! The wire message vocabulary (spec §6).
//!
//! Every variant identifies the client whose request it concerns
//! (`client`), even `Elec`/`Leader` messages that are addressed to trains —
//! an election is always scoped to exactly one in-flight client request.

use trainsim_core::{DeviceId, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Broadcast by a client requesting transport. The client is its own
    /// sender, so no separate `sender` field is carried.
    Req { client: DeviceId, pickup: Point, dropoff: Point },

    /// Sent by a train to the client acknowledging it has queued the
    /// request for election.
    ReqAck { sender: DeviceId, client: DeviceId, receiver: DeviceId },

    /// Broadcast by a train entering the election for `client`, carrying
    /// its total candidate distance (spec §4.4 `simpleD + fullPathDistance()`).
    Elec { sender: DeviceId, client: DeviceId, distance: f32 },

    /// Sent by a train that lost a pairwise comparison, silencing the peer
    /// named in `receiver`.
    ElecAck { sender: DeviceId, client: DeviceId, receiver: DeviceId },

    /// Broadcast by the election winner to all trains once its timeout
    /// expires with no silencer received.
    Leader { sender: DeviceId, client: DeviceId },

    /// Sent by the election winner to the client, assigning the train.
    ReqAns { sender: DeviceId, client: DeviceId, receiver: DeviceId },
}

impl Message {
    /// The device that emitted this message.
    pub fn sender(&self) -> DeviceId {
        match *self {
            Message::Req { client, .. } => client,
            Message::ReqAck { sender, .. } => sender,
            Message::Elec { sender, .. } => sender,
            Message::ElecAck { sender, .. } => sender,
            Message::Leader { sender, .. } => sender,
            Message::ReqAns { sender, .. } => sender,
        }
    }

    /// The client that every variant of this message concerns.
    pub fn client(&self) -> DeviceId {
        match *self {
            Message::Req { client, .. } => client,
            Message::ReqAck { client, .. } => client,
            Message::Elec { client, .. } => client,
            Message::ElecAck { client, .. } => client,
            Message::Leader { client, .. } => client,
            Message::ReqAns { client, .. } => client,
        }
    }

    /// The device this message is addressed to, for the three
    /// peer-to-peer variants (`ReqAck`/`ElecAck`/`ReqAns`). `Req`/`Elec`/
    /// `Leader` are broadcast to every in-range device and have no single
    /// addressee.
    pub fn receiver(&self) -> Option<DeviceId> {
        match *self {
            Message::Req { .. } => None,
            Message::ReqAck { receiver, .. } => Some(receiver),
            Message::Elec { .. } => None,
            Message::ElecAck { receiver, .. } => Some(receiver),
            Message::Leader { .. } => None,
            Message::ReqAns { receiver, .. } => Some(receiver),
        }
    }

    /// Short type tag, used both by the codec and by trace logging.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Message::Req { .. } => "REQ",
            Message::ReqAck { .. } => "REQ_ACK",
            Message::Elec { .. } => "ELEC",
            Message::ElecAck { .. } => "ELEC_ACK",
            Message::Leader { .. } => "LEADER",
            Message::ReqAns { .. } => "REQ_ANS",
        }
    }
}
