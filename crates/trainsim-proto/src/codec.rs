//! The `;`-delimited `key=value` wire codec (spec §6).
//!
//! A message encodes to one self-delimiting line, e.g.:
//!
//! ```text
//! type=REQ;client=3;pickup_x=0;pickup_y=0;dropoff_x=10;dropoff_y=0
//! ```
//!
//! `decode(encode(m)) == m` for every representative payload (spec scenario
//! S6); this is exercised directly in `tests.rs`.

use std::collections::HashMap;

use trainsim_core::{DeviceId, Point};

use crate::error::{ProtoError, ProtoResult};
use crate::message::Message;

/// Encode a message to its wire form.
pub fn encode(msg: &Message) -> String {
    let mut fields: Vec<(&'static str, String)> = vec![("type", msg.type_tag().to_string())];

    match *msg {
        Message::Req { client, pickup, dropoff } => {
            fields.push(("client", client.0.to_string()));
            fields.push(("pickup_x", pickup.x.to_string()));
            fields.push(("pickup_y", pickup.y.to_string()));
            fields.push(("dropoff_x", dropoff.x.to_string()));
            fields.push(("dropoff_y", dropoff.y.to_string()));
        }
        Message::ReqAck { sender, client, receiver } => {
            fields.push(("sender", sender.0.to_string()));
            fields.push(("client", client.0.to_string()));
            fields.push(("receiver", receiver.0.to_string()));
        }
        Message::Elec { sender, client, distance } => {
            fields.push(("sender", sender.0.to_string()));
            fields.push(("client", client.0.to_string()));
            fields.push(("distance", distance.to_string()));
        }
        Message::ElecAck { sender, client, receiver } => {
            fields.push(("sender", sender.0.to_string()));
            fields.push(("client", client.0.to_string()));
            fields.push(("receiver", receiver.0.to_string()));
        }
        Message::Leader { sender, client } => {
            fields.push(("sender", sender.0.to_string()));
            fields.push(("client", client.0.to_string()));
        }
        Message::ReqAns { sender, client, receiver } => {
            fields.push(("sender", sender.0.to_string()));
            fields.push(("client", client.0.to_string()));
            fields.push(("receiver", receiver.0.to_string()));
        }
    }

    fields
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(";")
}

/// Decode a wire-form message. Field order is not significant.
pub fn decode(raw: &str) -> ProtoResult<Message> {
    let kv: HashMap<&str, &str> = raw
        .split(';')
        .filter(|s| !s.is_empty())
        .filter_map(|field| field.split_once('='))
        .collect();

    let field = |name: &'static str| -> ProtoResult<&str> {
        kv.get(name).copied().ok_or(ProtoError::MissingField(name))
    };
    let device = |name: &'static str| -> ProtoResult<DeviceId> {
        let raw = field(name)?;
        raw.parse::<u32>()
            .map(DeviceId)
            .map_err(|_| ProtoError::InvalidValue { field: name, value: raw.to_string() })
    };
    let float = |name: &'static str| -> ProtoResult<f32> {
        let raw = field(name)?;
        raw.parse::<f32>()
            .map_err(|_| ProtoError::InvalidValue { field: name, value: raw.to_string() })
    };

    match field("type")? {
        "REQ" => Ok(Message::Req {
            client: device("client")?,
            pickup: Point::new(float("pickup_x")?, float("pickup_y")?),
            dropoff: Point::new(float("dropoff_x")?, float("dropoff_y")?),
        }),
        "REQ_ACK" => Ok(Message::ReqAck {
            sender: device("sender")?,
            client: device("client")?,
            receiver: device("receiver")?,
        }),
        "ELEC" => Ok(Message::Elec {
            sender: device("sender")?,
            client: device("client")?,
            distance: float("distance")?,
        }),
        "ELEC_ACK" => Ok(Message::ElecAck {
            sender: device("sender")?,
            client: device("client")?,
            receiver: device("receiver")?,
        }),
        "LEADER" => Ok(Message::Leader { sender: device("sender")?, client: device("client")? }),
        "REQ_ANS" => Ok(Message::ReqAns {
            sender: device("sender")?,
            client: device("client")?,
            receiver: device("receiver")?,
        }),
        other => Err(ProtoError::UnknownType(other.to_string())),
    }
}
