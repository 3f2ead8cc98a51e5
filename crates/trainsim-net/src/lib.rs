//! `trainsim-net` — the in-process broadcast bus (spec §5).
//!
//! There are no real sockets here (spec Non-goals: "no networking over real
//! sockets; messages are in-process broadcast"). The bus models a radio
//! medium: each registered device publishes at a role-specific range, and
//! delivery is an immediate, reliable push into the receiver's FIFO inbox
//! for every device within that range — with no guarantee about the
//! interleaving of messages arriving from different senders. Messages cross
//! the bus in their encoded wire form (`trainsim_proto::codec`), decoded on
//! the way out; a malformed payload is logged and dropped rather than
//! propagated (spec §7).
//!
//! The receiver filter (spec §4.3) is applied here, at enqueue, not by the
//! recipient after the fact: `REQ_ACK`/`ELEC_ACK`/`REQ_ANS` only enter the
//! inbox of the device named in their `receiver` field, while `REQ`/`ELEC`/
//! `LEADER` (no single addressee) are buffered by every in-range device.
//! Filtering here — rather than after a device pops a message addressed to
//! someone else — keeps a device's one-message-per-tick budget (spec §5)
//! from being spent discarding mail that was never meant for it, matching
//! `original_source/Train.py`'s own `receive_message`, which only buffers a
//! non-broadcast message `if msg['receiver'] == self.id`.

mod error;
#[cfg(test)]
mod tests;

use std::collections::{HashMap, VecDeque};

use tracing::{trace, warn};
use trainsim_core::{DeviceId, Point};
use trainsim_proto::{codec, Message};

pub use error::{NetError, NetResult};

struct Registration {
    pos: Point,
    range: f32,
}

/// In-process broadcast bus with range-limited, per-device FIFO inboxes.
///
/// Inboxes hold the encoded wire form rather than a typed `Message`, so a
/// decode failure at `recv` is a real, observable event (spec §7) rather
/// than something that can't happen because the bus only ever handled
/// well-typed values.
#[derive(Default)]
pub struct NetworkBus {
    registry: HashMap<DeviceId, Registration>,
    inboxes: HashMap<DeviceId, VecDeque<String>>,
}

impl NetworkBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device with its current position and broadcast range.
    /// Re-registering an already-known ID updates its entry in place.
    pub fn register(&mut self, id: DeviceId, pos: Point, range: f32) {
        self.registry.insert(id, Registration { pos, range });
        self.inboxes.entry(id).or_default();
    }

    /// Update a moving device's position ahead of this tick's broadcasts.
    pub fn update_position(&mut self, id: DeviceId, pos: Point) -> NetResult<()> {
        self.registry
            .get_mut(&id)
            .map(|r| r.pos = pos)
            .ok_or(NetError::UnregisteredDevice(id))
    }

    /// Remove a device from the bus (spec: a client is removed from the
    /// device registry after its retirement grace period).
    pub fn deregister(&mut self, id: DeviceId) {
        self.registry.remove(&id);
        self.inboxes.remove(&id);
    }

    pub fn is_registered(&self, id: DeviceId) -> bool {
        self.registry.contains_key(&id)
    }

    /// Broadcast `msg` from `sender` to every other registered device within
    /// `sender`'s range whose id this message is addressed to, or to every
    /// in-range device for the three broadcast variants (spec §4.3).
    /// Silently does nothing for devices out of range — that is not an
    /// error (spec: "the bus never invokes `receive`").
    pub fn broadcast(&mut self, sender: DeviceId, msg: Message) -> NetResult<()> {
        let Registration { pos: sender_pos, range } =
            *self.registry.get(&sender).ok_or(NetError::UnregisteredDevice(sender))?;

        let raw = codec::encode(&msg);
        let addressee = msg.receiver();

        let mut delivered = 0u32;
        for (&id, reg) in self.registry.iter() {
            if id == sender {
                continue;
            }
            if let Some(target) = addressee {
                if id != target {
                    continue;
                }
            }
            if sender_pos.distance(reg.pos) <= range {
                self.inboxes.entry(id).or_default().push_back(raw.clone());
                delivered += 1;
            }
        }
        trace!(sender = %sender, type_tag = msg.type_tag(), delivered, "broadcast");
        Ok(())
    }

    /// Decode and return at most one queued message for `id` (spec §5: a
    /// recipient consumes at most one message per tick). A payload that
    /// fails to decode is logged and dropped (spec §7) — the device still
    /// spends its one-message budget on it, since the bus has no way to
    /// know the payload was malformed until it tries.
    pub fn recv(&mut self, id: DeviceId) -> Option<Message> {
        let raw = self.inboxes.get_mut(&id)?.pop_front()?;
        match codec::decode(&raw) {
            Ok(msg) => Some(msg),
            Err(err) => {
                warn!(receiver = %id, %err, "dropping malformed message");
                None
            }
        }
    }

    /// Number of messages currently queued for `id`, for diagnostics and tests.
    pub fn pending(&self, id: DeviceId) -> usize {
        self.inboxes.get(&id).map_or(0, VecDeque::len)
    }
}
