//! Client state machine (spec §4.3 / §7 "Client state").
//!
//! There is no `Client.py` in the source this is grounded on — the original
//! only implements `Train` and the driver — so this is built directly from
//! the spec's lifecycle description, in the same explicit-step style as
//! [`Train`](crate::Train): broadcast on creation, retry on a countdown,
//! and track pickup/dropoff by position equality with the assigned train
//! rather than by an explicit boarding notification (spec §9: the source
//! never implements one, "TODO: Notify client").

use tracing::debug;

use trainsim_core::{DeviceId, Point};
use trainsim_net::NetworkBus;
use trainsim_proto::Message;

use crate::error::AgentResult;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClientMode {
    /// Waiting for a train to be assigned.
    Call,
    /// Assigned to a train, waiting to be picked up.
    Pickup,
    /// Aboard the assigned train, riding to its destination.
    Onboard,
    /// Delivered; counting down its retirement grace period.
    Dropoff,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ClientOutcome {
    Continue,
    /// Grace period elapsed; the driver should remove this client.
    Retire,
}

pub struct Client {
    pub id: DeviceId,
    pub pos: Point,
    pub dest: Point,
    pub mode: ClientMode,
    pub assigned_train: Option<DeviceId>,
    /// Ticks between REQ rebroadcasts while unacknowledged.
    pub req_period: u32,
    ticks_since_req: u32,
    pub(crate) got_ack: bool,
    /// Remaining ticks to wait in `Dropoff` before retiring, so trailing
    /// messages (e.g. a stray `REQ_ACK` from a second responder) drain.
    dropoff_grace: u32,
}

impl Client {
    pub const RETIREMENT_GRACE: u32 = 10;

    /// Build a new client, register it on the bus, and publish its first
    /// `REQ` immediately (spec §7: "Publishes a REQ (broadcast) on
    /// creation").
    pub fn new(
        id: DeviceId,
        pos: Point,
        dest: Point,
        req_period: u32,
        range: f32,
        bus: &mut NetworkBus,
    ) -> AgentResult<Self> {
        let mut client = Self {
            id,
            pos,
            dest,
            mode: ClientMode::Call,
            assigned_train: None,
            req_period,
            ticks_since_req: 0,
            got_ack: false,
            dropoff_grace: Self::RETIREMENT_GRACE,
        };
        bus.register(client.id, client.pos, range);
        client.broadcast_request(bus)?;
        Ok(client)
    }

    fn broadcast_request(&self, bus: &mut NetworkBus) -> AgentResult<()> {
        bus.broadcast(
            self.id,
            Message::Req { client: self.id, pickup: self.pos, dropoff: self.dest },
        )?;
        Ok(())
    }

    /// Advance one tick. `assigned_train_pos` is the current position of
    /// `self.assigned_train`, supplied by the driver (a client does not
    /// hold a reference to its train; lookups go through the device
    /// registry, spec §9 "Cyclic references").
    pub fn step(
        &mut self,
        bus: &mut NetworkBus,
        assigned_train_pos: Option<Point>,
    ) -> AgentResult<ClientOutcome> {
        if let Some(msg) = bus.recv(self.id) {
            self.handle_message(msg);
        }

        match self.mode {
            ClientMode::Call => {
                if !self.got_ack {
                    self.ticks_since_req += 1;
                    if self.ticks_since_req >= self.req_period {
                        self.ticks_since_req = 0;
                        self.broadcast_request(bus)?;
                    }
                }
            }
            ClientMode::Pickup => {
                if matches!(assigned_train_pos, Some(p) if self.pos.same_as(p)) {
                    debug!(client = %self.id, "boarded");
                    self.mode = ClientMode::Onboard;
                }
            }
            ClientMode::Onboard => {
                if let Some(p) = assigned_train_pos {
                    self.pos = p;
                }
                if self.pos.same_as(self.dest) {
                    debug!(client = %self.id, "delivered");
                    self.mode = ClientMode::Dropoff;
                    self.dropoff_grace = Self::RETIREMENT_GRACE;
                }
            }
            ClientMode::Dropoff => {
                if self.dropoff_grace == 0 {
                    return Ok(ClientOutcome::Retire);
                }
                self.dropoff_grace -= 1;
            }
        }

        Ok(ClientOutcome::Continue)
    }

    fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::ReqAck { client, .. } if client == self.id => {
                self.got_ack = true;
            }
            Message::ReqAns { client, receiver, sender } if client == self.id && receiver == self.id => {
                self.assigned_train = Some(sender);
                self.mode = ClientMode::Pickup;
            }
            _ => {}
        }
    }
}
