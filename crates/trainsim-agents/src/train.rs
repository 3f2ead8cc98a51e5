//! Train state machine: election, queueing, and motion.
//!
//! Grounded on `original_source/Train.py`'s `step`/`move`/election methods,
//! adapted from position-keyed dictionaries to typed `NodeId`/`EdgeKey`
//! values, and corrected against two spec-mandated departures from the
//! source:
//!
//! - Election ties are broken by lower train ID (the source leaves both
//!   sides yielding, a livelock).
//! - A served client is dequeued from the *front* of the queue. The source
//!   calls `list.pop()` with no index (removing the *last* entry) while
//!   every other reference to "the client currently being served" reads
//!   index 0 — a bug, not a design choice; the front-queue reading is the
//!   one consistent interpretation and is what spec scenario S4 requires.

use std::collections::VecDeque;

use tracing::{debug, info};

use trainsim_core::{DeviceId, DeviceRng, EdgeKey, NodeId, Point};
use trainsim_map::{Map, Router};
use trainsim_net::NetworkBus;
use trainsim_proto::Message;
use trainsim_semaphore::EdgeSemaphore;

use crate::error::AgentResult;

/// A train's operational mode (spec §4.5).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TrainMode {
    /// No clients queued; idle at `current_node`.
    Wait,
    /// Travelling toward `client_queue[0]`'s pickup.
    Accept,
    /// Travelling toward `client_queue[0]`'s dropoff.
    Busy,
    /// Repositioning under system order; ignores REQ/ELEC. Self-terminates
    /// on arrival at `current_goal`.
    OutOfOrder,
}

/// A queued client leg: which client, and its pickup/dropoff points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClientLeg {
    pub client: DeviceId,
    pub pickup: Point,
    pub dropoff: Point,
}

/// At most one in-progress election (spec §3: "either empty or has all
/// fields populated").
#[derive(Clone, Debug)]
pub struct PendingElection {
    pub client: DeviceId,
    pub pickup: Point,
    pub dropoff: Point,
    /// Route from this train's expected arrival point to `pickup`, to be
    /// appended to `path` if this train wins.
    pub route: Vec<NodeId>,
    /// Route from `pickup` to `dropoff`, appended right after `route` so a
    /// winning train's `path` carries it all the way to the drop-off
    /// without a second routing call at arrival time.
    pub dropoff_route: Vec<NodeId>,
    /// Length of `route` (the source's `simpleD`).
    pub simple_d: f32,
    pub in_elections: bool,
    pub delay_t: u32,
    pub msg_wait: u32,
}

/// Result of a `Train::step` call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TrainOutcome {
    Continue,
    /// Arrived at its `OutOfOrder` goal; the driver should remove it.
    Terminate,
}

pub struct Train {
    pub id: DeviceId,
    pub pos: Point,
    pub v: Point,
    pub v_max: f32,
    pub mode: TrainMode,
    pub current_goal: Option<Point>,
    pub client_queue: VecDeque<ClientLeg>,
    /// Ordered vertices still to traverse; `path[0]` is the next vertex.
    pub path: VecDeque<NodeId>,
    /// Vertex the train currently occupies (or most recently departed).
    pub current_node: NodeId,
    pub current_edge: Option<EdgeKey>,
    pub pending: Option<PendingElection>,
    /// Client ID this train most recently lost an election for.
    pub lost_for: Option<DeviceId>,
    pub delay_wanted: u32,
    pub msg_wait_max: u32,
}

impl Train {
    /// Build a new idle train at `start_node`, drawing its one-shot
    /// `delay_wanted` from `rng` (spec §3: a per-train random integer in
    /// `[1, 10]`).
    pub fn new(id: DeviceId, start_node: NodeId, pos: Point, v_max: f32, rng: &mut DeviceRng) -> Self {
        Self {
            id,
            pos,
            v: Point::ZERO,
            v_max,
            mode: TrainMode::Wait,
            current_goal: None,
            client_queue: VecDeque::new(),
            path: VecDeque::new(),
            current_node: start_node,
            current_edge: None,
            pending: None,
            lost_for: None,
            delay_wanted: rng.gen_range(1..=10),
            msg_wait_max: 100,
        }
    }

    /// Sum of Euclidean lengths between successive vertices of `path` (the
    /// source's `full_distance`): the residual work already committed,
    /// excluding the train's partial progress toward `path[0]`.
    pub fn full_path_distance(&self, map: &Map) -> f32 {
        let mut total = 0.0;
        let mut iter = self.path.iter();
        if let Some(mut prev) = iter.next() {
            for cur in iter {
                total += map.node_pos(*prev).distance(map.node_pos(*cur));
                prev = cur;
            }
        }
        total
    }

    /// Advance one tick: read at most one message, run the election state
    /// machine, then move.
    pub fn step(
        &mut self,
        bus: &mut NetworkBus,
        map: &Map,
        router: &dyn Router,
        sem: &EdgeSemaphore,
        dt: f32,
    ) -> AgentResult<TrainOutcome> {
        // Step A: advance whichever countdown is active.
        if let Some(p) = &mut self.pending {
            if !p.in_elections {
                p.delay_t += 1;
            } else {
                p.msg_wait += 1;
            }
        }

        // Step B: observe at most one message.
        if let Some(msg) = bus.recv(self.id) {
            self.handle_message(msg, bus, map, router)?;
        }

        // Step C: election start/finish, using the (possibly just-mutated) state.
        self.advance_election(bus, map)?;

        // Step D: move, then handle arrival.
        self.move_train(map, sem, dt)?;
        self.handle_arrival();

        if self.mode == TrainMode::OutOfOrder && self.current_goal.is_none() {
            return Ok(TrainOutcome::Terminate);
        }
        Ok(TrainOutcome::Continue)
    }

    fn handle_message(
        &mut self,
        msg: Message,
        bus: &mut NetworkBus,
        map: &Map,
        router: &dyn Router,
    ) -> AgentResult<()> {
        if self.mode == TrainMode::OutOfOrder {
            return Ok(());
        }

        match msg {
            Message::Req { client, pickup, dropoff } => {
                if self.pending.is_some() {
                    return Ok(());
                }
                let Some(pickup_node) = map.node_at(pickup) else { return Ok(()) };
                let Some(dropoff_node) = map.node_at(dropoff) else { return Ok(()) };
                let start_node = match self.mode {
                    TrainMode::Wait => self.current_node,
                    _ => self.path.back().copied().unwrap_or(self.current_node),
                };
                let route = router.route(map, start_node, pickup_node)?;
                let dropoff_route = router.route(map, pickup_node, dropoff_node)?;
                debug!(train = %self.id, %client, "queuing request for election");
                self.pending = Some(PendingElection {
                    client,
                    pickup,
                    dropoff,
                    route: route.vertices,
                    dropoff_route: dropoff_route.vertices,
                    simple_d: route.total_length,
                    in_elections: false,
                    delay_t: 0,
                    msg_wait: 0,
                });
                bus.broadcast(self.id, Message::ReqAck { sender: self.id, client, receiver: client })?;
            }

            Message::Elec { sender, client, distance } => {
                let Some(p) = &self.pending else { return Ok(()) };
                if p.client != client {
                    return Ok(());
                }
                let d_tot = p.simple_d + self.full_path_distance(map);
                let wins = d_tot < distance || (d_tot == distance && self.id < sender);
                if wins {
                    bus.broadcast(
                        self.id,
                        Message::ElecAck { sender: self.id, client, receiver: sender },
                    )?;
                    let p = self.pending.as_mut().expect("checked above");
                    if !p.in_elections {
                        p.in_elections = true;
                        p.msg_wait = 0;
                        bus.broadcast(self.id, Message::Elec { sender: self.id, client, distance: d_tot })?;
                    }
                } else {
                    self.lost_for = Some(client);
                    self.pending = None;
                }
            }

            // The bus only enqueues an `ElecAck` for the train named in its
            // `receiver` field, so every one observed here is addressed to us.
            Message::ElecAck { client, .. } => {
                if matches!(&self.pending, Some(p) if p.client == client) {
                    self.lost_for = Some(client);
                    self.pending = None;
                }
            }

            Message::Leader { client, .. } => {
                if matches!(&self.pending, Some(p) if p.client == client) {
                    self.lost_for = Some(client);
                    self.pending = None;
                }
            }

            Message::ReqAck { .. } | Message::ReqAns { .. } => {}
        }
        Ok(())
    }

    fn advance_election(&mut self, bus: &mut NetworkBus, map: &Map) -> AgentResult<()> {
        let (in_elections, delay_t, msg_wait) = match &self.pending {
            Some(p) => (p.in_elections, p.delay_t, p.msg_wait),
            None => return Ok(()),
        };

        if !in_elections {
            if delay_t == self.delay_wanted {
                let simple_d = self.pending.as_ref().expect("checked above").simple_d;
                let client = self.pending.as_ref().expect("checked above").client;
                let d = simple_d + self.full_path_distance(map);

                let p = self.pending.as_mut().expect("checked above");
                p.in_elections = true;
                p.msg_wait = 0;

                bus.broadcast(self.id, Message::Elec { sender: self.id, client, distance: d })?;
            }
        } else if msg_wait == self.msg_wait_max {
            let p = self.pending.take().expect("checked above");
            info!(train = %self.id, client = %p.client, "won election");
            self.path.extend(p.route.iter().copied());
            self.path.extend(p.dropoff_route.iter().copied());
            self.client_queue.push_back(ClientLeg {
                client: p.client,
                pickup: p.pickup,
                dropoff: p.dropoff,
            });
            bus.broadcast(self.id, Message::Leader { sender: self.id, client: p.client })?;
            bus.broadcast(
                self.id,
                Message::ReqAns { sender: self.id, client: p.client, receiver: p.client },
            )?;
            if self.mode == TrainMode::Wait {
                self.mode = TrainMode::Accept;
                self.current_goal = Some(self.client_queue.front().expect("just pushed").pickup);
            }
        }
        Ok(())
    }

    fn move_train(&mut self, map: &Map, sem: &EdgeSemaphore, dt: f32) -> AgentResult<()> {
        if self.path.is_empty() {
            return Ok(());
        }

        self.pos = self.pos + self.v * dt;
        let target = map.node_pos(self.path[0]);
        let to_target = target - self.pos;
        let overshot = to_target.x * self.v.x < 0.0 || to_target.y * self.v.y < 0.0;
        if overshot {
            self.pos = target;
        }

        if self.pos.same_as(target) {
            if let Some(edge) = self.current_edge.take() {
                sem.release(edge)?;
            }
            self.current_node = self.path.pop_front().expect("non-empty checked above");
            self.v = Point::ZERO;

            if matches!(self.current_goal, Some(g) if self.pos.same_as(g)) {
                return Ok(());
            }
        }

        if self.v == Point::ZERO {
            if let Some(&next) = self.path.front() {
                let edge = EdgeKey::new(self.current_node, next);
                if !sem.try_acquire(edge) {
                    return Ok(()); // occupied; remain stationary this tick
                }
                self.current_edge = Some(edge);
                let direction = self.pos.direction_to(map.node_pos(next));
                self.v = direction * self.v_max;
            }
        }
        Ok(())
    }

    fn handle_arrival(&mut self) {
        let Some(goal) = self.current_goal else { return };
        if !self.pos.same_as(goal) {
            return;
        }

        match self.mode {
            TrainMode::Accept => {
                self.mode = TrainMode::Busy;
                self.current_goal =
                    self.client_queue.front().map(|leg| leg.dropoff);
            }
            TrainMode::Busy => {
                self.client_queue.pop_front();
                if let Some(next) = self.client_queue.front() {
                    self.mode = TrainMode::Accept;
                    self.current_goal = Some(next.pickup);
                } else {
                    self.current_goal = None;
                    self.mode = TrainMode::Wait;
                }
            }
            TrainMode::OutOfOrder => {
                self.current_goal = None;
            }
            TrainMode::Wait => {}
        }
    }
}
