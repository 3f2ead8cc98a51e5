use trainsim_core::{DeviceId, Point};
use trainsim_proto::Message;

use crate::NetworkBus;

fn leader(client: u32) -> Message {
    Message::Leader { sender: DeviceId(0), client: DeviceId(client) }
}

#[test]
fn in_range_peer_receives_broadcast() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(2), Point::new(10.0, 0.0), 50.0);

    bus.broadcast(DeviceId(1), leader(7)).unwrap();
    assert_eq!(bus.recv(DeviceId(2)), Some(leader(7)));
    assert_eq!(bus.pending(DeviceId(2)), 0);
}

#[test]
fn out_of_range_peer_never_sees_message() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 5.0);
    bus.register(DeviceId(2), Point::new(100.0, 0.0), 5.0);

    bus.broadcast(DeviceId(1), leader(7)).unwrap();
    assert_eq!(bus.pending(DeviceId(2)), 0);
    assert_eq!(bus.recv(DeviceId(2)), None);
}

#[test]
fn sender_never_receives_its_own_broadcast() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.broadcast(DeviceId(1), leader(7)).unwrap();
    assert_eq!(bus.pending(DeviceId(1)), 0);
}

#[test]
fn inbox_is_fifo_per_sender() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(2), Point::new(0.0, 0.0), 50.0);

    bus.broadcast(DeviceId(1), leader(1)).unwrap();
    bus.broadcast(DeviceId(1), leader(2)).unwrap();

    assert_eq!(bus.recv(DeviceId(2)), Some(leader(1)));
    assert_eq!(bus.recv(DeviceId(2)), Some(leader(2)));
    assert_eq!(bus.recv(DeviceId(2)), None);
}

#[test]
fn position_updates_affect_subsequent_range_checks() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 5.0);
    bus.register(DeviceId(2), Point::new(100.0, 0.0), 5.0);
    bus.broadcast(DeviceId(1), leader(1)).unwrap();
    assert_eq!(bus.pending(DeviceId(2)), 0);

    bus.update_position(DeviceId(2), Point::new(1.0, 0.0)).unwrap();
    bus.broadcast(DeviceId(1), leader(2)).unwrap();
    assert_eq!(bus.pending(DeviceId(2)), 1);
}

#[test]
fn deregistered_device_stops_receiving() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(2), Point::new(0.0, 0.0), 50.0);
    bus.deregister(DeviceId(2));
    assert!(bus.broadcast(DeviceId(1), leader(1)).is_ok());
    assert!(!bus.is_registered(DeviceId(2)));
}

#[test]
fn broadcast_from_unregistered_sender_errors() {
    let mut bus = NetworkBus::new();
    assert!(bus.broadcast(DeviceId(9), leader(1)).is_err());
}

#[test]
fn addressed_message_skips_in_range_bystanders() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(2), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(3), Point::new(0.0, 0.0), 50.0);

    let req_ans = Message::ReqAns { sender: DeviceId(1), client: DeviceId(9), receiver: DeviceId(2) };
    bus.broadcast(DeviceId(1), req_ans).unwrap();

    assert_eq!(bus.recv(DeviceId(2)), Some(req_ans));
    assert_eq!(bus.pending(DeviceId(3)), 0);
}

#[test]
fn broadcast_variant_reaches_every_in_range_peer() {
    let mut bus = NetworkBus::new();
    bus.register(DeviceId(1), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(2), Point::new(0.0, 0.0), 50.0);
    bus.register(DeviceId(3), Point::new(0.0, 0.0), 50.0);

    bus.broadcast(DeviceId(1), leader(1)).unwrap();

    assert_eq!(bus.pending(DeviceId(2)), 1);
    assert_eq!(bus.pending(DeviceId(3)), 1);
}
