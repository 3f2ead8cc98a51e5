//! Unit tests for trainsim-core.

#[cfg(test)]
mod ids {
    use crate::{DeviceId, EdgeKey, NodeId};

    #[test]
    fn edge_key_is_order_independent() {
        let a = NodeId(3);
        let b = NodeId(7);
        assert_eq!(EdgeKey::new(a, b), EdgeKey::new(b, a));
        assert_eq!(EdgeKey::new(a, b), EdgeKey(NodeId(7), NodeId(3)));
    }

    #[test]
    fn invalid_sentinel_is_default() {
        assert_eq!(DeviceId::default(), DeviceId::INVALID);
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn direction_is_unit_length() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let d = a.direction_to(b);
        assert!((d.x - 1.0).abs() < 1e-6);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn direction_to_self_is_zero() {
        let a = Point::new(5.0, 5.0);
        assert_eq!(a.direction_to(a), Point::ZERO);
    }
}

#[cfg(test)]
mod rng {
    use crate::{DeviceId, DeviceRng};

    #[test]
    fn same_seed_same_device_is_deterministic() {
        let mut a = DeviceRng::new(42, DeviceId(0));
        let mut b = DeviceRng::new(42, DeviceId(0));
        let x: u32 = a.gen_range(1..10);
        let y: u32 = b.gen_range(1..10);
        assert_eq!(x, y);
    }

    #[test]
    fn different_devices_diverge() {
        let mut a = DeviceRng::new(42, DeviceId(0));
        let mut b = DeviceRng::new(42, DeviceId(1));
        let xs: Vec<u32> = (0..20).map(|_| a.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..20).map(|_| b.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, ys);
    }
}
