//! Unit tests for trainsim-map.

#[cfg(test)]
mod network {
    use trainsim_core::{NodeId, Point};

    use crate::network::MapBuilder;

    fn triangle() -> crate::Map {
        let mut b = MapBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(10.0, 0.0));
        let d = b.add_node("_junction", Point::new(5.0, 5.0));
        b.add_edge(a, c, 10.0);
        b.add_edge(a, d, 7.0);
        b.add_edge(c, d, 7.0);
        b.build()
    }

    #[test]
    fn edges_are_bidirectional() {
        let m = triangle();
        assert_eq!(m.node_count(), 3);
        assert_eq!(m.edge_count(), 3);
        assert_eq!(m.out_degree(NodeId(0)), 2);
        assert_eq!(m.edge_weight_between(NodeId(0), NodeId(1)), Some(10.0));
        assert_eq!(m.edge_weight_between(NodeId(1), NodeId(0)), Some(10.0));
    }

    #[test]
    fn underscore_prefixed_names_are_not_stops() {
        let m = triangle();
        assert!(m.is_stop(NodeId(0)));
        assert!(m.is_stop(NodeId(1)));
        assert!(!m.is_stop(NodeId(2)));
        assert_eq!(m.stops().count(), 2);
    }

    #[test]
    fn node_by_name_round_trips() {
        let m = triangle();
        assert_eq!(m.node_by_name("A").unwrap(), NodeId(0));
        assert!(m.node_by_name("nonexistent").is_err());
    }
}

#[cfg(test)]
mod router {
    use trainsim_core::{NodeId, Point};

    use crate::network::MapBuilder;
    use crate::router::{DijkstraRouter, Router};

    #[test]
    fn finds_shortest_over_direct_edge() {
        let mut b = MapBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(10.0, 0.0));
        let d = b.add_node("_j", Point::new(5.0, 5.0));
        b.add_edge(a, c, 10.0);
        b.add_edge(a, d, 3.0);
        b.add_edge(d, c, 3.0);
        let map = b.build();

        let route = DijkstraRouter.route(&map, a, c).unwrap();
        assert_eq!(route.vertices, vec![d, c]);
        assert!((route.total_length - 6.0).abs() < 1e-5);
    }

    #[test]
    fn trivial_route_is_empty() {
        let mut b = MapBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let map = b.build();
        let route = DijkstraRouter.route(&map, a, a).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.total_length, 0.0);
    }

    #[test]
    fn disconnected_graph_has_no_route() {
        let mut b = MapBuilder::new();
        let a = b.add_node("A", Point::new(0.0, 0.0));
        let c = b.add_node("B", Point::new(10.0, 0.0));
        let map = b.build();
        assert!(DijkstraRouter.route(&map, a, c).is_err());
    }
}

#[cfg(test)]
mod loader {
    use std::fs;

    use tempfile::TempDir;

    use crate::loader::load_map;

    fn write_two_stop_map() -> TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("Sheet 1-Graph Info.csv"),
            "Number of vertices;2\nNumber of connections;1\nMap size;10\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Vertices Positions.csv"),
            "name;x;y\nA;0;0\nB;10;0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Connection Matrix.csv"),
            ";10\n10;\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn loads_a_valid_two_stop_map() {
        let dir = write_two_stop_map();
        let map = load_map(dir.path()).expect("should load");
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.edge_count(), 1);
        assert_eq!(map.node_by_name("A").unwrap().index(), 0);
        assert_eq!(map.size, 10.0);
    }

    #[test]
    fn rejects_edge_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Sheet 1-Graph Info.csv"),
            "Number of vertices;2\nNumber of connections;2\nMap size;10\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Vertices Positions.csv"),
            "name;x;y\nA;0;0\nB;10;0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Connection Matrix.csv"),
            ";10\n10;\n",
        )
        .unwrap();
        assert!(load_map(dir.path()).is_err());
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Sheet 1-Graph Info.csv"),
            "Number of vertices;2\nNumber of connections;1\nMap size;10\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Vertices Positions.csv"),
            "name;x;y\nA;0;0\nB;10;0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Connection Matrix.csv"),
            ";10\n5;\n",
        )
        .unwrap();
        assert!(load_map(dir.path()).is_err());
    }

    #[test]
    fn underscore_vertex_is_not_a_stop() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Sheet 1-Graph Info.csv"),
            "Number of vertices;2\nNumber of connections;1\nMap size;10\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Vertices Positions.csv"),
            "name;x;y\n_hub;0;0\nB;10;0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("Sheet 1-Connection Matrix.csv"),
            ";10\n10;\n",
        )
        .unwrap();
        let map = load_map(dir.path()).unwrap();
        assert_eq!(map.stops().count(), 1);
    }
}
