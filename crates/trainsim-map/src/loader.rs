//! CSV map file loader.
//!
//! A map is described by three `;`-delimited CSV files inside one directory
//! (spec §6):
//!
//! - `Sheet 1-Graph Info.csv` — three header-labelled rows:
//!   `Number of vertices;N`, `Number of connections;M`, `Map size;S`.
//! - `Sheet 1-Vertices Positions.csv` — a header row, then `N` rows of
//!   `name;x;y`. Names starting with `_` are not stops.
//! - `Sheet 1-Connection Matrix.csv` — an `N`×`N` matrix with no header row;
//!   an empty cell means no edge, a numeric cell is the edge weight. Must be
//!   symmetric; the diagonal is ignored; the number of strictly
//!   upper-triangular non-empty cells must equal `M`.

use std::path::Path;

use tracing::{debug, info};

use trainsim_core::Point;

use crate::error::{MapError, MapResult};
use crate::network::{Map, MapBuilder};

fn csv_reader(path: &Path) -> MapResult<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?)
}

struct GraphInfo {
    n_vertices: usize,
    n_edges: usize,
    map_size: f32,
}

fn read_graph_info(dir: &Path) -> MapResult<GraphInfo> {
    let path = dir.join("Sheet 1-Graph Info.csv");
    let mut rd = csv_reader(&path)?;
    let rows: Vec<csv::StringRecord> = rd.records().collect::<Result<_, _>>()?;

    let expect = |row: &csv::StringRecord, label: &str| -> MapResult<f64> {
        let got = row.get(0).unwrap_or_default();
        if got != label {
            return Err(MapError::Malformed {
                file: "Graph Info",
                reason: format!("expected row labelled {label:?}, got {got:?}"),
            });
        }
        row.get(1)
            .unwrap_or_default()
            .parse::<f64>()
            .map_err(|_| MapError::Malformed {
                file: "Graph Info",
                reason: format!("{label} value is not numeric"),
            })
    };

    if rows.len() != 3 {
        return Err(MapError::Malformed {
            file: "Graph Info",
            reason: format!("expected exactly 3 rows, got {}", rows.len()),
        });
    }

    let n_vertices = expect(&rows[0], "Number of vertices")? as usize;
    let n_edges = expect(&rows[1], "Number of connections")? as usize;
    let map_size = expect(&rows[2], "Map size")? as f32;

    Ok(GraphInfo { n_vertices, n_edges, map_size })
}

fn read_vertices(dir: &Path, n_vertices: usize) -> MapResult<Vec<(String, Point)>> {
    let path = dir.join("Sheet 1-Vertices Positions.csv");
    let mut rd = csv_reader(&path)?;
    let mut rows = rd.records();
    rows.next(); // header row

    let mut out = Vec::with_capacity(n_vertices);
    for row in rows {
        let row = row?;
        let name = row
            .get(0)
            .ok_or_else(|| MapError::Malformed { file: "Vertices Positions", reason: "missing name column".into() })?
            .to_string();
        let x: f32 = row
            .get(1)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MapError::Malformed { file: "Vertices Positions", reason: format!("{name}: bad x") })?;
        let y: f32 = row
            .get(2)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MapError::Malformed { file: "Vertices Positions", reason: format!("{name}: bad y") })?;
        out.push((name, Point::new(x, y)));
    }

    if out.len() != n_vertices {
        return Err(MapError::Malformed {
            file: "Vertices Positions",
            reason: format!("declared {n_vertices} vertices, found {}", out.len()),
        });
    }
    Ok(out)
}

struct ConnectionMatrix {
    /// `cell[i][j]` is `Some(weight)` if an edge exists, per the raw (not
    /// yet symmetry-checked) matrix.
    cell: Vec<Vec<Option<f32>>>,
}

fn read_connections(dir: &Path, n_vertices: usize) -> MapResult<ConnectionMatrix> {
    let path = dir.join("Sheet 1-Connection Matrix.csv");
    let mut rd = csv_reader(&path)?;

    let mut cell = Vec::with_capacity(n_vertices);
    for row in rd.records() {
        let row = row?;
        if row.len() != n_vertices {
            return Err(MapError::Malformed {
                file: "Connection Matrix",
                reason: format!("row has {} columns, expected {n_vertices}", row.len()),
            });
        }
        let mut parsed = Vec::with_capacity(n_vertices);
        for field in row.iter() {
            if field.trim().is_empty() {
                parsed.push(None);
            } else {
                let w: f32 = field.parse().map_err(|_| MapError::Malformed {
                    file: "Connection Matrix",
                    reason: format!("non-numeric cell {field:?}"),
                })?;
                if w < 0.0 {
                    return Err(MapError::Malformed {
                        file: "Connection Matrix",
                        reason: format!("negative edge weight {w}"),
                    });
                }
                parsed.push(Some(w));
            }
        }
        cell.push(parsed);
    }

    if cell.len() != n_vertices {
        return Err(MapError::Malformed {
            file: "Connection Matrix",
            reason: format!("expected {n_vertices} rows, found {}", cell.len()),
        });
    }
    Ok(ConnectionMatrix { cell })
}

/// Load a complete map from a directory containing the three CSVs.
pub fn load_map(dir: impl AsRef<Path>) -> MapResult<Map> {
    let dir = dir.as_ref();
    info!(path = %dir.display(), "loading map");

    let info = read_graph_info(dir)?;
    debug!(n_vertices = info.n_vertices, n_edges = info.n_edges, map_size = info.map_size, "graph info");

    let vertices = read_vertices(dir, info.n_vertices)?;
    let matrix = read_connections(dir, info.n_vertices)?;

    let mut builder = MapBuilder::with_capacity(info.n_vertices, info.n_edges).with_size(info.map_size);
    for (name, pos) in &vertices {
        builder.add_node(name.clone(), *pos);
    }

    let n = info.n_vertices;
    let mut upper_triangular_count = 0usize;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let a = matrix.cell[i][j];
            let b = matrix.cell[j][i];
            match (a, b) {
                (None, None) => {}
                (Some(w1), Some(w2)) => {
                    if (w1 - w2).abs() > f32::EPSILON {
                        return Err(MapError::Malformed {
                            file: "Connection Matrix",
                            reason: format!("asymmetric weights at ({i}, {j}): {w1} vs {w2}"),
                        });
                    }
                    if i < j {
                        upper_triangular_count += 1;
                        builder.add_edge(
                            trainsim_core::NodeId(i as u32),
                            trainsim_core::NodeId(j as u32),
                            w1,
                        );
                    }
                }
                _ => {
                    return Err(MapError::Malformed {
                        file: "Connection Matrix",
                        reason: format!("asymmetric connectivity at ({i}, {j})"),
                    });
                }
            }
        }
    }

    if upper_triangular_count != info.n_edges {
        return Err(MapError::Malformed {
            file: "Connection Matrix",
            reason: format!(
                "declared {} edges, matrix has {upper_triangular_count}",
                info.n_edges
            ),
        });
    }

    let map = builder.build();
    info!(n_vertices = map.node_count(), n_edges = map.edge_count(), "map loaded");
    Ok(map)
}
