//! Synthetic Cochabamba road network.
//!
//! A 6 × 6 street grid over the city centre, between the Casa A and the
//! Clínica Univalle neighbourhoods.  Segment lengths are the haversine
//! distance between their end nodes.  Every street is two-way except the
//! avenue along row 2, which runs east only.

use cr_core::{GeoPoint, NodeId};
use cr_spatial::{GraphLoadError, RoadNetwork, RoadNetworkBuilder};

pub const ROWS: usize = 6;
pub const COLS: usize = 6;

const LAT_NORTH: f64 = -17.3700;
const LAT_SOUTH: f64 = -17.3950;
const LON_WEST:  f64 = -66.1800;
const LON_EAST:  f64 = -66.1450;

/// Row whose streets are one-way, west → east.
const ONE_WAY_ROW: usize = 2;

/// Build the grid.  Node `r * COLS + c` sits at row `r` (north → south),
/// column `c` (west → east).
pub fn build_network() -> Result<RoadNetwork, GraphLoadError> {
    let mut b = RoadNetworkBuilder::with_capacity(ROWS * COLS, 4 * ROWS * COLS);

    let lat_step = (LAT_SOUTH - LAT_NORTH) / (ROWS - 1) as f64;
    let lon_step = (LON_EAST - LON_WEST) / (COLS - 1) as f64;

    let mut grid = [[NodeId::INVALID; COLS]; ROWS];
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, node) in row.iter_mut().enumerate() {
            *node = b.add_node(GeoPoint::new(
                LAT_NORTH + r as f64 * lat_step,
                LON_WEST + c as f64 * lon_step,
            ));
        }
    }

    let pos = |r: usize, c: usize| {
        GeoPoint::new(LAT_NORTH + r as f64 * lat_step, LON_WEST + c as f64 * lon_step)
    };

    for r in 0..ROWS {
        for c in 0..COLS {
            if c + 1 < COLS {
                let len = pos(r, c).distance_m(pos(r, c + 1));
                if r == ONE_WAY_ROW {
                    b.add_directed_edge(grid[r][c], grid[r][c + 1], len);
                } else {
                    b.add_road(grid[r][c], grid[r][c + 1], len);
                }
            }
            if r + 1 < ROWS {
                let len = pos(r, c).distance_m(pos(r + 1, c));
                b.add_road(grid[r][c], grid[r + 1][c], len);
            }
        }
    }

    b.build()
}
