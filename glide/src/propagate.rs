//! Altitude propagation outward from home.
//!
//! This is a label-correcting relaxation over the 4-connected grid.
//! Each queued edge offers a target cell the origin of one of its
//! neighbours: if the target can see that origin the glide is measured
//! straight to it, otherwise the neighbour itself becomes the new
//! origin. A cell only changes when its altitude strictly drops, and
//! only a change re-queues its neighbours, so the queue always drains.

use crate::{is_in_view, Params, Pos, Window};
use log::debug;
use std::collections::VecDeque;

/// Counters from one [`propagate`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relaxation {
    /// Edges taken off the queue.
    pub edges: usize,

    /// Edges that lowered a cell's altitude.
    pub updates: usize,
}

/// Queued candidate: offer `parent`'s origin (or `parent`) to `target`.
#[derive(Debug, Clone, Copy)]
struct Edge {
    target: Pos,
    parent: Pos,
}

/// Relaxes every cell of `window` reachable from its home until no
/// cell can be lowered any further.
pub fn propagate(window: &mut Window, params: &Params) -> Relaxation {
    let now = std::time::Instant::now();
    let home = window.home();

    let mut queue = VecDeque::new();
    enqueue_neighbours(window, home, &mut queue);

    let mut relaxation = Relaxation::default();

    while let Some(Edge { target, parent }) = queue.pop_front() {
        relaxation.edges += 1;

        if target == home {
            continue;
        }

        let cell = window[target];
        let parent_cell = window[parent];

        if cell.origin == parent_cell.origin || cell.ground {
            continue;
        }

        let elected = if is_in_view(window, target, parent_cell.origin, params) {
            parent_cell.origin
        } else {
            parent
        };

        if elected == cell.origin || elected == target {
            continue;
        }

        let origin_altitude = window[elected].altitude;
        let distance = window.distance(target, elected);
        if window[target].calculate(elected, origin_altitude, distance, params) {
            relaxation.updates += 1;
            enqueue_neighbours(window, target, &mut queue);
        }
    }

    debug!(
        "propagate; cells: {}, edges: {}, updates: {}, exec: {:?}",
        window.nrows() * window.ncols(),
        relaxation.edges,
        relaxation.updates,
        now.elapsed()
    );

    relaxation
}

/// Queues `pos` as parent for each neighbour holding a different origin.
fn enqueue_neighbours(window: &Window, pos: Pos, queue: &mut VecDeque<Edge>) {
    let origin = window[pos].origin;
    queue.extend(
        window
            .neighbours(pos)
            .filter(|&n| window[n].origin != origin)
            .map(|target| Edge {
                target,
                parent: pos,
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::{enqueue_neighbours, propagate, Edge};
    use crate::{GroundStyle, Params, Pos, Window};
    use approx::assert_relative_eq;
    use geo::geometry::Coord;
    use std::{collections::VecDeque, io::Cursor};

    fn asc(rows: &[&str], cellsize: f64) -> String {
        let ncols = rows[0].split_whitespace().count();
        format!(
            "ncols {ncols}\nnrows {}\nxllcorner 0\nyllcorner 0\ncellsize {cellsize}\n{}\n",
            rows.len(),
            rows.join("\n")
        )
    }

    fn params(home: (f64, f64), glide_ratio: f64, ceiling: f64) -> Params {
        Params::builder()
            .home(Coord {
                x: home.0,
                y: home.1,
            })
            .glide_ratio(glide_ratio)
            .ceiling(ceiling)
            .build()
            .unwrap()
    }

    fn flat() -> (Window, Params) {
        let rows = ["100 100 100 100 100"; 5];
        let params = params((250.0, 250.0), 6.0, 3000.0);
        let window = Window::from_reader(Cursor::new(asc(&rows, 100.0)), &params).unwrap();
        (window, params)
    }

    /// Follows origins from `pos` to home, returning the hop count.
    fn hops_to_home(window: &Window, mut pos: Pos) -> usize {
        let limit = window.nrows() * window.ncols();
        let mut hops = 0;
        while pos != window.home() {
            let next = window[pos].origin;
            assert_ne!(next, pos, "unresolved cell {pos:?} in origin chain");
            pos = next;
            hops += 1;
            assert!(hops <= limit, "origin cycle");
        }
        hops
    }

    #[test]
    fn test_flat_grid() {
        let (mut window, params) = flat();
        assert_eq!(window.home(), Pos::new(2, 2));
        propagate(&mut window, &params);

        for (pos, cell) in window.iter() {
            assert_eq!(cell.origin, Pos::new(2, 2));
            assert!(!cell.ground);
            let expected = 100.0 + window.distance(pos, window.home()) / 6.0;
            assert_relative_eq!(cell.altitude, expected);
        }

        assert_relative_eq!(window[Pos::new(1, 2)].altitude, 100.0 + 100.0 / 6.0);
        assert_relative_eq!(
            window[Pos::new(0, 0)].altitude,
            100.0 + 2.0 * std::f64::consts::SQRT_2 * 100.0 / 6.0
        );

        let zero = window.raster(GroundStyle::Zero);
        assert_eq!(zero.get(2, 2), Some(100.0));
        let nodata = window.raster(GroundStyle::NoData);
        assert_eq!(nodata.get(2, 2), Some(3000.0));
        assert_relative_eq!(nodata.get(2, 3).unwrap(), 100.0 + 100.0 / 6.0);
    }

    #[test]
    fn test_obstacle_elects_relay() {
        // 60 m cells at 6:1 cost 10 m per cell.
        let open = ["100 100 100 100 100 100 100"];
        let wall = ["100 100 100 500 100 100 100"];
        let params = params((30.0, 30.0), 6.0, 3000.0);

        let mut control = Window::from_reader(Cursor::new(asc(&open, 60.0)), &params).unwrap();
        propagate(&mut control, &params);
        let mut blocked = Window::from_reader(Cursor::new(asc(&wall, 60.0)), &params).unwrap();
        propagate(&mut blocked, &params);

        let wall_pos = Pos::new(0, 3);
        assert!(blocked[wall_pos].ground);
        assert_eq!(blocked[wall_pos].altitude, 500.0);
        assert_eq!(blocked[wall_pos].origin, Pos::new(0, 0));

        for col in 4..7 {
            let pos = Pos::new(0, col);
            assert_eq!(control[pos].origin, Pos::new(0, 0));
            assert_eq!(blocked[pos].origin, wall_pos);
            assert_relative_eq!(
                blocked[pos].altitude,
                500.0 + 10.0 * (col - 3) as f64,
                epsilon = 1e-9
            );
            assert!(blocked[pos].altitude > control[pos].altitude);
        }
    }

    #[test]
    fn test_relay_chain_is_acyclic_and_monotone() {
        let rows = [
            "120 130 140 150 160 170",
            "110 300 300 140 150 160",
            "100 110 120 130 400 150",
            "105 115 125 135 400 145",
            "110 120 450 450 400 140",
            "115 125 135 145 155 165",
        ];
        let params = params((50.0, 350.0), 8.0, 2000.0);
        let mut window = Window::from_reader(Cursor::new(asc(&rows, 100.0)), &params).unwrap();
        assert_eq!(window.home(), Pos::new(2, 0));
        propagate(&mut window, &params);

        for (pos, cell) in window.iter() {
            assert!(cell.altitude >= cell.elevation);
            if cell.is_unresolved(params.ceiling) {
                continue;
            }
            hops_to_home(&window, pos);
            if pos != window.home() {
                assert!(cell.altitude > window[cell.origin].altitude);
            }
        }
        assert_eq!(window.summary().unresolved, 0);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let rows = [
            "200 210 220 230 240",
            "190 400 400 400 230",
            "180 190 200 210 220",
            "170 180 190 200 210",
        ];
        let params = params((50.0, 50.0), 10.0, 3000.0);
        let mut window = Window::from_reader(Cursor::new(asc(&rows, 100.0)), &params).unwrap();
        let first = propagate(&mut window, &params);
        assert!(first.updates > 0);

        let before: Vec<_> = window.iter().map(|(_, cell)| *cell).collect();
        let second = propagate(&mut window, &params);
        assert_eq!(second.updates, 0);
        let after: Vec<_> = window.iter().map(|(_, cell)| *cell).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_out_of_reach_stays_at_ceiling() {
        let row: Vec<String> = (0..101).map(|_| "0".to_owned()).collect();
        let row = row.join(" ");
        // 300 m ceiling at 10:1 over 100 m cells: 10 m per cell, 30 cells.
        let params = params((5050.0, 50.0), 10.0, 300.0);
        let mut window = Window::from_reader(Cursor::new(asc(&[row.as_str()], 100.0)), &params).unwrap();
        propagate(&mut window, &params);

        let home = window.home();
        assert_eq!(window.ncols(), 61);
        assert_eq!(window[home].altitude, 0.0);
        for (pos, cell) in window.iter() {
            let cells_away = pos.col.abs_diff(home.col);
            if cells_away < 30 {
                assert_relative_eq!(cell.altitude, 10.0 * cells_away as f64, epsilon = 1e-9);
            } else {
                assert_eq!(cell.altitude, 300.0);
                assert_eq!(cell.origin, pos);
            }
        }
    }

    #[test]
    fn test_margin_owed_on_every_glide() {
        let rows = ["100 100 100 100 100"; 5];
        let params = Params::builder()
            .home(Coord { x: 250.0, y: 250.0 })
            .glide_ratio(6.0)
            .safety_margin(20.0)
            .ceiling(3000.0)
            .build()
            .unwrap();
        let mut window = Window::from_reader(Cursor::new(asc(&rows, 100.0)), &params).unwrap();
        propagate(&mut window, &params);

        let home = window.home();
        assert_eq!(window[home].altitude, 120.0);
        for (pos, cell) in window.iter().filter(|(pos, _)| *pos != home) {
            // Home carries one margin and the glide from it owes another.
            assert_eq!(cell.origin, home);
            let expected = 120.0 + window.distance(pos, home) / 6.0 + 20.0;
            assert_relative_eq!(cell.altitude, expected);
        }
    }

    #[test]
    fn test_home_keeps_own_altitude() {
        let rows = ["50 900 50", "900 50 900", "50 900 50"];
        let params = Params::builder()
            .home(Coord { x: 150.0, y: 150.0 })
            .glide_ratio(20.0)
            .ground_clearance(10.0)
            .safety_margin(100.0)
            .ceiling(4000.0)
            .build()
            .unwrap();
        let mut window = Window::from_reader(Cursor::new(asc(&rows, 100.0)), &params).unwrap();
        propagate(&mut window, &params);
        let home = window[window.home()];
        assert_eq!(home.altitude, 160.0);
        assert_eq!(home.origin, window.home());
    }

    #[test]
    fn test_seed_skips_neighbours_sharing_origin() {
        let (mut window, params) = flat();
        let home = window.home();
        let mut queue: VecDeque<Edge> = VecDeque::new();
        enqueue_neighbours(&window, home, &mut queue);
        assert_eq!(queue.len(), 4);
        assert!(queue.iter().all(|edge| edge.parent == home));

        propagate(&mut window, &params);
        queue.clear();
        enqueue_neighbours(&window, home, &mut queue);
        assert!(queue.is_empty());
    }
}
