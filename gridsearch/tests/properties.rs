use std::collections::HashMap;

use gridsearch::{bfs, bfs_to, dijkstra, dijkstra_to, Cost, Grid, Point};
use proptest::prelude::*;

/// A small grid of walls (`#`) and floor (`.`) whose top-left cell is floor,
/// plus a weight 1..=9 per cell.
fn maze() -> impl Strategy<Value = (Grid<u8>, Grid<u8>)> {
    (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
        (
            prop::collection::vec(prop::bool::weighted(0.3), w * h),
            prop::collection::vec(1u8..=9, w * h),
        )
            .prop_map(move |(walls, weights)| {
                let text = |cells: Vec<u8>| {
                    cells.chunks(w).map(|row| String::from_utf8_lossy(row).into_owned()).collect::<Vec<_>>().join("\n")
                };
                let mut floor: Vec<u8> = walls.iter().map(|&wall| if wall { b'#' } else { b'.' }).collect();
                floor[0] = b'.';
                let weights = weights.iter().map(|d| b'0' + d).collect();
                (Grid::from_bytes(&text(floor)).unwrap(), Grid::digits(&text(weights)).unwrap())
            })
    })
}

fn open_moves(grid: &Grid<u8>, p: Point) -> Vec<Point> {
    grid.neighbors4(p).into_iter().filter(|&n| grid[n] == b'.').collect()
}

/// Relax every edge until nothing changes; entering a cell costs `weight`.
fn relaxed(grid: &Grid<u8>, weight: impl Fn(Point) -> Cost) -> Grid<Option<Cost>> {
    let mut dist = Grid::new(grid.width(), grid.height(), None);
    dist[Point::ORIGIN] = Some(0);
    loop {
        let mut changed = false;
        for p in grid.points() {
            let Some(d) = dist[p] else { continue };
            for n in open_moves(grid, p) {
                let nd = d + weight(n);
                if dist[n].map_or(true, |old| nd < old) {
                    dist[n] = Some(nd);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

proptest! {
    #[test]
    fn bfs_matches_shortest_move_count((grid, _) in maze()) {
        let dist = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        let reference = relaxed(&grid, |_| 1);
        for p in grid.points() {
            prop_assert_eq!(dist.get(&p), reference[p], "at {}", p);
        }
    }

    #[test]
    fn missing_cells_are_unreachable((grid, _) in maze()) {
        let dist = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        for p in grid.points().filter(|p| !dist.contains(p)) {
            // Nothing reached is next to it unless it is a wall.
            let walled = grid[p] == b'#';
            prop_assert!(walled || grid.neighbors4(p).iter().all(|n| !dist.contains(n)));
        }
    }

    #[test]
    fn repeated_runs_agree((grid, weights) in maze()) {
        let first = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        let second = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        prop_assert_eq!(first.iter().collect::<Vec<_>>(), second.iter().collect::<Vec<_>>());

        let weighted = |&p: &Point| open_moves(&grid, p).into_iter().map(|n| (n, weights[n] as Cost)).collect::<Vec<_>>();
        let first = dijkstra([Point::ORIGIN], weighted);
        let second = dijkstra([Point::ORIGIN], weighted);
        prop_assert_eq!(first.states(), second.states());
    }

    #[test]
    fn settle_order_ignores_successor_order((grid, weights) in maze()) {
        let weighted = |&p: &Point| open_moves(&grid, p).into_iter().map(|n| (n, weights[n] as Cost)).collect::<Vec<_>>();
        let forward = dijkstra([Point::ORIGIN], weighted);
        let reversed = dijkstra([Point::ORIGIN], |p: &Point| {
            let mut next = weighted(p);
            next.reverse();
            next
        });
        // std's HashMap is seeded randomly per instance, so its iteration order varies
        let hashed = dijkstra([Point::ORIGIN], |p: &Point| weighted(p).into_iter().collect::<HashMap<_, _>>());
        prop_assert_eq!(forward.states(), reversed.states());
        prop_assert_eq!(forward.states(), hashed.states());
    }

    #[test]
    fn unit_dijkstra_agrees_with_bfs((grid, _) in maze()) {
        let by_bfs = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        let by_dijkstra = dijkstra([Point::ORIGIN], |&p| open_moves(&grid, p).into_iter().map(|n| (n, 1)));
        prop_assert_eq!(by_bfs.len(), by_dijkstra.len());
        for (p, d) in by_bfs.iter() {
            prop_assert_eq!(by_dijkstra.get(p), Some(d));
        }
    }

    #[test]
    fn dijkstra_matches_relaxation((grid, weights) in maze()) {
        let dist = dijkstra([Point::ORIGIN], |&p| {
            open_moves(&grid, p).into_iter().map(|n| (n, weights[n] as Cost)).collect::<Vec<_>>()
        });
        let reference = relaxed(&grid, |p| weights[p] as Cost);
        for p in grid.points() {
            prop_assert_eq!(dist.get(&p), reference[p], "at {}", p);
        }
    }

    #[test]
    fn targeted_searches_agree_with_maps((grid, weights) in maze(), pick in any::<prop::sample::Index>()) {
        let target = grid.points().nth(pick.index(grid.width() * grid.height())).unwrap();
        let dist = bfs([Point::ORIGIN], |&p| open_moves(&grid, p));
        let found = bfs_to([Point::ORIGIN], |&p| open_moves(&grid, p), |&p| p == target);
        prop_assert_eq!(found.map(|(_, d)| d), dist.get(&target));

        let weighted = |&p: &Point| open_moves(&grid, p).into_iter().map(|n| (n, weights[n] as Cost)).collect::<Vec<_>>();
        let dist = dijkstra([Point::ORIGIN], weighted);
        let found = dijkstra_to([Point::ORIGIN], weighted, |&p| p == target);
        prop_assert_eq!(found.map(|(_, d)| d), dist.get(&target));
    }

    #[test]
    fn start_as_target_costs_nothing((grid, _) in maze()) {
        prop_assert_eq!(
            bfs_to([Point::ORIGIN], |&p| open_moves(&grid, p), |&p| p == Point::ORIGIN),
            Some((Point::ORIGIN, 0))
        );
    }
}
