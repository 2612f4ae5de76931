use crate::db::core::{RoutedDesign, RoutingDB};
use crate::geom::coord::GridCoord;
use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Post-route verification. Hard failures: a path cell out of bounds or
/// on a permanent obstacle, the same cell claimed by two nets, or a
/// coordinate repeated back-to-back. Discontinuities are only warned
/// about: a net with an unroutable hop legitimately carries a gap.
pub fn run_route_check(db: &RoutingDB, design: &RoutedDesign) -> Result<(), String> {
    log::info!("Starting Route Verification...");
    let valid = AtomicBool::new(true);
    let gaps = AtomicUsize::new(0);

    let obstacles: HashSet<GridCoord> = db.obstacles.iter().copied().collect();
    let claims: DashMap<GridCoord, u32> = DashMap::new();

    design.nets.par_iter().for_each(|net| {
        for pair in net.path.windows(2) {
            if pair[0] == pair[1] {
                log::error!("FAIL: net{} repeats cell {:?}", net.id, pair[0]);
                valid.store(false, Ordering::Relaxed);
            } else if !is_adjacent(pair[0], pair[1]) {
                log::warn!(
                    "net{} has a gap between {:?} and {:?} (unroutable hop)",
                    net.id,
                    pair[0],
                    pair[1]
                );
                gaps.fetch_add(1, Ordering::Relaxed);
            }
        }

        for &cell in &net.path {
            if !db.in_bounds(cell) {
                log::error!("FAIL: net{} leaves the grid at {:?}", net.id, cell);
                valid.store(false, Ordering::Relaxed);
            }
            if obstacles.contains(&cell) {
                log::error!("FAIL: net{} crosses obstacle at {:?}", net.id, cell);
                valid.store(false, Ordering::Relaxed);
            }
            if let Some(owner) = claims.insert(cell, net.id) {
                if owner != net.id {
                    log::error!(
                        "FAIL: cell {:?} claimed by both net{} and net{}",
                        cell,
                        owner,
                        net.id
                    );
                    valid.store(false, Ordering::Relaxed);
                }
            }
        }
    });

    let gap_count = gaps.load(Ordering::Relaxed);
    if gap_count > 0 {
        log::warn!("Verification found {} gaps from unroutable hops", gap_count);
    }

    if valid.load(Ordering::Relaxed) {
        log::info!("Route Verification PASSED");
        Ok(())
    } else {
        Err("Route verification failed".to_string())
    }
}

/// Two cells are a legal step if they share a layer and differ by one
/// in exactly one in-plane axis, or share (x, y) and differ in layer.
fn is_adjacent(a: GridCoord, b: GridCoord) -> bool {
    if a.layer != b.layer {
        return a.x == b.x && a.y == b.y;
    }
    a.manhattan(&b) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::core::RoutedNet;

    fn db_10x10() -> RoutingDB {
        RoutingDB::new(10, 10, 5, 10)
    }

    #[test]
    fn accepts_clean_route() {
        let design = RoutedDesign {
            nets: vec![RoutedNet {
                id: 1,
                path: vec![
                    GridCoord::new(0, 0, 0),
                    GridCoord::new(0, 1, 0),
                    GridCoord::new(1, 1, 0),
                ],
            }],
        };
        assert!(run_route_check(&db_10x10(), &design).is_ok());
    }

    #[test]
    fn rejects_shared_cell() {
        let shared = GridCoord::new(0, 3, 3);
        let design = RoutedDesign {
            nets: vec![
                RoutedNet { id: 1, path: vec![shared] },
                RoutedNet { id: 2, path: vec![shared] },
            ],
        };
        assert!(run_route_check(&db_10x10(), &design).is_err());
    }

    #[test]
    fn rejects_obstacle_crossing() {
        let mut db = db_10x10();
        db.add_obstacle(GridCoord::new(0, 2, 2));
        let design = RoutedDesign {
            nets: vec![RoutedNet {
                id: 1,
                path: vec![GridCoord::new(0, 2, 1), GridCoord::new(0, 2, 2)],
            }],
        };
        assert!(run_route_check(&db, &design).is_err());
    }

    #[test]
    fn gap_is_not_fatal() {
        let design = RoutedDesign {
            nets: vec![RoutedNet {
                id: 1,
                path: vec![GridCoord::new(0, 0, 0), GridCoord::new(0, 5, 5)],
            }],
        };
        assert!(run_route_check(&db_10x10(), &design).is_ok());
    }
}
