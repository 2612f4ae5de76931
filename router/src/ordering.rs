use crate::grid::RoutingGrid;
use mazer_common::db::core::RoutingDB;
use mazer_common::geom::coord::GridCoord;
use mazer_common::util::config::RoutingConfig;

/// Maximum pairwise Manhattan distance between any two pins of a net.
pub fn net_spread(pins: &[GridCoord]) -> i64 {
    let mut max_dist = 0;
    for (i, a) in pins.iter().enumerate() {
        for b in &pins[i + 1..] {
            max_dist = max_dist.max(a.manhattan(b));
        }
    }
    max_dist
}

/// Cheap routing-difficulty proxy, summed over consecutive pin pairs:
/// Manhattan distance, plus `penalty` once if the pair spans layers or
/// would need a direction change, plus `penalty` once if any permanent
/// obstacle sits in the pair's bounding rectangle on either layer.
pub fn estimate_net_cost<G: RoutingGrid + ?Sized>(
    grid: &G,
    pins: &[GridCoord],
    penalty: i64,
) -> i64 {
    let mut cost = 0;
    for pair in pins.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        cost += a.manhattan(&b);

        if a.layer != b.layer {
            cost += penalty; // via-like
        } else if a.x != b.x && a.y != b.y {
            cost += penalty; // off-grain leg unavoidable
        }

        if rect_has_obstacle(grid, a, b) {
            cost += penalty;
        }
    }
    cost
}

fn rect_has_obstacle<G: RoutingGrid + ?Sized>(grid: &G, a: GridCoord, b: GridCoord) -> bool {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    for layer in 0..2 {
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                if grid.is_obstacle(GridCoord::new(layer, x, y)) {
                    return true;
                }
            }
        }
    }
    false
}

/// Weighted sum used for hardest-first ordering. Larger means routed
/// earlier.
pub fn net_priority<G: RoutingGrid + ?Sized>(grid: &G, pins: &[GridCoord], penalty: i64) -> i64 {
    estimate_net_cost(grid, pins, penalty) * 3 + net_spread(pins) * 2 + pins.len() as i64
}

/// Decides the routing sequence. Natural order is net-id ascending;
/// with reordering enabled, nets are sorted priority-descending with a
/// stable sort, so equal-priority nets keep their id order.
pub fn sequence_nets<'a, G: RoutingGrid + ?Sized>(
    db: &'a RoutingDB,
    grid: &G,
    config: &RoutingConfig,
) -> Vec<(u32, &'a [GridCoord])> {
    let mut order: Vec<(u32, &[GridCoord])> = db
        .nets
        .iter()
        .map(|(&id, pins)| (id, pins.as_slice()))
        .collect();

    if config.enable_net_reordering {
        let mut scored: Vec<(i64, u32, &[GridCoord])> = order
            .into_iter()
            .map(|(id, pins)| (net_priority(grid, pins, config.reorder_penalty), id, pins))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        order = scored.into_iter().map(|(_, id, pins)| (id, pins)).collect();
    }

    order
}
