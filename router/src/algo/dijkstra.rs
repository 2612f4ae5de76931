use crate::grid::RoutingGrid;
use mazer_common::db::core::{LayerDirection, RouteError};
use mazer_common::geom::coord::GridCoord;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// In-plane moves, tried in this fixed order, then the via move.
/// Together with strict-improvement relaxation this pins down which
/// predecessor wins a cost tie, so results are deterministic.
const DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: i64,
    index: u32,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const NO_PARENT: u32 = u32::MAX;

/// Single-segment shortest-path search over the dual-layer grid.
///
/// The scratch buffers are sized once per grid and reused across hops;
/// `visited_tag` makes resets O(1) instead of refilling the distance
/// array for every segment.
pub struct DijkstraSolver {
    dist: Vec<i64>,
    parents: Vec<u32>,
    visited_tag: Vec<u32>,
    current_tag: u32,
    capacity: usize,
}

impl Default for DijkstraSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DijkstraSolver {
    pub fn new() -> Self {
        let cap = 100_000;
        Self {
            dist: vec![i64::MAX; cap],
            parents: vec![NO_PARENT; cap],
            visited_tag: vec![0; cap],
            current_tag: 1,
            capacity: cap,
        }
    }

    fn ensure_capacity(&mut self, size: usize) {
        if size > self.capacity {
            self.capacity = size.max(self.capacity * 2);
            self.dist.resize(self.capacity, i64::MAX);
            self.parents.resize(self.capacity, NO_PARENT);
            self.visited_tag.resize(self.capacity, 0);
        }
    }

    fn reset(&mut self) {
        self.current_tag += 1;
        if self.current_tag == 0 {
            self.visited_tag.fill(0);
            self.current_tag = 1;
        }
    }

    /// Routes one segment from `source` to `dest`. Returns the path
    /// inclusive of both endpoints, or an empty vector if the frontier
    /// drains without reaching `dest`.
    pub fn find_path<G: RoutingGrid + ?Sized>(
        &mut self,
        grid: &G,
        source: GridCoord,
        dest: GridCoord,
        via_cost: i64,
        non_pref_cost: i64,
    ) -> Result<Vec<GridCoord>, RouteError> {
        let rows = grid.rows();
        let cols = grid.cols();
        let plane = (rows as usize) * (cols as usize);
        self.ensure_capacity(plane * 2);
        self.reset();

        let index = |c: GridCoord| -> usize {
            (c.layer as usize) * plane + (c.x as usize) * (cols as usize) + (c.y as usize)
        };
        let coord = |idx: usize| -> GridCoord {
            let layer = (idx / plane) as u8;
            let rem = idx % plane;
            GridCoord::new(layer, (rem / cols as usize) as u32, (rem % cols as usize) as u32)
        };

        let mut heap = BinaryHeap::new();
        let src_idx = index(source);
        self.dist[src_idx] = 0;
        self.parents[src_idx] = NO_PARENT;
        self.visited_tag[src_idx] = self.current_tag;
        heap.push(State { cost: 0, index: src_idx as u32 });

        while let Some(State { cost, index: idx }) = heap.pop() {
            let curr_idx = idx as usize;
            if cost > self.dist[curr_idx] {
                continue;
            }
            let position = coord(curr_idx);
            if position == dest {
                return self.reconstruct(source, dest, &index, &coord);
            }

            for (dx, dy) in DIRS {
                let nx = position.x as i32 + dx;
                let ny = position.y as i32 + dy;
                if nx < 0 || nx >= rows as i32 || ny < 0 || ny >= cols as i32 {
                    continue;
                }
                let neighbor = GridCoord::new(position.layer, nx as u32, ny as u32);
                if grid.is_blocked(neighbor) {
                    continue;
                }

                let move_cost = match grid.direction(position.layer) {
                    LayerDirection::Horizontal if dy != 0 => non_pref_cost,
                    LayerDirection::Vertical if dx != 0 => non_pref_cost,
                    _ => 1,
                };
                self.relax(&mut heap, curr_idx, index(neighbor), cost + move_cost);
            }

            // Via: same (x, y), other layer.
            let via = GridCoord::new(1 - position.layer, position.x, position.y);
            if !grid.is_blocked(via) {
                self.relax(&mut heap, curr_idx, index(via), cost + via_cost);
            }
        }

        Ok(Vec::new())
    }

    #[inline]
    fn relax(&mut self, heap: &mut BinaryHeap<State>, from: usize, to: usize, new_cost: i64) {
        // Strict improvement only: an equal-cost rediscovery never
        // replaces the recorded predecessor.
        if self.visited_tag[to] != self.current_tag || new_cost < self.dist[to] {
            self.dist[to] = new_cost;
            self.parents[to] = from as u32;
            self.visited_tag[to] = self.current_tag;
            heap.push(State { cost: new_cost, index: to as u32 });
        }
    }

    fn reconstruct(
        &self,
        source: GridCoord,
        dest: GridCoord,
        index: &dyn Fn(GridCoord) -> usize,
        coord: &dyn Fn(usize) -> GridCoord,
    ) -> Result<Vec<GridCoord>, RouteError> {
        let mut path = Vec::new();
        let mut curr = index(dest);
        loop {
            let cell = coord(curr);
            // Guard against a zero-length final hop re-emitting a cell.
            if path.last() != Some(&cell) {
                path.push(cell);
            }
            let parent = self.parents[curr];
            if parent == NO_PARENT {
                break;
            }
            curr = parent as usize;
        }

        if path.last() != Some(&source) {
            return Err(RouteError::BrokenPredecessorChain {
                layer: dest.layer,
                x: dest.x,
                y: dest.y,
            });
        }
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DenseGrid;

    fn solve(
        grid: &DenseGrid,
        src: GridCoord,
        dst: GridCoord,
        via: i64,
        non_pref: i64,
    ) -> (Vec<GridCoord>, i64) {
        let mut solver = DijkstraSolver::new();
        let path = solver.find_path(grid, src, dst, via, non_pref).unwrap();
        let plane = (grid.rows() as usize) * (grid.cols() as usize);
        let idx =
            (dst.layer as usize) * plane + (dst.x as usize) * grid.cols() as usize + dst.y as usize;
        let cost = if path.is_empty() { -1 } else { solver.dist[idx] };
        (path, cost)
    }

    // Layer 1 prefers x motion: a straight x run costs 1 per step.
    #[test]
    fn preferred_axis_run_costs_unit_steps() {
        let grid = DenseGrid::new(10, 10);
        let (path, cost) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 5, 0),
            5,
            10,
        );
        assert_eq!(path.len(), 6);
        assert_eq!(cost, 5);
        assert!(path.iter().all(|c| c.layer == 0 && c.y == 0));
    }

    // An off-grain run on layer 1 pays the non-preferred cost per step
    // unless switching layers twice is cheaper.
    #[test]
    fn off_grain_run_pays_penalty_or_vias() {
        let grid = DenseGrid::new(10, 10);
        // via=100 makes layer hopping unattractive: 5 y-steps at 10.
        let (_, cost) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 0, 5),
            100,
            10,
        );
        assert_eq!(cost, 50);
        // via=2: down to layer 2 (y-preferred), across, back up: 5*1 + 2*2.
        let (_, cost) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 0, 5),
            2,
            10,
        );
        assert_eq!(cost, 9);
    }

    #[test]
    fn via_only_segment() {
        let grid = DenseGrid::new(10, 10);
        let (path, cost) = solve(
            &grid,
            GridCoord::new(0, 3, 3),
            GridCoord::new(1, 3, 3),
            5,
            10,
        );
        assert_eq!(path, vec![GridCoord::new(0, 3, 3), GridCoord::new(1, 3, 3)]);
        assert_eq!(cost, 5);
    }

    #[test]
    fn zero_length_segment_is_single_cell() {
        let grid = DenseGrid::new(10, 10);
        let pin = GridCoord::new(0, 4, 4);
        let (path, _) = solve(&grid, pin, pin, 5, 10);
        assert_eq!(path, vec![pin]);
    }

    #[test]
    fn blocked_destination_is_unreachable() {
        let mut grid = DenseGrid::new(10, 10);
        let dst = GridCoord::new(0, 5, 5);
        grid.set_obstacle(dst);
        let (path, _) = solve(&grid, GridCoord::new(0, 0, 0), dst, 5, 10);
        assert!(path.is_empty());
    }

    #[test]
    fn walled_off_destination_is_unreachable() {
        let mut grid = DenseGrid::new(5, 5);
        // Box in (4,4) on both layers.
        for layer in 0..2 {
            grid.set_obstacle(GridCoord::new(layer, 3, 4));
            grid.set_obstacle(GridCoord::new(layer, 4, 3));
            grid.set_obstacle(GridCoord::new(layer, 3, 3));
        }
        grid.set_obstacle(GridCoord::new(1, 4, 4));
        let (path, _) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 4, 4),
            5,
            10,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn routes_around_obstacles() {
        let mut grid = DenseGrid::new(5, 5);
        // Wall across x=2 on both layers except (2, 4).
        for layer in 0..2 {
            for y in 0..4 {
                grid.set_obstacle(GridCoord::new(layer, 2, y));
            }
        }
        let (path, _) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 4, 0),
            5,
            10,
        );
        assert!(!path.is_empty());
        assert_eq!(path.first(), Some(&GridCoord::new(0, 0, 0)));
        assert_eq!(path.last(), Some(&GridCoord::new(0, 4, 0)));
        // The wall forces the detour through y=4.
        assert!(path.iter().any(|c| c.y == 4));
        for c in &path {
            assert!(!grid.is_blocked(*c) || *c == GridCoord::new(0, 0, 0));
        }
    }

    // The preferred-axis assignment is per-grid; flipping it flips
    // which runs are unit cost.
    #[test]
    fn flipped_layer_directions_flip_costs() {
        use mazer_common::db::core::LayerDirection;
        let mut grid = DenseGrid::new(10, 10);
        grid.set_layer_direction(0, LayerDirection::Vertical);
        grid.set_layer_direction(1, LayerDirection::Horizontal);
        let (_, cost) = solve(
            &grid,
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 0, 5),
            100,
            10,
        );
        assert_eq!(cost, 5);
    }

    #[test]
    fn deterministic_across_runs() {
        let mut grid = DenseGrid::new(8, 8);
        grid.set_obstacle(GridCoord::new(0, 3, 3));
        let mut solver = DijkstraSolver::new();
        let a = solver
            .find_path(&grid, GridCoord::new(0, 0, 0), GridCoord::new(1, 7, 7), 5, 10)
            .unwrap();
        let b = solver
            .find_path(&grid, GridCoord::new(0, 0, 0), GridCoord::new(1, 7, 7), 5, 10)
            .unwrap();
        assert_eq!(a, b);
    }
}
