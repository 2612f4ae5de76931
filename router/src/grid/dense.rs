use super::{DEFAULT_DIRECTIONS, RoutingGrid};
use mazer_common::db::core::{LayerDirection, RoutingDB};
use mazer_common::geom::coord::GridCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CellState {
    #[default]
    Free,
    Obstacle,
    Routed,
}

pub struct DenseGrid {
    rows: u32,
    cols: u32,
    cells: Vec<CellState>,
    directions: [LayerDirection; 2],
}

impl DenseGrid {
    pub fn new(rows: u32, cols: u32) -> Self {
        let size = (rows as usize) * (cols as usize) * 2;

        if size > 2_000_000_000 {
            log::warn!(
                "Allocating large DenseGrid: {} elements. Ensure sufficient RAM.",
                size
            );
        }

        Self {
            rows,
            cols,
            cells: vec![CellState::default(); size],
            directions: DEFAULT_DIRECTIONS,
        }
    }

    /// Builds the initial surface: every obstacle marked, everything
    /// else free.
    pub fn from_db(db: &RoutingDB) -> Self {
        let mut grid = Self::new(db.rows, db.cols);
        for &obs in &db.obstacles {
            if grid.in_bounds(obs) {
                grid.set_obstacle(obs);
            } else {
                log::warn!("Dropping out-of-bounds obstacle {:?}", obs);
            }
        }
        grid
    }

    pub fn set_layer_direction(&mut self, layer: u8, direction: LayerDirection) {
        if (layer as usize) < self.directions.len() {
            self.directions[layer as usize] = direction;
        }
    }

    #[inline(always)]
    fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.layer < 2 && coord.x < self.rows && coord.y < self.cols
    }

    #[inline(always)]
    fn index(&self, coord: GridCoord) -> usize {
        ((coord.layer as usize) * (self.rows as usize) + (coord.x as usize))
            * (self.cols as usize)
            + (coord.y as usize)
    }
}

impl RoutingGrid for DenseGrid {
    fn rows(&self) -> u32 {
        self.rows
    }
    fn cols(&self) -> u32 {
        self.cols
    }
    fn direction(&self, layer: u8) -> LayerDirection {
        self.directions[layer as usize]
    }

    fn set_obstacle(&mut self, coord: GridCoord) {
        let idx = self.index(coord);
        self.cells[idx] = CellState::Obstacle;
    }

    fn is_obstacle(&self, coord: GridCoord) -> bool {
        if !self.in_bounds(coord) {
            return true;
        }
        self.cells[self.index(coord)] == CellState::Obstacle
    }

    fn mark_routed(&mut self, coord: GridCoord) {
        let idx = self.index(coord);
        // An obstacle stays an obstacle; both states block equally.
        if self.cells[idx] == CellState::Free {
            self.cells[idx] = CellState::Routed;
        }
    }

    fn is_blocked(&self, coord: GridCoord) -> bool {
        if !self.in_bounds(coord) {
            return true;
        }
        self.cells[self.index(coord)] != CellState::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_and_routed_both_block() {
        let mut grid = DenseGrid::new(4, 4);
        let a = GridCoord::new(0, 1, 1);
        let b = GridCoord::new(1, 2, 3);
        assert!(!grid.is_blocked(a));

        grid.set_obstacle(a);
        grid.mark_routed(b);
        assert!(grid.is_blocked(a));
        assert!(grid.is_blocked(b));
        assert!(grid.is_obstacle(a));
        assert!(!grid.is_obstacle(b));
    }

    #[test]
    fn out_of_bounds_is_blocked() {
        let grid = DenseGrid::new(4, 4);
        assert!(grid.is_blocked(GridCoord::new(0, 4, 0)));
        assert!(grid.is_blocked(GridCoord::new(0, 0, 4)));
        assert!(grid.is_blocked(GridCoord::new(2, 0, 0)));
    }

    #[test]
    fn layers_are_independent() {
        let mut grid = DenseGrid::new(4, 4);
        grid.set_obstacle(GridCoord::new(0, 2, 2));
        assert!(!grid.is_blocked(GridCoord::new(1, 2, 2)));
    }
}
