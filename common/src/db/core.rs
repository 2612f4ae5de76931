use crate::geom::coord::GridCoord;
use std::collections::BTreeMap;
use thiserror::Error;

/// Preferred travel axis of a routing layer. `Horizontal` means x-axis
/// motion is the unit-cost direction, `Vertical` means y-axis motion is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("net {net}: pin ({layer}, {x}, {y}) is outside the {rows}x{cols} grid")]
    PinOutOfBounds {
        net: u32,
        layer: u8,
        x: u32,
        y: u32,
        rows: u32,
        cols: u32,
    },
    #[error("net {net}: pin ({layer}, {x}, {y}) sits on a permanent obstacle")]
    PinOnObstacle { net: u32, layer: u8, x: u32, y: u32 },
    #[error("predecessor chain for ({layer}, {x}, {y}) does not reach its source")]
    BrokenPredecessorChain { layer: u8, x: u32, y: u32 },
}

/// The routing problem: grid dimensions, cost parameters, permanent
/// obstacles and the nets to connect. Built once by the parser (or by
/// hand in tests) and immutable during routing.
///
/// Nets are keyed by numeric id in a `BTreeMap`, so natural iteration
/// order is id-ascending. That order is observable: it is the default
/// routing sequence.
#[derive(Debug, Default)]
pub struct RoutingDB {
    pub rows: u32,
    pub cols: u32,
    pub via_cost: i64,
    pub non_pref_cost: i64,
    pub obstacles: Vec<GridCoord>,
    pub nets: BTreeMap<u32, Vec<GridCoord>>,
}

impl RoutingDB {
    pub fn new(rows: u32, cols: u32, via_cost: i64, non_pref_cost: i64) -> Self {
        Self {
            rows,
            cols,
            via_cost,
            non_pref_cost,
            obstacles: Vec::new(),
            nets: BTreeMap::new(),
        }
    }

    pub fn add_obstacle(&mut self, cell: GridCoord) {
        self.obstacles.push(cell);
    }

    pub fn add_net(&mut self, id: u32, pins: Vec<GridCoord>) {
        self.nets.insert(id, pins);
    }

    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn in_bounds(&self, cell: GridCoord) -> bool {
        cell.layer < 2 && cell.x < self.rows && cell.y < self.cols
    }
}

/// One net's computed path. An empty path means the net was degenerate
/// (<2 pins) or every hop was unroutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutedNet {
    pub id: u32,
    pub path: Vec<GridCoord>,
}

/// All routed nets, in the exact order the sequencer processed them.
/// That order is part of the contract: it decides which nets' cells
/// blocked which, and it is the presentation order for writers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutedDesign {
    pub nets: Vec<RoutedNet>,
}

impl RoutedDesign {
    pub fn path_of(&self, id: u32) -> Option<&[GridCoord]> {
        self.nets
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.path.as_slice())
    }
}
