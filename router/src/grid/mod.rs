pub mod dense;

pub use dense::DenseGrid;

use mazer_common::db::core::LayerDirection;
use mazer_common::geom::coord::GridCoord;

/// Layer 1 runs horizontal (x motion is unit cost), layer 2 vertical.
pub const DEFAULT_DIRECTIONS: [LayerDirection; 2] =
    [LayerDirection::Horizontal, LayerDirection::Vertical];

/// The mutable occupancy surface shared by every search. Obstacles are
/// fixed at build time; routed cells accumulate as nets commit and are
/// never cleared. Both block traversal.
pub trait RoutingGrid {
    fn rows(&self) -> u32;
    fn cols(&self) -> u32;
    fn direction(&self, layer: u8) -> LayerDirection;

    fn set_obstacle(&mut self, coord: GridCoord);
    /// Permanent obstacle only; routed cells do not count.
    fn is_obstacle(&self, coord: GridCoord) -> bool;

    fn mark_routed(&mut self, coord: GridCoord);
    /// Obstacle or routed, or out of bounds.
    fn is_blocked(&self, coord: GridCoord) -> bool;
}
