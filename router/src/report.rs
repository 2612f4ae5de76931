use mazer_common::db::core::LayerDirection;
use mazer_common::geom::coord::GridCoord;

/// Hop classification for one routed path, using the same
/// preferred-axis rule the search costs moves with. `total_cost` is
/// vias x via_cost + preferred x 1 + non-preferred x non_pref_cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub vias: u32,
    pub preferred: u32,
    pub non_preferred: u32,
    pub total_cost: i64,
}

impl RouteSummary {
    pub fn of_path(
        path: &[GridCoord],
        directions: [LayerDirection; 2],
        via_cost: i64,
        non_pref_cost: i64,
    ) -> Self {
        let mut summary = RouteSummary::default();
        for pair in path.windows(2) {
            let (prev, curr) = (pair[0], pair[1]);
            if prev.layer != curr.layer {
                summary.vias += 1;
            } else {
                let moved_y = prev.y != curr.y;
                let on_grain = match directions[curr.layer as usize] {
                    LayerDirection::Horizontal => !moved_y,
                    LayerDirection::Vertical => moved_y,
                };
                if on_grain {
                    summary.preferred += 1;
                } else {
                    summary.non_preferred += 1;
                }
            }
        }
        summary.total_cost = summary.vias as i64 * via_cost
            + summary.preferred as i64
            + summary.non_preferred as i64 * non_pref_cost;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_DIRECTIONS;

    #[test]
    fn classifies_and_prices_hops() {
        // x-run on layer 1, via up, y-step on layer 2 (preferred),
        // x-step on layer 2 (non-preferred).
        let path = vec![
            GridCoord::new(0, 0, 0),
            GridCoord::new(0, 1, 0),
            GridCoord::new(0, 2, 0),
            GridCoord::new(1, 2, 0),
            GridCoord::new(1, 2, 1),
            GridCoord::new(1, 3, 1),
        ];
        let s = RouteSummary::of_path(&path, DEFAULT_DIRECTIONS, 5, 10);
        assert_eq!(s.vias, 1);
        assert_eq!(s.preferred, 3);
        assert_eq!(s.non_preferred, 1);
        assert_eq!(s.total_cost, 5 + 3 + 10);
    }

    #[test]
    fn empty_and_single_cell_paths_cost_nothing() {
        let s = RouteSummary::of_path(&[], DEFAULT_DIRECTIONS, 5, 10);
        assert_eq!(s, RouteSummary::default());
        let s = RouteSummary::of_path(&[GridCoord::new(0, 1, 1)], DEFAULT_DIRECTIONS, 5, 10);
        assert_eq!(s.total_cost, 0);
    }
}
