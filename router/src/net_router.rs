use crate::algo::DijkstraSolver;
use crate::grid::RoutingGrid;
use crate::grid::dense::DenseGrid;
use crate::ordering;
use mazer_common::db::core::{RouteError, RoutedDesign, RoutedNet, RoutingDB};
use mazer_common::geom::coord::GridCoord;
use mazer_common::util::config::RoutingConfig;
use std::time::Instant;

/// Routes every net of `db`, in sequencer order, against one shared
/// grid. Each hop's cells are committed before the next hop starts, so
/// a net avoids its own geometry and every later net sees it too. Nets
/// routed earlier win contested cells; that order dependence is the
/// contract, not an accident.
pub fn run(db: &RoutingDB, config: &RoutingConfig) -> Result<RoutedDesign, RouteError> {
    log::info!("Starting Detail Routing for {} nets...", db.num_nets());
    let start_time = Instant::now();

    let mut grid = DenseGrid::from_db(db);
    validate_pins(db, &grid)?;

    let order = ordering::sequence_nets(db, &grid, config);
    if config.enable_net_reordering {
        log::info!("Net reordering enabled (hardest first)");
    } else {
        log::info!("Net reordering disabled (id order)");
    }

    let mut solver = DijkstraSolver::new();
    let mut design = RoutedDesign::default();
    let mut failed = 0;

    for (id, pins) in order {
        let path = stitch_net(&mut grid, &mut solver, db, id, pins)?;
        if path.is_empty() && pins.len() >= 2 {
            failed += 1;
        }
        design.nets.push(RoutedNet { id, path });
    }

    log::info!(
        "Routed {} nets ({} unroutable) in {:.2}s",
        design.nets.len(),
        failed,
        start_time.elapsed().as_secs_f32()
    );
    Ok(design)
}

/// Every pin must lie on the grid and off the permanent obstacles.
/// Earlier-routed geometry covering a pin is not checked here: that is
/// a legal mid-run state and simply makes the hop unroutable.
fn validate_pins(db: &RoutingDB, grid: &DenseGrid) -> Result<(), RouteError> {
    for (&net, pins) in &db.nets {
        for &pin in pins {
            if !db.in_bounds(pin) {
                return Err(RouteError::PinOutOfBounds {
                    net,
                    layer: pin.layer,
                    x: pin.x,
                    y: pin.y,
                    rows: db.rows,
                    cols: db.cols,
                });
            }
            if grid.is_obstacle(pin) {
                return Err(RouteError::PinOnObstacle {
                    net,
                    layer: pin.layer,
                    x: pin.x,
                    y: pin.y,
                });
            }
        }
    }
    Ok(())
}

/// Chains a net's pins into one path. A hop's first coordinate
/// duplicates the previous hop's last cell and is dropped, unless the
/// previous hop contributed nothing (failed or first). A hop that
/// cannot be routed contributes nothing and leaves a gap.
fn stitch_net(
    grid: &mut DenseGrid,
    solver: &mut DijkstraSolver,
    db: &RoutingDB,
    id: u32,
    pins: &[GridCoord],
) -> Result<Vec<GridCoord>, RouteError> {
    // Zero or one pin: nothing to connect. The pin-pair loop below is
    // only safe from here on.
    if pins.len() < 2 {
        return Ok(Vec::new());
    }

    let mut full_path = Vec::new();
    let mut prev_contributed = false;
    for i in 0..pins.len() - 1 {
        let segment = solver.find_path(grid, pins[i], pins[i + 1], db.via_cost, db.non_pref_cost)?;
        if segment.is_empty() {
            log::warn!("net{}: hop {} -> {} is unroutable", id, i, i + 1);
            prev_contributed = false;
            continue;
        }

        let skip = if prev_contributed { 1 } else { 0 };
        for &cell in &segment[skip..] {
            grid.mark_routed(cell);
            full_path.push(cell);
        }
        prev_contributed = true;
    }
    Ok(full_path)
}
