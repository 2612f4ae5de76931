use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;

/// Emits a random routing problem in the text netlist format. Obstacle
/// and pin positions are drawn uniformly; pins never land on obstacles.
pub fn generate_random_netlist(
    filename: &str,
    rows: u32,
    cols: u32,
    num_nets: usize,
    num_obstacles: usize,
    pins_per_net: usize,
    via_cost: i64,
    non_pref_cost: i64,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    let mut rng = rand::thread_rng();

    let cells = (rows as usize) * (cols as usize) * 2;
    let obstacles = num_obstacles.min(cells / 4);
    let pins = pins_per_net.max(2);

    log::info!(
        "Generating benchmark: {}x{} grid, {} obstacles, {} nets x {} pins",
        rows,
        cols,
        obstacles,
        num_nets,
        pins
    );

    writeln!(file, "{}, {}, {}, {}", rows, cols, via_cost, non_pref_cost)?;

    let mut blocked = HashSet::new();
    while blocked.len() < obstacles {
        let cell = (
            rng.gen_range(0..2u8),
            rng.gen_range(0..rows),
            rng.gen_range(0..cols),
        );
        if blocked.insert(cell) {
            writeln!(file, "OBS ({}, {}, {})", cell.0 + 1, cell.1, cell.2)?;
        }
    }

    for net_id in 1..=num_nets {
        write!(file, "net{}", net_id)?;
        let mut placed = 0;
        while placed < pins {
            let cell = (
                rng.gen_range(0..2u8),
                rng.gen_range(0..rows),
                rng.gen_range(0..cols),
            );
            if blocked.contains(&cell) {
                continue;
            }
            write!(file, " ({}, {}, {})", cell.0 + 1, cell.1, cell.2)?;
            placed += 1;
        }
        writeln!(file)?;
    }

    Ok(())
}
