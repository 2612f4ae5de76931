use crate::db::core::RoutingDB;
use crate::geom::coord::GridCoord;
use anyhow::{Context, Result, anyhow, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Reads the plain-text routing problem format:
///
/// ```text
/// ROWS, COLS, VIA_COST, NON_PREF_COST
/// OBS (layer, x, y)
/// net<ID> (layer, x, y) (layer, x, y) ...
/// ```
///
/// Layers are 1-based on disk and converted to 0-based here.
pub fn parse(filename: &str) -> Result<RoutingDB> {
    let file = File::open(filename).context(format!("Failed to open netlist: {}", filename))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| anyhow!("{}: empty file", filename))?
        .context("Failed to read header line")?;
    let mut db = parse_header(&header).context(format!("{}: bad header", filename))?;

    for (lineno, line) in lines.enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("OBS") {
            let cells = parse_coords(rest)?;
            let cell = cells
                .first()
                .ok_or_else(|| anyhow!("line {}: OBS with no coordinate", lineno + 2))?;
            db.add_obstacle(*cell);
        } else if let Some(rest) = trimmed.strip_prefix("net") {
            let (id, pins) = parse_net(rest)
                .context(format!("line {}: bad net record '{}'", lineno + 2, trimmed))?;
            db.add_net(id, pins);
        } else {
            bail!("line {}: unrecognized record '{}'", lineno + 2, trimmed);
        }
    }

    log::info!(
        "Parsed {}: {}x{} grid, {} obstacles, {} nets (via={}, non-pref={})",
        filename,
        db.rows,
        db.cols,
        db.obstacles.len(),
        db.num_nets(),
        db.via_cost,
        db.non_pref_cost
    );
    Ok(db)
}

fn parse_header(line: &str) -> Result<RoutingDB> {
    let fields: Vec<i64> = line
        .split(',')
        .map(|f| f.trim().parse::<i64>().context("non-numeric header field"))
        .collect::<Result<_>>()?;
    if fields.len() != 4 {
        bail!("expected 4 header fields, got {}", fields.len());
    }
    if fields[0] <= 0 || fields[1] <= 0 {
        bail!("grid dimensions must be positive");
    }
    if fields[2] <= 0 || fields[3] <= 0 {
        bail!("cost parameters must be positive");
    }
    Ok(RoutingDB::new(
        fields[0] as u32,
        fields[1] as u32,
        fields[2],
        fields[3],
    ))
}

fn parse_net(rest: &str) -> Result<(u32, Vec<GridCoord>)> {
    let rest = rest.trim_start();
    let id_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let id: u32 = rest[..id_end].parse().context("missing numeric net id")?;
    let pins = parse_coords(&rest[id_end..])?;
    if pins.is_empty() {
        log::warn!("net{} has no pins", id);
    }
    Ok((id, pins))
}

/// Pulls every "(l, x, y)" group out of a line fragment, converting the
/// layer to 0-based.
fn parse_coords(s: &str) -> Result<Vec<GridCoord>> {
    let mut coords = Vec::new();
    let mut rest = s;
    while let Some(open) = rest.find('(') {
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| anyhow!("unbalanced parenthesis in '{}'", s))?;
        let fields: Vec<i64> = rest[open + 1..close]
            .split(',')
            .map(|f| {
                f.trim()
                    .parse::<i64>()
                    .context(format!("bad coordinate field in '{}'", s))
            })
            .collect::<Result<_>>()?;
        if fields.len() != 3 {
            bail!("coordinate needs 3 fields, got {}", fields.len());
        }
        let (layer, x, y) = (fields[0], fields[1], fields[2]);
        if !(1..=2).contains(&layer) || x < 0 || y < 0 {
            bail!("coordinate ({}, {}, {}) out of range", layer, x, y);
        }
        coords.push(GridCoord::new(layer as u8 - 1, x as u32, y as u32));
        rest = &rest[close + 1..];
    }
    Ok(coords)
}
