use crate::db::core::RoutedDesign;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};

/// Writes one line per net, in processing order:
///
/// ```text
/// net<ID> (layer, x, y) (layer, x, y) ...
/// ```
///
/// Layers are written 1-based to match the input format. A net whose
/// path is empty still gets its `net<ID>` line, so consumers see every
/// processed net.
pub fn write_routes(design: &RoutedDesign, filename: &str) -> Result<()> {
    let file = File::create(filename).context(format!("Failed to create {}", filename))?;
    let mut out = BufWriter::new(file);

    for net in &design.nets {
        write!(out, "net{}", net.id)?;
        for cell in &net.path {
            write!(out, " ({}, {}, {})", cell.layer + 1, cell.x, cell.y)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    log::info!("Wrote {} routed nets to {}", design.nets.len(), filename);
    Ok(())
}
