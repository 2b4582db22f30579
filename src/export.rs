use crate::grid::Grid;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the grid as CSV
///
/// The first line is a `# Grid dimensions: W x H` comment. Each following
/// line is one row of 0/1 values, northernmost row first.
pub fn write_csv<W: Write>(grid: &Grid, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Grid dimensions: {} x {}", grid.width(), grid.height())?;

    for y in (0..grid.height()).rev() {
        let line = grid
            .row(y)
            .iter()
            .map(|cell| cell.value().to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{}", line)?;
    }

    Ok(())
}

/// Export a grid to a CSV file
pub fn export_grid_to_file(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Render the grid as text, `#` for wall and `.` for open
pub fn render_ascii(grid: &Grid) -> String {
    grid.to_string()
}
