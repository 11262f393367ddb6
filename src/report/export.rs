use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::table::Table;
use crate::error::Result;

/// Writes the table as CSV: the header row, then one row per table row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.headers())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, file)?;
    info!("[REPORT] Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_json_file<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    write_json(value, File::create(path)?)?;
    info!("[REPORT] Wrote JSON to {}", path.display());
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    write_json(value, io::stdout().lock())
}
