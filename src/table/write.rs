// src/table/write.rs

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

use super::Table;

/// Serialize `table` as TSV: header, template row if any, then data rows.
pub fn write_tsv<W: Write>(table: &Table, out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(out);

    wtr.write_record(table.columns())
        .context("writing TSV header")?;
    if let Some(template) = table.template() {
        wtr.write_record(template)
            .context("writing TSV template row")?;
    }
    for row in table.rows() {
        wtr.write_record(row.cells()).context("writing TSV row")?;
    }
    wtr.flush().context("flushing TSV writer")?;
    Ok(())
}

/// Write `table` to `path` atomically.
///
/// The table goes to a temp file beside `path` first and is then renamed over
/// it, so `path` may be the very file the table was read from.
pub fn write_tsv_file<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;

    let mut tmp =
        NamedTempFile::new_in(dir).with_context(|| format!("creating temp file in {:?}", dir))?;
    write_tsv(table, tmp.as_file_mut())?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("syncing {:?}", tmp.path()))?;
    debug!(tmp = ?tmp.path(), "wrote temp output");

    tmp.persist(path)
        .with_context(|| format!("renaming temp file -> {:?}", path))?;
    Ok(())
}
