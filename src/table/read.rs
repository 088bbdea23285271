// src/table/read.rs

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

use super::{Row, Table};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Treat the line after the header as a ROBOT template row, not data.
    pub template_row: bool,
}

/// Parse a tab-separated term table from `text`.
pub fn parse_tsv(text: &str, opts: ReadOptions) -> Result<Table> {
    read_tsv(text.as_bytes(), opts)
}

/// Parse a tab-separated term table from any reader.
///
/// Every cell is kept as a string; empty cells stay empty rather than
/// becoming a null marker, so `"NA"` or `"null"` labels survive untouched.
pub fn read_tsv<R: Read>(reader: R, opts: ReadOptions) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let header = records
        .next()
        .ok_or_else(|| anyhow!("table is empty: no header line"))?
        .context("parsing TSV header")?;
    let columns: Vec<String> = header
        .iter()
        .map(|c| c.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut table = Table::new(columns);

    if opts.template_row {
        let template = records
            .next()
            .ok_or_else(|| anyhow!("expected a template row under the header"))?
            .context("parsing TSV template row")?;
        table = table.with_template(template.iter().map(str::to_string).collect());
    }

    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("parsing TSV record {}", idx + 1))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        table.push(Row::new(record.iter().map(str::to_string).collect()));
    }

    debug!(
        columns = table.columns().len(),
        rows = table.len(),
        template = opts.template_row,
        "parsed term table"
    );
    Ok(table)
}
