// src/table/mod.rs

pub mod read;
pub mod write;

pub use read::{parse_tsv, ReadOptions};
pub use write::{write_tsv, write_tsv_file};

use crate::error::MergeError;

/// One term row. Cells are positional, aligned with the owning table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell at `idx`, or `""` past the end of the row.
    pub fn get(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Overwrite the cell at `idx`, growing the row with blanks if needed.
    pub fn set(&mut self, idx: usize, value: impl Into<String>) {
        if idx >= self.cells.len() {
            self.cells.resize(idx + 1, String::new());
        }
        self.cells[idx] = value.into();
    }

    /// Blank every cell whose index is not in `keep`.
    pub fn blank_except(&mut self, keep: &[usize]) {
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if !keep.contains(&idx) {
                cell.clear();
            }
        }
    }
}

/// An ordered term table with a fixed header.
///
/// `template` holds the optional ROBOT template line that VBO sheets carry
/// directly under the header. It never takes part in lookups and is written
/// back as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    template: Option<Vec<String>>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            template: None,
            rows: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: Vec<String>) -> Self {
        self.template = Some(pad(template, self.columns.len()));
        self
    }

    /// Same header and template, no rows.
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            template: self.template.clone(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with empty cells.
    pub fn push(&mut self, row: Row) {
        let width = self.columns.len();
        self.rows.push(Row::new(pad(row.cells, width)));
    }

    pub fn push_cells<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Row::new(cells.into_iter().map(Into::into).collect()));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn template(&self) -> Option<&[String]> {
        self.template.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, MergeError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MergeError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Indices of every row whose `column` cell equals `value`, in table order.
    pub fn positions(&self, column: usize, value: &str) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(column) == value)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Look up a cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Result<&str, MergeError> {
        let col = self.column_index(column)?;
        Ok(self.rows.get(row).map(|r| r.get(col)).unwrap_or(""))
    }
}

fn pad(mut cells: Vec<String>, width: usize) -> Vec<String> {
    if cells.len() < width {
        cells.resize(width, String::new());
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(vec!["vbo_id".into(), "term_label".into(), "notes".into()]);
        t.push_cells(["VBO:1", "Foo", "x"]);
        t.push_cells(["VBO:2"]);
        t.push_cells(["VBO:1", "Foo again", ""]);
        t
    }

    #[test]
    fn test_short_rows_are_padded() {
        let t = sample();
        assert_eq!(t.rows()[1].cells().len(), 3);
        assert_eq!(t.value(1, "term_label").unwrap(), "");
    }

    #[test]
    fn test_positions_keep_table_order() {
        let t = sample();
        let col = t.column_index("vbo_id").unwrap();
        assert_eq!(t.positions(col, "VBO:1"), vec![0, 2]);
        assert!(t.positions(col, "VBO:9").is_empty());
    }

    #[test]
    fn test_missing_column() {
        let t = sample();
        assert_eq!(
            t.column_index("GH_issue"),
            Err(MergeError::MissingColumn {
                column: "GH_issue".into()
            })
        );
    }

    #[test]
    fn test_blank_except() {
        let mut row = Row::new(vec!["a".into(), "b".into(), "c".into()]);
        row.blank_except(&[0, 2]);
        assert_eq!(row.cells(), &["a", "", "c"]);

        row.set(4, "e");
        assert_eq!(row.cells(), &["a", "", "c", "", "e"]);
    }

    #[test]
    fn test_empty_like_keeps_template() {
        let t = sample().with_template(vec!["ID".into(), "LABEL".into()]);
        let e = t.empty_like();
        assert!(e.is_empty());
        assert_eq!(e.columns(), t.columns());
        assert_eq!(e.template().unwrap(), &["ID", "LABEL", ""]);
    }
}
