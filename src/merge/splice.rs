// src/merge/splice.rs

use tracing::info;

use super::{locate, IssueRef, Merger};
use crate::error::MergeError;
use crate::table::Table;

impl Merger {
    /// Merge and write the result back into the full table.
    ///
    /// The obsolete term's first row becomes the obsoletion row, the
    /// replacement term's first row is kept, and the synonym row is inserted
    /// right after it. Every other row passes through in its original order.
    pub fn splice(
        &self,
        table: &Table,
        obsolete_id: &str,
        replacement_id: &str,
        issue: IssueRef,
    ) -> Result<Table, MergeError> {
        let rows = self.merge_rows(table, obsolete_id, replacement_id, issue)?;
        let obsolete_at = locate(table, obsolete_id)?;
        let replacement_at = locate(table, replacement_id)?;

        let mut out = table.empty_like();
        for (idx, row) in table.rows().iter().enumerate() {
            if idx == obsolete_at {
                out.push(rows.obsoletion.clone());
            }
            if idx == replacement_at {
                out.push(rows.replacement.clone());
                out.push(rows.synonym.clone());
            }
            if idx != obsolete_at && idx != replacement_at {
                out.push(row.clone());
            }
        }

        info!(
            before = table.len(),
            after = out.len(),
            "spliced merge rows into table"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::tests::sample_table;

    #[test]
    fn test_splice_layout() {
        let table = sample_table();
        let merger = Merger::default();
        let merged = merger
            .merge(&table, "VBO:0000001", "VBO:0000002", IssueRef(7))
            .unwrap();
        let out = merger
            .splice(&table, "VBO:0000001", "VBO:0000002", IssueRef(7))
            .unwrap();

        assert_eq!(out.len(), table.len() + 1);
        assert_eq!(out.rows()[0], merged.rows()[0]);
        assert_eq!(out.rows()[1], merged.rows()[2]);
        assert_eq!(out.rows()[2], merged.rows()[1]);
        assert_eq!(out.rows()[3], table.rows()[2]);
    }

    #[test]
    fn test_splice_replacement_before_obsolete() {
        let table = sample_table();
        let out = Merger::default()
            .splice(&table, "VBO:0000003", "VBO:0000001", IssueRef(7))
            .unwrap();

        let ids: Vec<&str> = (0..out.len())
            .map(|i| out.value(i, "vbo_id").unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["VBO:0000001", "VBO:0000001", "VBO:0000002", "VBO:0000003"]
        );
        assert_eq!(out.value(3, "term_label").unwrap(), "obsolete Baz");
        assert_eq!(out.value(1, "synonym_label_from_merged_term").unwrap(), "Baz");
    }

    #[test]
    fn test_splice_missing_term() {
        let err = Merger::default()
            .splice(&sample_table(), "VBO:0000001", "VBO:0000042", IssueRef(7))
            .unwrap_err();
        assert_eq!(
            err,
            MergeError::TermNotFound {
                id: "VBO:0000042".into()
            }
        );
    }
}
