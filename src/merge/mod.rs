// src/merge/mod.rs

pub mod issue;
pub mod splice;

pub use issue::{IssueRef, DEFAULT_ISSUE_BASE_URL};

use tracing::{debug, warn};

use crate::error::MergeError;
use crate::table::{Row, Table};

/// Column names the merge reads or writes.
pub mod columns {
    pub const VBO_ID: &str = "vbo_id";
    pub const TERM_LABEL: &str = "term_label";
    pub const CONTRIBUTOR: &str = "contributor";
    pub const OBSOLETION_TYPE: &str = "obsoletion_type";
    pub const OBSOLETE: &str = "obsolete";
    pub const CONTRIBUTORS: &str = "contributors";
    pub const REPLACEMENT_TERM: &str = "replacement_term";
    pub const REPLACEMENT_LABEL: &str = "replacement_label";
    pub const OBSOLESCENCE_REASON: &str = "obsolescence_reason";
    pub const GH_ISSUE: &str = "GH_issue";
    pub const SYNONYM_LABEL: &str = "synonym_label_from_merged_term";
    pub const SYNONYM_SOURCE: &str = "source_for_merged_term";
    pub const SYNONYM_TYPE: &str = "synonym_type_most_common_name";
}

const OBSOLETE_PREFIX: &str = "obsolete ";
const OBSOLETION_TYPE: &str = "owl:Class";
const OBSOLESCENCE_REASON: &str = "terms merged";

/// The three rows a merge produces, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRows {
    /// The obsolete term, stripped down and pointed at its replacement.
    pub obsoletion: Row,
    /// The obsolete label recorded as a synonym on the replacement term.
    pub synonym: Row,
    /// The replacement term's row, untouched.
    pub replacement: Row,
}

/// Builds obsoletion/synonym rows for merging one VBO term into another.
#[derive(Debug, Clone)]
pub struct Merger {
    issue_base_url: String,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUE_BASE_URL)
    }
}

impl Merger {
    pub fn new(issue_base_url: impl Into<String>) -> Self {
        Self {
            issue_base_url: issue_base_url.into(),
        }
    }

    /// Merge `obsolete_id` into `replacement_id`.
    ///
    /// Returns a table with the input's header holding exactly the obsoletion
    /// row, the synonym row and the replacement row, in that order. The rest
    /// of `table` is not included.
    pub fn merge(
        &self,
        table: &Table,
        obsolete_id: &str,
        replacement_id: &str,
        issue: IssueRef,
    ) -> Result<Table, MergeError> {
        let rows = self.merge_rows(table, obsolete_id, replacement_id, issue)?;
        let mut out = table.empty_like();
        out.push(rows.obsoletion);
        out.push(rows.synonym);
        out.push(rows.replacement);
        Ok(out)
    }

    pub fn merge_rows(
        &self,
        table: &Table,
        obsolete_id: &str,
        replacement_id: &str,
        issue: IssueRef,
    ) -> Result<MergeRows, MergeError> {
        let idx = Columns::resolve(table)?;
        let obsolete = &table.rows()[locate(table, obsolete_id)?];
        let replacement = &table.rows()[locate(table, replacement_id)?];

        let obsolete_label = obsolete.get(idx.term_label).to_string();
        let replacement_label = replacement.get(idx.term_label).to_string();
        let issue_url = issue.url(&self.issue_base_url);
        debug!(%obsolete_label, %replacement_label, %issue_url, "deriving merge rows");

        let mut obsoletion = obsolete.clone();
        obsoletion.blank_except(&[idx.term_label, idx.vbo_id, idx.contributor]);
        obsoletion.set(idx.term_label, format!("{OBSOLETE_PREFIX}{obsolete_label}"));
        obsoletion.set(idx.obsoletion_type, OBSOLETION_TYPE);
        obsoletion.set(idx.obsolete, "true");
        obsoletion.set(idx.contributors, "");
        obsoletion.set(idx.replacement_term, replacement_id);
        obsoletion.set(idx.replacement_label, replacement_label);
        obsoletion.set(idx.obsolescence_reason, OBSOLESCENCE_REASON);
        obsoletion.set(idx.gh_issue, issue_url.as_str());

        let mut synonym = obsolete.clone();
        synonym.set(idx.vbo_id, replacement_id);
        synonym.set(idx.term_label, "");
        synonym.set(idx.synonym_label, obsolete_label);
        synonym.set(idx.synonym_source, obsolete_id);
        synonym.set(idx.synonym_type, "");
        synonym.set(idx.gh_issue, issue_url);

        Ok(MergeRows {
            obsoletion,
            synonym,
            replacement: replacement.clone(),
        })
    }
}

/// Merge with the default VBO issue tracker.
pub fn merge(
    table: &Table,
    obsolete_id: &str,
    replacement_id: &str,
    issue: IssueRef,
) -> Result<Table, MergeError> {
    Merger::default().merge(table, obsolete_id, replacement_id, issue)
}

/// Index of the first row carrying `id`. Later duplicates are ignored.
pub(crate) fn locate(table: &Table, id: &str) -> Result<usize, MergeError> {
    let col = table.column_index(columns::VBO_ID)?;
    let hits = table.positions(col, id);
    match hits.as_slice() {
        [] => Err(MergeError::TermNotFound { id: id.to_string() }),
        [first] => Ok(*first),
        [first, ..] => {
            warn!(vbo_id = id, matches = hits.len(), "duplicate vbo_id, using first row");
            Ok(*first)
        }
    }
}

/// Header positions of every column the merge touches.
struct Columns {
    vbo_id: usize,
    term_label: usize,
    contributor: usize,
    obsoletion_type: usize,
    obsolete: usize,
    contributors: usize,
    replacement_term: usize,
    replacement_label: usize,
    obsolescence_reason: usize,
    gh_issue: usize,
    synonym_label: usize,
    synonym_source: usize,
    synonym_type: usize,
}

impl Columns {
    fn resolve(table: &Table) -> Result<Self, MergeError> {
        Ok(Self {
            vbo_id: table.column_index(columns::VBO_ID)?,
            term_label: table.column_index(columns::TERM_LABEL)?,
            contributor: table.column_index(columns::CONTRIBUTOR)?,
            obsoletion_type: table.column_index(columns::OBSOLETION_TYPE)?,
            obsolete: table.column_index(columns::OBSOLETE)?,
            contributors: table.column_index(columns::CONTRIBUTORS)?,
            replacement_term: table.column_index(columns::REPLACEMENT_TERM)?,
            replacement_label: table.column_index(columns::REPLACEMENT_LABEL)?,
            obsolescence_reason: table.column_index(columns::OBSOLESCENCE_REASON)?,
            gh_issue: table.column_index(columns::GH_ISSUE)?,
            synonym_label: table.column_index(columns::SYNONYM_LABEL)?,
            synonym_source: table.column_index(columns::SYNONYM_SOURCE)?,
            synonym_type: table.column_index(columns::SYNONYM_TYPE)?,
        })
    }
}
