// src/merge/issue.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, str::FromStr};

use crate::error::MergeError;

/// Repository that VBO curation issues are filed against.
pub const DEFAULT_ISSUE_BASE_URL: &str =
    "https://github.com/monarch-initiative/vertebrate-breed-ontology";

static ISSUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:#?(\d+)|https?://\S+/issues/(\d+)/?)$").expect("issue regex should compile")
});

/// A GitHub issue number, as given by a curator.
///
/// Accepts `123`, `#123`, or a full `.../issues/123` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueRef(pub u64);

impl IssueRef {
    /// Link to this issue under `base`, e.g. `<base>/issues/123`.
    pub fn url(&self, base: &str) -> String {
        format!("{}/issues/{}", base.trim_end_matches('/'), self.0)
    }
}

impl FromStr for IssueRef {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MergeError::InvalidIssue { raw: s.to_string() };
        let caps = ISSUE_RE.captures(s.trim()).ok_or_else(invalid)?;
        let digits = caps.get(1).or_else(|| caps.get(2)).ok_or_else(invalid)?;
        digits.as_str().parse().map(IssueRef).map_err(|_| invalid())
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
