pub mod config;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod run;
pub mod table;

pub use error::MergeError;
pub use merge::{merge, IssueRef, Merger};
pub use table::{Row, Table};
