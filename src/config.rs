// src/config.rs

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::fetch::Source;
use crate::merge::{IssueRef, DEFAULT_ISSUE_BASE_URL};

/// Command line for a single VBO term merge.
#[derive(Debug, Default, Parser)]
#[command(
    name = "vbo-merge",
    version,
    about = "Obsolete a VBO term and merge it into another"
)]
pub struct Cli {
    /// YAML or JSON file with any of the settings below
    #[arg(long, env = "VBO_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Published TSV URL or local path of the term table
    #[arg(long, env = "VBO_MERGE_SOURCE")]
    pub source: Option<String>,

    /// vbo_id of the term to obsolete
    #[arg(long = "obsolete", env = "VBO_MERGE_OBSOLETE")]
    pub obsolete_id: Option<String>,

    /// vbo_id of the term to merge into
    #[arg(long = "merge-into", env = "VBO_MERGE_INTO")]
    pub replacement_id: Option<String>,

    /// GitHub issue: 123, #123 or the issue URL
    #[arg(long, env = "VBO_MERGE_ISSUE")]
    pub issue: Option<String>,

    /// Where to write the merged TSV
    #[arg(long, short, env = "VBO_MERGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Repository URL that issue numbers are resolved against
    #[arg(long)]
    pub issue_base_url: Option<String>,

    /// Input has a ROBOT template row under the header
    #[arg(long)]
    pub template_row: bool,

    /// Write the full table with the merge applied instead of only the merge rows
    #[arg(long)]
    pub splice: bool,

    /// HTTP timeout in seconds for fetching the source
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log: String,
}

/// Issue numbers may be written bare in YAML/JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IssueValue {
    Number(u64),
    Text(String),
}

impl IssueValue {
    fn into_string(self) -> String {
        match self {
            IssueValue::Number(n) => n.to_string(),
            IssueValue::Text(s) => s,
        }
    }
}

/// Settings as read from a config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub source: Option<String>,
    pub obsolete_id: Option<String>,
    pub replacement_id: Option<String>,
    pub issue: Option<IssueValue>,
    pub output: Option<PathBuf>,
    pub issue_base_url: Option<String>,
    pub template_row: Option<bool>,
    pub splice: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load from `.yaml`/`.yml` or `.json`, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&text).with_context(|| format!("parsing {:?}", path))
            }
            "json" => serde_json::from_str(&text).with_context(|| format!("parsing {:?}", path)),
            other => bail!("unsupported config extension: .{other}"),
        }
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: Source,
    pub obsolete_id: String,
    pub replacement_id: String,
    pub issue: IssueRef,
    pub output: PathBuf,
    pub issue_base_url: String,
    pub template_row: bool,
    pub splice: bool,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Read the config file named on the command line (if any) and layer
    /// the command line over it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Command-line values win over file values.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let source = required("source", cli.source.clone().or(file.source))?;
        let obsolete_id = required("obsolete_id", cli.obsolete_id.clone().or(file.obsolete_id))?;
        let replacement_id = required(
            "replacement_id",
            cli.replacement_id.clone().or(file.replacement_id),
        )?;
        let issue_raw = required(
            "issue",
            cli.issue
                .clone()
                .or_else(|| file.issue.map(IssueValue::into_string)),
        )?;
        let output = required("output", cli.output.clone().or(file.output))?;

        let issue: IssueRef = issue_raw.parse()?;

        Ok(Self {
            source: Source::parse(&source),
            obsolete_id,
            replacement_id,
            issue,
            output,
            issue_base_url: cli
                .issue_base_url
                .clone()
                .or(file.issue_base_url)
                .unwrap_or_else(|| DEFAULT_ISSUE_BASE_URL.to_string()),
            template_row: cli.template_row || file.template_row.unwrap_or(false),
            splice: cli.splice || file.splice.unwrap_or(false),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs),
        })
    }
}

fn required<T>(name: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        anyhow!("missing required setting `{name}` (pass it on the command line or in --config)")
    })
}
