// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::{fmt, fs, path::PathBuf, time::Duration};
use tracing::{debug, info, instrument};
use url::Url;

use crate::table::{parse_tsv, ReadOptions, Table};

/// Where the term table comes from: a published sheet or a local TSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

impl Source {
    /// `http(s)://` strings are remote; anything else is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Remote(url),
            _ => Source::Local(PathBuf::from(raw)),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .with_context(|| format!("Reading text from {}", url))
}

/// Read the raw TSV text. Remote sources are fetched once, no retries.
pub fn fetch_text(source: &Source, timeout: Option<Duration>) -> Result<String> {
    match source {
        Source::Remote(url) => {
            let mut builder = Client::builder();
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
            let client = builder.build().context("building HTTP client")?;
            get_text(&client, url)
        }
        Source::Local(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {:?}", path))
        }
    }
}

/// Fetch and parse the term table.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub fn load_table(source: &Source, opts: ReadOptions, timeout: Option<Duration>) -> Result<Table> {
    let text = fetch_text(source, timeout)?;
    let table = parse_tsv(&text, opts).with_context(|| format!("parsing table from {}", source))?;
    info!(bytes = text.len(), rows = table.len(), "loaded term table");
    Ok(table)
}
