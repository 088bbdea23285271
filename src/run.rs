// src/run.rs

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Settings;
use crate::fetch::load_table;
use crate::merge::Merger;
use crate::table::{write_tsv_file, ReadOptions, Table};

/// Load, merge, write. Returns the table that was written.
pub fn run(settings: &Settings) -> Result<Table> {
    let opts = ReadOptions {
        template_row: settings.template_row,
    };
    let table = load_table(&settings.source, opts, settings.timeout)?;

    let merger = Merger::new(settings.issue_base_url.as_str());
    info!(
        obsolete = %settings.obsolete_id,
        merge_into = %settings.replacement_id,
        issue = %settings.issue,
        splice = settings.splice,
        "merging terms"
    );
    let merged = if settings.splice {
        merger.splice(
            &table,
            &settings.obsolete_id,
            &settings.replacement_id,
            settings.issue,
        )
    } else {
        merger.merge(
            &table,
            &settings.obsolete_id,
            &settings.replacement_id,
            settings.issue,
        )
    }
    .with_context(|| {
        format!(
            "merging {} into {}",
            settings.obsolete_id, settings.replacement_id
        )
    })?;

    write_tsv_file(&merged, &settings.output)
        .with_context(|| format!("writing {:?}", settings.output))?;
    info!(rows = merged.len(), output = %settings.output.display(), "wrote merged table");
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Source;
    use crate::merge::tests::HEADER;
    use crate::merge::IssueRef;
    use crate::table::{parse_tsv, ReadOptions};
    use std::{fs, path::Path, time::Duration};
    use tempfile::tempdir;

    const TEMPLATE: &str = "ID\tLABEL\tA contributor\t\tCLASS_TYPE\tAI owl:deprecated\t\tAI IAO:0100001\t\tAI IAO:0000231\tA oboInOwl:hasDbXref\tA oboInOwl:hasRelatedSynonym\t>A oboInOwl:source\t";

    fn write_source(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("vbo.tsv");
        let text = format!(
            "{HEADER}\n{TEMPLATE}\n\
             VBO:0000001\tFoo\torcid:1\tnote\n\
             VBO:0000002\tBar\torcid:2\n\
             VBO:0000003\tBaz\torcid:3\n"
        );
        fs::write(&path, text).unwrap();
        path
    }

    fn settings(source: &Path, output: &Path, splice: bool) -> Settings {
        Settings {
            source: Source::Local(source.to_path_buf()),
            obsolete_id: "VBO:0000001".into(),
            replacement_id: "VBO:0000002".into(),
            issue: IssueRef(123),
            output: output.to_path_buf(),
            issue_base_url: "https://github.com/monarch-initiative/vertebrate-breed-ontology"
                .into(),
            template_row: true,
            splice,
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_run_writes_three_rows() -> Result<()> {
        let tmp = tempdir()?;
        let source = write_source(tmp.path());
        let output = tmp.path().join("out").join("merged.tsv");

        let written = run(&settings(&source, &output, false))?;
        assert_eq!(written.len(), 3);

        let text = fs::read_to_string(&output)?;
        assert_eq!(text.lines().nth(1), Some(TEMPLATE));

        let back = parse_tsv(&text, ReadOptions { template_row: true })?;
        assert_eq!(back, written);
        assert_eq!(back.value(0, "term_label")?, "obsolete Foo");
        assert_eq!(
            back.value(0, "GH_issue")?,
            "https://github.com/monarch-initiative/vertebrate-breed-ontology/issues/123"
        );
        assert_eq!(back.value(1, "vbo_id")?, "VBO:0000002");
        assert_eq!(back.value(2, "term_label")?, "Bar");
        Ok(())
    }

    #[test]
    fn test_run_splice_in_place() -> Result<()> {
        let tmp = tempdir()?;
        let source = write_source(tmp.path());

        // output over the input file
        let written = run(&settings(&source, &source, true))?;
        assert_eq!(written.len(), 4);

        let back = parse_tsv(&fs::read_to_string(&source)?, ReadOptions { template_row: true })?;
        assert_eq!(back.value(0, "term_label")?, "obsolete Foo");
        assert_eq!(back.value(3, "vbo_id")?, "VBO:0000003");
        Ok(())
    }

    #[test]
    fn test_run_missing_term_is_fatal() -> Result<()> {
        let tmp = tempdir()?;
        let source = write_source(tmp.path());
        let output = tmp.path().join("merged.tsv");
        let mut s = settings(&source, &output, false);
        s.replacement_id = "VBO:0000099".into();

        let err = run(&s).unwrap_err();
        assert!(format!("{:#}", err).contains("VBO:0000099"));
        assert!(!output.exists());
        Ok(())
    }
}
