//! Line-delimited JSON output.
//!
//! One JSON object per line, field names matching [`crate::paper::Paper`].
//! Optional fields serialize as explicit `null`, never omitted.

use crate::error::{DownloadError, Result};
use crate::paper::Paper;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Output filename for one proceeding, e.g. `iclr.2024.Conference.jsonl`.
pub fn proceeding_filename(year: i32, venue: &str) -> String {
    format!("iclr.{}.{}.jsonl", year, venue)
}

/// Fail fast when the output directory does not exist.
///
/// Called before any network activity, so a bad `--output-dir` never
/// leaves partial output behind.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(DownloadError::Config(format!(
            "output directory {} does not exist",
            dir.display()
        )))
    }
}

/// Write records to `path` as JSONL.
pub fn save_jsonl(path: &Path, papers: &[Paper]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for paper in papers {
        serde_json::to_writer(&mut writer, paper)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    info!(path = %path.display(), records = papers.len(), "Saved proceeding");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_paper(id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            title: "A Paper".to_string(),
            authors: vec!["Jane Doe".to_string()],
            author_ids: vec!["~Jane_Doe1".to_string()],
            keywords: vec!["theory".to_string()],
            tldr: None,
            abstract_text: "Words.".to_string(),
            primary_area: None,
            venue: "ICLR 2021 Poster".to_string(),
            venue_id: "ICLR.cc/2021/Conference".to_string(),
            pdf_url: "https://openreview.net/pdf?id=x".to_string(),
            bibtex: "@inproceedings{doe2021}".to_string(),
            paperhash: id.to_string(),
            year: 2021,
        }
    }

    #[test]
    fn test_save_jsonl_one_line_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(proceeding_filename(2021, "Conference"));

        let papers = vec![sample_paper("a|one"), sample_paper("b|two")];
        save_jsonl(&path, &papers).expect("writes");

        let content = std::fs::read_to_string(&path).expect("readable");
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Paper = serde_json::from_str(lines[0]).expect("parses");
        assert_eq!(first, papers[0]);

        // Absent optionals are explicit nulls in the serialized text
        assert!(lines[0].contains("\"tldr\":null"));
        assert!(lines[0].contains("\"primary_area\":null"));
    }

    #[test]
    fn test_ensure_output_dir_accepts_existing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        ensure_output_dir(dir.path()).expect("exists");
    }

    #[test]
    fn test_ensure_output_dir_rejects_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");

        let err = ensure_output_dir(&missing).expect_err("must fail");
        assert!(matches!(err, DownloadError::Config(_)));
    }

    #[test]
    fn test_proceeding_filename() {
        assert_eq!(
            proceeding_filename(2024, "Conference"),
            "iclr.2024.Conference.jsonl"
        );
    }
}
