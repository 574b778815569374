//! Filing locator
//!
//! Walks the local download directory laid out by the EDGAR downloader:
//! `<root>/<TICKER>/10-K/<accession>/full-submission.txt`

use crate::models::{Filing, FORM_TYPE_10K};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Filename every submission is stored under.
pub const SUBMISSION_FILENAME: &str = "full-submission.txt";

/// Locates downloaded filings for one ticker under a fixed root directory.
pub struct FilingLocator {
    root: PathBuf,
    ticker: String,
}

impl FilingLocator {
    pub fn new(root: impl Into<PathBuf>, ticker: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ticker: ticker.into(),
        }
    }

    /// Returns every `full-submission.txt` found directly under an
    /// accession subdirectory of `<root>/<ticker>/10-K/`.
    ///
    /// A missing root, ticker, or form directory yields an empty set; the
    /// walk never raises for absent paths. Results are sorted by accession
    /// so runs are deterministic.
    pub fn locate(&self) -> Result<Vec<Filing>> {
        let form_dir = self.root.join(&self.ticker).join(FORM_TYPE_10K);
        if !form_dir.is_dir() {
            debug!(path = %form_dir.display(), "download directory does not exist");
            return Ok(Vec::new());
        }

        let mut filings = Vec::new();
        for entry in fs::read_dir(&form_dir)? {
            let entry = entry?;
            let accession_dir = entry.path();
            if !accession_dir.is_dir() {
                continue;
            }
            let submission = accession_dir.join(SUBMISSION_FILENAME);
            if submission.is_file() {
                filings.push(Filing {
                    ticker: self.ticker.clone(),
                    form_type: FORM_TYPE_10K.to_string(),
                    accession: accession_name(&accession_dir),
                    path: submission,
                });
            }
        }

        filings.sort_by(|a, b| a.accession.cmp(&b.accession));
        info!(
            ticker = %self.ticker,
            count = filings.len(),
            "located filings"
        );
        Ok(filings)
    }
}

fn accession_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_submission(form_dir: &Path, accession: &str, body: &str) {
        let dir = form_dir.join(accession);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SUBMISSION_FILENAME), body).unwrap();
    }

    #[test]
    fn test_missing_root_yields_empty_set() {
        let locator = FilingLocator::new("/nonexistent/sec-edgar-filings", "AAPL");
        let filings = locator.locate().unwrap();
        assert!(filings.is_empty());
    }

    #[test]
    fn test_locates_submissions_sorted_by_accession() {
        let tmp = tempfile::tempdir().unwrap();
        let form_dir = tmp.path().join("AAPL").join(FORM_TYPE_10K);
        write_submission(&form_dir, "0000320193-22-000108", "<html></html>");
        write_submission(&form_dir, "0000320193-20-000096", "<html></html>");

        let locator = FilingLocator::new(tmp.path(), "AAPL");
        let filings = locator.locate().unwrap();

        assert_eq!(filings.len(), 2);
        assert_eq!(filings[0].accession, "0000320193-20-000096");
        assert_eq!(filings[1].accession, "0000320193-22-000108");
        assert!(filings.iter().all(|f| f.form_type == FORM_TYPE_10K));
    }

    #[test]
    fn test_ignores_other_filenames_and_loose_files() {
        let tmp = tempfile::tempdir().unwrap();
        let form_dir = tmp.path().join("AAPL").join(FORM_TYPE_10K);
        fs::create_dir_all(form_dir.join("0000320193-21-000105")).unwrap();
        fs::write(
            form_dir.join("0000320193-21-000105").join("index.json"),
            "{}",
        )
        .unwrap();
        // A file sitting directly under the form directory is not a filing.
        fs::write(form_dir.join(SUBMISSION_FILENAME), "stray").unwrap();

        let locator = FilingLocator::new(tmp.path(), "AAPL");
        assert!(locator.locate().unwrap().is_empty());
    }
}
