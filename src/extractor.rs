//! Risk-section extractor
//!
//! Isolates the "Item 1A. Risk Factors" disclosure from a filing's raw
//! markup. Filings vary wildly in internal structure across filers and
//! years, so the extractor treats the rendered text as a flat line
//! sequence and scans for the literal section markers instead of
//! navigating the document tree. The cost is false positives when the
//! markers appear as incidental text (a table of contents, say); those
//! are deliberately not disambiguated.

use crate::error::AnalyzerError;
use crate::models::{ExtractedDocument, Filing};
use crate::Result;
use scraper::Html;
use std::fs;
use tracing::{debug, warn};

/// Marks the start of the risk-factors section.
pub const START_MARKER: &str = "Item 1A.";
/// Marks the start of the following section ("Unresolved Staff Comments").
pub const END_MARKER: &str = "Item 1B.";

/// Extracts the risk-factors section from filings.
pub struct RiskSectionExtractor;

impl RiskSectionExtractor {
    /// Reads and parses one filing, returning its risk-factors text.
    ///
    /// The returned content starts at the first line containing
    /// `"Item 1A."` and ends at (and includes) the first subsequent line
    /// containing `"Item 1B."`. No start marker means empty content; no
    /// end marker means the section runs to end of document. Read and
    /// decode failures carry the filing path.
    pub fn extract(&self, filing: &Filing) -> Result<ExtractedDocument> {
        let raw = fs::read_to_string(&filing.path)
            .map_err(|e| AnalyzerError::processing(&filing.path, e))?;

        let text = render_plain_text(&raw);
        let content = scan_risk_section(&text);

        if content.is_empty() {
            warn!(path = %filing.path.display(), "no risk-factors section found");
        } else {
            debug!(
                path = %filing.path.display(),
                chars = content.len(),
                "extracted risk-factors section"
            );
        }

        Ok(ExtractedDocument::new(content, filing.path.clone()))
    }
}

/// Renders the filing markup to plain text. html5ever tolerates malformed
/// and SGML-flavored input, so parsing itself cannot fail; text nodes keep
/// the source's own line breaks.
fn render_plain_text(raw: &str) -> String {
    let document = Html::parse_document(raw);
    let mut text = String::with_capacity(raw.len() / 2);
    for node in document.root_element().text() {
        text.push_str(node);
    }
    text
}

/// Line scan over the rendered text: accumulate from the first start
/// marker through the first subsequent end marker, both inclusive.
fn scan_risk_section(text: &str) -> String {
    let mut section = String::new();
    let mut in_section = false;
    for line in text.lines() {
        if line.contains(START_MARKER) {
            in_section = true;
        }
        if in_section {
            section.push_str(line);
            section.push('\n');
            if line.contains(END_MARKER) {
                break;
            }
        }
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FORM_TYPE_10K;
    use std::path::PathBuf;

    fn filing_at(path: PathBuf) -> Filing {
        Filing {
            ticker: "AAPL".to_string(),
            form_type: FORM_TYPE_10K.to_string(),
            accession: "0000000000-00-000000".to_string(),
            path,
        }
    }

    #[test]
    fn test_scan_returns_closed_interval_between_markers() {
        let text = "Preamble\nItem 1A. Risk Factors\nWe face risks.\nItem 1B. Unresolved Staff Comments\nAfterward\n";
        let section = scan_risk_section(text);
        assert_eq!(
            section,
            "Item 1A. Risk Factors\nWe face risks.\nItem 1B. Unresolved Staff Comments\n"
        );
    }

    #[test]
    fn test_scan_without_start_marker_is_empty() {
        let section = scan_risk_section("Item 2. Properties\nSome text\n");
        assert_eq!(section, "");
    }

    #[test]
    fn test_scan_without_end_marker_runs_to_end() {
        let text = "Intro\nItem 1A. Risk Factors\nRisk one.\nRisk two.";
        let section = scan_risk_section(text);
        assert_eq!(section, "Item 1A. Risk Factors\nRisk one.\nRisk two.\n");
    }

    #[test]
    fn test_scan_stops_at_first_end_marker() {
        let text = "Item 1A. Risk Factors\nBody\nItem 1B. First\nItem 1B. Second\n";
        let section = scan_risk_section(text);
        assert_eq!(section, "Item 1A. Risk Factors\nBody\nItem 1B. First\n");
    }

    #[test]
    fn test_markup_is_stripped_before_scanning() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("full-submission.txt");
        std::fs::write(
            &path,
            "<html><body><p>Item 1A. Risk Factors</p>\n<p>We face <b>serious</b> risks.</p>\n<p>Item 1B. Unresolved Staff Comments</p></body></html>",
        )
        .unwrap();

        let doc = RiskSectionExtractor.extract(&filing_at(path)).unwrap();
        assert!(doc.content.starts_with("Item 1A. Risk Factors"));
        assert!(doc.content.contains("We face serious risks."));
        assert!(doc.content.trim_end().ends_with("Item 1B. Unresolved Staff Comments"));
    }

    #[test]
    fn test_unreadable_file_is_a_processing_error() {
        let missing = PathBuf::from("/nonexistent/full-submission.txt");
        let result = RiskSectionExtractor.extract(&filing_at(missing.clone()));
        match result {
            Err(AnalyzerError::Processing { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Processing error, got {:?}", other.map(|d| d.content)),
        }
    }
}
