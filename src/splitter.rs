//! Recursive boundary-aware text splitter
//!
//! Splits extracted documents into overlapping chunks for embedding.
//! Boundaries are tried coarsest-first: paragraph breaks, then line
//! breaks, then spaces, then hard character cuts. Pieces that still
//! exceed the target size after a split are re-split with the remaining,
//! finer separators; small neighboring pieces are merged back together up
//! to the target size, carrying a tail of the previous chunk into the
//! next one as overlap.

use crate::models::{Chunk, ExtractedDocument};
use tracing::warn;
use uuid::Uuid;

/// Separator ladder, coarsest first. The empty string means "split into
/// individual characters" and always succeeds.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Character-budget splitter with overlap between consecutive chunks.
#[derive(Debug, Clone)]
pub struct RecursiveTextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveTextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(
            chunk_overlap < chunk_size,
            "chunk overlap must be smaller than chunk size"
        );
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Splits every document and flattens the result into one ordered
    /// chunk sequence. Source metadata rides along on each chunk; `seq`
    /// restarts per document.
    pub fn split_documents(&self, documents: &[ExtractedDocument]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for document in documents {
            for (seq, content) in self.split_text(&document.content).into_iter().enumerate() {
                chunks.push(Chunk {
                    chunk_id: Uuid::new_v4(),
                    seq,
                    content,
                    source: document.source.clone(),
                });
            }
        }
        chunks
    }

    /// Splits one text into bounded, overlapping pieces.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.split_recursive(text, &SEPARATORS)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // Pick the first separator actually present in the text; the empty
        // string is the unconditional fallback.
        let mut separator = *separators.last().unwrap_or(&"");
        let mut remaining: &[&str] = &[];
        for (i, &sep) in separators.iter().enumerate() {
            if sep.is_empty() || text.contains(sep) {
                separator = sep;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let splits = split_on(text, separator);

        // Merge runs of small pieces; recurse into oversized ones.
        let mut good_splits: Vec<&str> = Vec::new();
        for piece in splits {
            if piece.chars().count() < self.chunk_size {
                good_splits.push(piece);
            } else {
                if !good_splits.is_empty() {
                    final_chunks.extend(self.merge_splits(&good_splits, separator));
                    good_splits.clear();
                }
                if remaining.is_empty() {
                    final_chunks.push(piece.to_string());
                } else {
                    final_chunks.extend(self.split_recursive(piece, remaining));
                }
            }
        }
        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits, separator));
        }

        final_chunks
    }

    /// Greedily packs adjacent pieces into chunks of at most `chunk_size`
    /// characters, retaining up to `chunk_overlap` trailing characters of
    /// each emitted chunk as the head of the next.
    fn merge_splits(&self, splits: &[&str], separator: &str) -> Vec<String> {
        let sep_len = separator.chars().count();
        let mut docs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut total = 0usize;

        for &piece in splits {
            let len = piece.chars().count();
            let joiner = if current.is_empty() { 0 } else { sep_len };
            if total + len + joiner > self.chunk_size {
                if total > self.chunk_size {
                    warn!(
                        size = total,
                        limit = self.chunk_size,
                        "created a chunk larger than the target size"
                    );
                }
                if !current.is_empty() {
                    if let Some(doc) = join_trimmed(&current, separator) {
                        docs.push(doc);
                    }
                    // Pop from the front until the carried tail fits the
                    // overlap budget and leaves room for the next piece.
                    while total > self.chunk_overlap
                        || (total + len + if current.is_empty() { 0 } else { sep_len }
                            > self.chunk_size
                            && total > 0)
                    {
                        let dropped = current.remove(0);
                        total -= dropped.chars().count()
                            + if current.is_empty() { 0 } else { sep_len };
                    }
                }
            }
            let joiner = if current.is_empty() { 0 } else { sep_len };
            current.push(piece);
            total += len + joiner;
        }

        if let Some(doc) = join_trimmed(&current, separator) {
            docs.push(doc);
        }
        docs
    }
}

fn split_on<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }
    text.split(separator).filter(|s| !s.is_empty()).collect()
}

fn join_trimmed(pieces: &[&str], separator: &str) -> Option<String> {
    let joined = pieces.join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractedDocument;
    use std::path::PathBuf;

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let splitter = RecursiveTextSplitter::new(1000, 200);
        let chunks = splitter.split_text("Item 1A. Risk Factors\nWe face risks.");
        assert_eq!(chunks, vec!["Item 1A. Risk Factors\nWe face risks.".to_string()]);
    }

    #[test]
    fn test_splitting_a_minimal_chunk_is_idempotent() {
        let splitter = RecursiveTextSplitter::new(100, 20);
        let text = "Paragraph one.\n\nParagraph two.\n\nParagraph three.";
        let first_pass = splitter.split_text(text);
        for chunk in &first_pass {
            let second_pass = splitter.split_text(chunk);
            assert_eq!(second_pass, vec![chunk.clone()]);
        }
    }

    #[test]
    fn test_chunks_respect_size_and_cover_all_paragraphs() {
        let paragraphs: Vec<String> = (0..12)
            .map(|i| format!("Paragraph {} describes a distinct operational risk.", i))
            .collect();
        let text = paragraphs.join("\n\n");

        let splitter = RecursiveTextSplitter::new(120, 30);
        let chunks = splitter.split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 120, "oversized chunk: {chunk:?}");
            // Joining with the separator that produced the split keeps each
            // chunk a literal substring of the source.
            assert!(text.contains(chunk.as_str()));
        }
        for paragraph in &paragraphs {
            assert!(
                chunks.iter().any(|c| c.contains(paragraph.as_str())),
                "paragraph lost during splitting: {paragraph}"
            );
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let words: Vec<String> = (0..60).map(|i| format!("risk{i:02}")).collect();
        let text = words.join(" ");

        let splitter = RecursiveTextSplitter::new(50, 15);
        let chunks = splitter.split_text(&text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let first_word = pair[1].split(' ').next().unwrap();
            assert!(
                pair[0].ends_with(first_word) || pair[0].contains(first_word),
                "expected {:?} to overlap with {:?}",
                pair[1],
                pair[0]
            );
        }
    }

    #[test]
    fn test_unbroken_text_falls_back_to_hard_cuts() {
        let text = "x".repeat(2500);
        let splitter = RecursiveTextSplitter::new(1000, 200);
        let chunks = splitter.split_text(&text);
        assert!(chunks.len() >= 3);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000);
        }
    }

    #[test]
    fn test_split_documents_preserves_source_and_orders_seq() {
        let splitter = RecursiveTextSplitter::new(80, 10);
        let doc_a = ExtractedDocument::new(
            "First paragraph about risk.\n\nSecond paragraph about more risk.\n\nThird paragraph."
                .to_string(),
            PathBuf::from("/filings/a/full-submission.txt"),
        );
        let doc_b = ExtractedDocument::new(
            "Short section.".to_string(),
            PathBuf::from("/filings/b/full-submission.txt"),
        );

        let chunks = splitter.split_documents(&[doc_a.clone(), doc_b.clone()]);

        let a_chunks: Vec<_> = chunks.iter().filter(|c| c.source == doc_a.source).collect();
        let b_chunks: Vec<_> = chunks.iter().filter(|c| c.source == doc_b.source).collect();
        assert!(!a_chunks.is_empty());
        assert_eq!(b_chunks.len(), 1);
        for (i, chunk) in a_chunks.iter().enumerate() {
            assert_eq!(chunk.seq, i);
        }
        assert_eq!(b_chunks[0].seq, 0);
    }

    #[test]
    fn test_empty_document_yields_no_chunks() {
        let splitter = RecursiveTextSplitter::new(1000, 200);
        assert!(splitter.split_text("").is_empty());
        assert!(splitter.split_text("   \n  ").is_empty());
    }
}
