//! Core data models for the filing risk analyzer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

//
// ================= Filing =================
//

/// Form type handled by this pipeline. Fixed to annual reports.
pub const FORM_TYPE_10K: &str = "10-K";

/// A single downloaded SEC submission, identified by its path on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filing {
    pub ticker: String,
    pub form_type: String,
    /// Accession identifier, taken from the submission's subdirectory name.
    pub accession: String,
    pub path: PathBuf,
}

//
// ================= Extraction =================
//

/// Plain-text risk-factors section lifted out of one filing.
///
/// `content` is empty when the filing contains no "Item 1A." marker. The
/// section is truncated at the first "Item 1B." occurrence; earlier
/// incidental mentions of either marker (e.g. a table of contents) are not
/// distinguished from the true section headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub content: String,
    pub source: PathBuf,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractedDocument {
    pub fn new(content: String, source: PathBuf) -> Self {
        Self {
            content,
            source,
            extracted_at: Utc::now(),
        }
    }
}

//
// ================= Chunking =================
//

/// A bounded-length span of an extracted document, the unit of embedding
/// and retrieval. Consecutive chunks of one document overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: Uuid,
    /// Ordinal of this chunk within its source document.
    pub seq: usize,
    pub content: String,
    pub source: PathBuf,
}

//
// ================= Vector Index =================
//

/// An embedded chunk as held by the ephemeral vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A chunk returned from similarity search, with its cosine score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub chunk: Chunk,
    pub score: f32,
}

//
// ================= Tool I/O =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub data: serde_json::Value,
    pub error: Option<String>,
}

//
// ================= Agent Result =================
//

/// Final product of the reasoning agent: one natural-language answer plus
/// the verbose thought/action/observation trace accumulated on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub answer: String,
    pub reasoning_trace: Vec<String>,
}

impl fmt::Display for Filing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.ticker,
            self.form_type,
            self.path.display()
        )
    }
}
