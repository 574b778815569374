//! Ephemeral vector store
//!
//! Holds embedded chunks in memory for the lifetime of one analysis run
//! and mirrors them into a JSONL snapshot under a scoped temp directory.
//! The directory is owned by the store and removed when the store drops,
//! so the index storage outlives the retrieval/agent stage and nothing
//! survives the process.

use crate::embedding::{EmbeddingClient, MAX_EMBED_BATCH};
use crate::error::AnalyzerError;
use crate::models::{Chunk, RetrievedChunk, VectorRecord};
use crate::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

/// Snapshot filename inside the store's temp directory.
const SNAPSHOT_FILENAME: &str = "records.jsonl";

/// Process-local vector index over embedded chunks.
pub struct VectorStore {
    records: Vec<VectorRecord>,
    embedder: EmbeddingClient,
    storage: TempDir,
}

impl VectorStore {
    /// Embeds the chunks (in sequential batches) and builds the index.
    pub async fn build(chunks: Vec<Chunk>, embedder: EmbeddingClient) -> Result<Self> {
        if chunks.is_empty() {
            return Err(AnalyzerError::VectorStore(
                "cannot build a vector store from zero chunks".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(MAX_EMBED_BATCH) {
            let texts: Vec<&str> = batch.iter().map(|c| c.content.as_str()).collect();
            let vectors = embedder.embed_batch(&texts).await.map_err(|e| {
                AnalyzerError::VectorStore(format!("failed to embed chunk batch: {}", e))
            })?;
            for (chunk, embedding) in batch.iter().cloned().zip(vectors) {
                records.push(VectorRecord { chunk, embedding });
            }
        }

        Self::from_records(records, embedder)
    }

    /// Builds the index from pre-embedded records and persists the
    /// snapshot into a fresh temp directory.
    pub fn from_records(records: Vec<VectorRecord>, embedder: EmbeddingClient) -> Result<Self> {
        let storage = TempDir::new().map_err(|e| {
            AnalyzerError::VectorStore(format!("failed to create store directory: {}", e))
        })?;
        write_snapshot(storage.path(), &records)?;

        info!(
            records = records.len(),
            path = %storage.path().display(),
            "vector store ready"
        );
        Ok(Self {
            records,
            embedder,
            storage,
        })
    }

    /// Directory the snapshot lives in; gone after the store drops.
    pub fn storage_path(&self) -> &Path {
        self.storage.path()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embeds the query and returns the `top_k` most similar chunks.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let query_embedding = self.embedder.embed_query(query).await?;
        Ok(self.retrieve_by_embedding(&query_embedding, top_k))
    }

    /// Ranks stored records against a pre-computed query embedding.
    pub fn retrieve_by_embedding(&self, query: &[f32], top_k: usize) -> Vec<RetrievedChunk> {
        let mut scored: Vec<RetrievedChunk> = self
            .records
            .iter()
            .map(|record| RetrievedChunk {
                chunk: record.chunk.clone(),
                score: cosine_similarity(query, &record.embedding),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        debug!(top_k, returned = scored.len(), "retrieval complete");
        scored
    }
}

fn write_snapshot(dir: &Path, records: &[VectorRecord]) -> Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    fs::write(dir.join(SNAPSHOT_FILENAME), out)
        .map_err(|e| AnalyzerError::VectorStore(format!("failed to persist snapshot: {}", e)))
}

/// Cosine similarity between two vectors; zero-magnitude inputs score 0.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
