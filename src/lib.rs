//! Filing Risk Analyzer
//!
//! A one-shot batch pipeline that:
//! - Walks a local directory of downloaded SEC 10-K filings
//! - Extracts the "Item 1A. Risk Factors" section from each filing
//! - Chunks and embeds the extracted text into an ephemeral vector store
//! - Drives a zero-shot, single-tool reasoning agent to summarize the
//!   disclosed risks
//!
//! PIPELINE:
//! FILESYSTEM → TEXT → CHUNKS → VECTOR INDEX → AGENT → PRINTED ANSWER

pub mod agent;
pub mod chat;
pub mod config;
pub mod embedding;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod models;
pub mod splitter;
pub mod store;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use config::AnalyzerConfig;
pub use models::*;
