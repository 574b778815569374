//! Tool trait and registry
//!
//! The agent sees capabilities only through this interface: a named tool
//! with a natural-language description, selected by the reasoning model
//! from the description alone. One tool is registered in this pipeline —
//! retrieval-QA over the filing vector store.

use crate::chat::ChatClient;
use crate::error::AnalyzerError;
use crate::models::{RetrievedChunk, ToolInput, ToolOutput};
use crate::store::VectorStore;
use crate::Result;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Trait for a single agent-callable tool.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput>;
}

/// Tool registry for looking up and executing tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// `(name, description)` pairs for prompt construction.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .tools
            .values()
            .map(|tool| (tool.name().to_string(), tool.description().to_string()))
            .collect();
        entries.sort();
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn require_question(input: &ToolInput) -> Result<String> {
    input
        .parameters
        .get("question")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            AnalyzerError::InvalidToolInput("Expected 'question' in tool_input".to_string())
        })
}

/// Retrieval-QA over the filing vector store, exposed as one tool.
///
/// Execution is a stuff chain: retrieve the top-k chunks for the question,
/// render them as a context block, and have the chat model answer from
/// that context alone.
pub struct DocumentTool {
    store: Arc<VectorStore>,
    chat: ChatClient,
    top_k: usize,
}

impl DocumentTool {
    pub fn new(store: Arc<VectorStore>, chat: ChatClient, top_k: usize) -> Self {
        Self { store, chat, top_k }
    }
}

#[async_trait::async_trait]
impl Tool for DocumentTool {
    fn name(&self) -> &'static str {
        "document_tool"
    }

    fn description(&self) -> &'static str {
        "Useful for answering questions about the document"
    }

    async fn execute(&self, input: &ToolInput) -> Result<ToolOutput> {
        let question = require_question(input)?;

        let retrieved = self.store.retrieve(&question, self.top_k).await?;
        info!(
            question = %question,
            retrieved = retrieved.len(),
            "document tool retrieved supporting chunks"
        );

        let context = render_context(&retrieved);
        let prompt = build_qa_prompt(&question, &context);
        let answer = self
            .chat
            .complete(
                "You answer questions about SEC filings using only the supplied excerpts. \
                 If the excerpts do not contain the answer, say so.",
                &prompt,
            )
            .await?;

        Ok(ToolOutput {
            success: true,
            data: json!({ "answer": answer }),
            error: None,
        })
    }
}

fn render_context(chunks: &[RetrievedChunk]) -> String {
    let mut out = String::new();
    for retrieved in chunks {
        out.push_str(&format!(
            "Source: {}\nScore: {:.4}\n{}\n---\n",
            retrieved.chunk.source.display(),
            retrieved.score,
            retrieved.chunk.content.trim()
        ));
    }
    out
}

fn build_qa_prompt(question: &str, context: &str) -> String {
    format!(
        "Context excerpts from 10-K filings:\n{}\n\nQuestion:\n{}\n\nAnswer using only the context above.",
        context, question
    )
}
