use filing_risk_analyzer::{
    agent::ZeroShotAgent,
    chat::ChatClient,
    config::AnalyzerConfig,
    embedding::EmbeddingClient,
    extractor::RiskSectionExtractor,
    locator::FilingLocator,
    splitter::RecursiveTextSplitter,
    store::VectorStore,
    tools::{DocumentTool, ToolRegistry},
};
use std::sync::Arc;
use tracing::info;

/// Ticker whose filings are analyzed.
const TICKER: &str = "AAPL";
/// Root of the pre-populated EDGAR download tree.
const DOWNLOAD_ROOT: &str = "./sec-edgar-filings";
/// The one question this batch run answers.
const QUESTION: &str = "Summarize the main risks identified in the 10-K filings. In English.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    info!("Filing Risk Analyzer starting");

    // Locate and extract before touching any network service, so an empty
    // download directory exits without a single API call.
    let locator = FilingLocator::new(DOWNLOAD_ROOT, TICKER);
    let filings = locator.locate()?;

    let extractor = RiskSectionExtractor;
    let mut documents = Vec::new();
    for filing in &filings {
        let document = extractor.extract(filing)?;
        if !document.content.is_empty() {
            documents.push(document);
        }
    }

    if documents.is_empty() {
        println!("No filings found for the given ticker.");
        return Ok(());
    }

    info!(documents = documents.len(), "extracted risk-factor sections");

    let config = AnalyzerConfig::from_env()?;

    let splitter = RecursiveTextSplitter::new(config.chunk_size, config.chunk_overlap);
    let chunks = splitter.split_documents(&documents);
    info!(chunks = chunks.len(), "split documents into chunks");

    let embedder = EmbeddingClient::new(
        config.openai_api_key.clone(),
        &config.api_base_url,
        config.embedding_model.clone(),
        config.request_timeout,
    )?;
    let chat = ChatClient::new(
        config.openai_api_key.clone(),
        &config.api_base_url,
        config.chat_model.clone(),
        config.temperature,
        config.request_timeout,
    )?;

    // The store owns its temp directory; it is removed when `store` drops
    // at the end of main, after the agent has finished querying it.
    let store = Arc::new(VectorStore::build(chunks, embedder).await?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DocumentTool::new(
        Arc::clone(&store),
        chat.clone(),
        config.top_k,
    )));

    let agent = ZeroShotAgent::new(chat, registry, config.max_agent_steps);

    match agent.run(QUESTION).await {
        Ok(response) => {
            println!("{}", response.answer);
            Ok(())
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
