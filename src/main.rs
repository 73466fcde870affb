use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use tanglin::application::ports::{FileRegistry, InferenceBackend, TextExtractor, TextSplitter};
use tanglin::application::services::{AnalysisService, ChatService, FallbackResponder};
use tanglin::domain::DocumentKind;
use tanglin::infrastructure::extraction::{
    CompositeExtractor, PdfExtractor, SpreadsheetExtractor,
};
use tanglin::infrastructure::llm::OllamaClient;
use tanglin::infrastructure::observability::{init_tracing, TracingConfig};
use tanglin::infrastructure::persistence::{create_pool, InMemoryFileRegistry, PgFileRegistry};
use tanglin::infrastructure::text_processing::SentenceSplitter;
use tanglin::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(
        TracingConfig {
            json_format: settings.logging.json_format,
        },
        settings.server.port,
    );

    let extractor: Arc<dyn TextExtractor> = Arc::new(CompositeExtractor::new(vec![
        (DocumentKind::Pdf, Arc::new(PdfExtractor::new()) as Arc<dyn TextExtractor>),
        (
            DocumentKind::Spreadsheet,
            Arc::new(SpreadsheetExtractor::new()) as Arc<dyn TextExtractor>,
        ),
    ]));

    let splitter: Arc<dyn TextSplitter> =
        Arc::new(SentenceSplitter::new(settings.chunking.max_chunk_size));

    let backend: Arc<dyn InferenceBackend> = Arc::new(OllamaClient::new(
        settings.backend.base_url.clone(),
        settings.backend.model.clone(),
    ));

    let registry = build_registry(&settings).await;

    let analysis_service = Arc::new(AnalysisService::new(
        extractor,
        splitter,
        Arc::clone(&backend),
        settings.chunking.max_analyzed_chunks,
        settings.backend.analysis_timeout(),
    ));

    let chat_service = Arc::new(ChatService::new(
        analysis_service,
        backend,
        Arc::clone(&registry),
        FallbackResponder::new(settings.assistant_name.clone()),
        settings.backend.chat_timeout(),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        chat_service,
        registry,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Durable Postgres registry when `DATABASE_URL` is set and reachable,
/// otherwise the ephemeral in-memory registry.
async fn build_registry(settings: &Settings) -> Arc<dyn FileRegistry> {
    let Some(url) = settings.storage.database_url.as_deref() else {
        tracing::info!("No DATABASE_URL configured, using in-memory file registry");
        return Arc::new(InMemoryFileRegistry::new());
    };

    match create_pool(url, settings.storage.max_pool_connections).await {
        Ok(pool) => {
            let registry = PgFileRegistry::new(pool);
            match registry.migrate().await {
                Ok(()) => {
                    tracing::info!("Using PostgreSQL file registry");
                    return Arc::new(registry);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Schema bootstrap failed");
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "PostgreSQL unavailable");
        }
    }

    tracing::warn!("Falling back to in-memory file registry");
    Arc::new(InMemoryFileRegistry::new())
}
