use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use verity::{
    api::routes::create_router, generation::ContentGenerator, sources::SourceDirectory, AppState,
    Config, LlmContentGenerator, ProjectStore, Provider, WorkflowOrchestrator, WorkflowQueue,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verity=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "verity starting"
    );

    // Storage
    let store = Arc::new(ProjectStore::new_local(&config.database.path).await?);

    let sources = Arc::new(SourceDirectory::new(Arc::clone(&store)));
    sources.initialize_default_sources().await?;

    // Content generation port: constructed once, injected everywhere.
    let provider = Provider::from_config(&config.llm)?;
    tracing::info!(provider = provider.name(), "content generation provider ready");
    let generator: Arc<dyn ContentGenerator> =
        Arc::new(LlmContentGenerator::new(provider.create_client().await?));

    // Workflow worker pool; HTTP handlers only enqueue.
    let orchestrator = Arc::new(WorkflowOrchestrator::new(
        Arc::clone(&store),
        Arc::clone(&generator),
        config.workflow.clone(),
    ));
    let queue = Arc::new(WorkflowQueue::start(
        orchestrator,
        config.workflow.queue_workers,
        config.workflow.queue_capacity,
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        store,
        queue,
        sources,
    };

    let app = create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
