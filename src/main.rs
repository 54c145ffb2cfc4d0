use clap::Parser;
use larder::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    indexer, loader,
    store::{Embedder, RecipeCollection, RecipeStore, SentenceEmbedder},
    Error, Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,larder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Index { file } => {
            index(settings, file).await?;
        }
        Commands::Query { ingredients } => {
            query(settings, ingredients).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Larder server");
    info!("Dataset: {}", settings.dataset.path.display());
    info!("Vector store: {}", settings.store.path.display());
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Load and index once at startup; any failure degrades to an
    // absent collection and the server still starts.
    let collection = build_collection(&settings).await.map(Arc::new);
    let indexed = collection.is_some();

    // Create application state
    let state = AppState {
        collection,
        settings: settings.clone(),
    };

    // Create router
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Larder Recipe Finder");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!(
        "Collection: {}",
        if indexed { "Ready" } else { "Empty (nothing indexed)" }
    );
    println!("\nEndpoints:");
    println!("  GET  /");
    println!("  GET  /api/recommend");
    println!("  GET  /api/stats");
    println!("  GET  /health");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

/// Load the dataset and rebuild the collection. Every failure kind is
/// logged and degrades to `None` so callers only have to check for an
/// absent collection.
async fn build_collection(settings: &Settings) -> Option<RecipeCollection> {
    let embedder: Arc<dyn Embedder> =
        match SentenceEmbedder::new(settings.store.embedding_cache_dir.as_deref()) {
            Ok(embedder) => Arc::new(embedder),
            Err(e) => {
                warn!("Failed to initialize embedding model: {e}");
                return None;
            }
        };

    let store = match RecipeStore::open(&settings.store.path, embedder).await {
        Ok(store) => store,
        Err(e) => {
            warn!("Failed to open vector store: {e}");
            return None;
        }
    };

    let records = match loader::load_recipes(&settings.dataset.path) {
        Ok(records) => Some(records),
        Err(e) => {
            warn!("Failed to load recipes: {e}");
            None
        }
    };

    indexer::index_recipes(&store, records.as_deref(), &settings.store.collection).await
}

async fn index(mut settings: Settings, file: Option<String>) -> Result<()> {
    if let Some(file) = file {
        settings.dataset.path = file.into();
    }

    match build_collection(&settings).await {
        Some(collection) => {
            let count = collection.count().await?;
            println!(
                "\x1b[32m\u{2713}\x1b[0m Indexed {count} recipes into '{}'",
                settings.store.collection
            );
        }
        None => println!("No recipes indexed - check the logs above"),
    }

    Ok(())
}

async fn query(settings: Settings, ingredients: String) -> Result<()> {
    let server_url = settings
        .server
        .external_url
        .unwrap_or_else(|| format!("http://{}:{}", settings.server.host, settings.server.port));

    larder::cli::commands::query(&server_url, &ingredients).await
}
