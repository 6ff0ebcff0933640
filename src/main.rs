use std::net::SocketAddr;

use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studymate_server::store::ContentStore;
use studymate_server::{answer, app, db, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studymate_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StudyMate server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    // Open catalog and run migrations
    let pool = db::create_pool(&config.database_path).await?;

    tracing::info!("Running catalog migrations...");
    db::MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations complete");

    // Prepare the content store directory
    let store = ContentStore::new(&config.upload_dir);
    store.ensure_root().await?;

    // Select the answer engine
    let answerer = answer::from_config(&config)?;
    tracing::info!("Answer engine: {}", answerer.name());

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .allowed_origins
                .iter()
                .map(|s| s.parse().unwrap())
                .collect::<Vec<_>>(),
        )
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    // Create app state
    let state = AppState {
        pool,
        config: config.clone(),
        store,
        answerer,
    };

    // Build router
    let router = app(state).layer(cors);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
