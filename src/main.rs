use humans_api::config::Config;
use humans_api::db::Database;
use humans_api::db_storage::PgHumanStore;
use humans_api::handlers::AppState;
use humans_api::human_service::HumanService;
use humans_api::routes;
use humans_api::services::EnrichmentClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, configuration, the database pool and the enrichment
/// client, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "humans_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database connection pool established");

    let enrichment =
        EnrichmentClient::new(config.enrichment.clone(), config.enrichment_timeout())?;
    tracing::info!("Enrichment client initialized");

    let humans = HumanService::new(PgHumanStore::new(db.pool.clone()), enrichment);
    let app = routes::app(Arc::new(AppState::new(humans)));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger/", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
