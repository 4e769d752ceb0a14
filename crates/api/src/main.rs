use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod extractors;
mod jobs;
mod middleware;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting Regos API v{}", env!("CARGO_PKG_VERSION"));

    let (repos, pool) = if config.uses_postgres() {
        let pool = persistence::db::create_pool(&config.database_config()).await?;

        info!("Running database migrations...");
        sqlx::migrate!("../persistence/src/migrations")
            .run(&pool)
            .await?;
        info!("Migrations completed");

        jobs::pool_metrics::spawn(pool.clone());

        (app::Repositories::postgres(pool.clone()), Some(pool))
    } else {
        info!("No database configured, using in-memory backend with demo data");
        (
            app::Repositories::memory(persistence::memory::MemoryBackend::seeded()),
            None,
        )
    };

    let app = app::create_app(config.clone(), repos, pool);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
