use std::sync::Arc;
use toestel_rental::{
    adapters::postgres::{PostgresRentalStore, PostgresToestelCatalog},
    api::{handlers::AppState, router::create_router},
    application::rental::ServiceDependencies,
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toestel_rental=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize adapters
    let service_deps = ServiceDependencies {
        toestel_catalog: Arc::new(PostgresToestelCatalog::new(pool.clone())),
        rental_store: Arc::new(PostgresRentalStore::new(pool)),
    };

    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
