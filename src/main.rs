use anyhow::Context;
use lab_equipment_tracker::{
    adapters::{
        memory::{
            ActivityLog as MemoryActivityLog, OperationJournal as MemoryOperationJournal,
            StatusStore as MemoryStatusStore,
        },
        postgres::{PostgresActivityLog, PostgresOperationJournal, PostgresStatusStore},
    },
    api::{handlers::AppState, router::create_router},
    application::checkout::ServiceDependencies,
    config::{AppConfig, DatabaseConfig},
    domain::Catalog,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lab_equipment_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    if config.admin.password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
    }

    let service_deps = build_dependencies(&config.database).await?;

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        admin: config.admin.clone(),
    });

    let app = create_router(app_state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Postgres adapters when a database URL is configured, in-memory otherwise
async fn build_dependencies(database: &DatabaseConfig) -> anyhow::Result<ServiceDependencies> {
    let catalog = Catalog::lab_default().context("Invalid equipment catalog")?;

    let Some(url) = database.url.as_deref() else {
        tracing::warn!("DATABASE_URL is not set; state is kept in memory and lost on restart");
        let status_store = Arc::new(MemoryStatusStore::new());
        let activity_log = Arc::new(MemoryActivityLog::new());
        let journal = MemoryOperationJournal::new(status_store.clone(), activity_log.clone());
        return Ok(ServiceDependencies::new(
            catalog,
            status_store,
            activity_log,
            Arc::new(journal),
        ));
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Connected to database");

    Ok(ServiceDependencies::new(
        catalog,
        Arc::new(PostgresStatusStore::new(pool.clone())),
        Arc::new(PostgresActivityLog::new(pool.clone())),
        Arc::new(PostgresOperationJournal::new(pool)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
