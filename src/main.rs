//! Server binary: loads configuration, prepares the database, and serves the employee routes.

use employee_records::{
    app, create_pool, ensure_database_exists, ensure_tables, AppConfig, AppState, LogFormat,
    PgEmployeeRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    ensure_database_exists(&config.db).await?;
    let pool = create_pool(&config.db).await?;
    ensure_tables(&pool).await?;
    tracing::info!(pool_size = config.db.pool_size, "database ready");

    let state = AppState::new(Arc::new(PgEmployeeRepository::new(pool)));
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.listen_addr()?).await?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("employee_records=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
