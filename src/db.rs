//! Connection provider: pool construction, per-operation connection checkout, and table bootstrap.

use crate::config::DbConfig;
use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool, Postgres};

/// Build the bounded pool. Requests beyond `pool_size` wait for a free connection.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .connect_with(config.connect_options.clone())
        .await
}

/// Check out one connection; it returns to the pool when dropped.
pub async fn acquire(pool: &PgPool) -> Result<PoolConnection<Postgres>, AppError> {
    match pool.acquire().await {
        Ok(conn) => {
            tracing::debug!("connected to the database");
            Ok(conn)
        }
        Err(e) => {
            tracing::error!(error = %e, "error connecting to the database");
            Err(AppError::Db(e))
        }
    }
}

/// Connect to the `postgres` maintenance database and create the configured database if missing.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<(), AppError> {
    let db_name = match config.connect_options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let admin = config.connect_options.clone().database("postgres");
    let mut conn = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Create the `company` and `employee` tables if they do not exist. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS company (
            company_id BIGINT PRIMARY KEY,
            company_name TEXT NOT NULL,
            company_location TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employee (
            emp_id BIGINT PRIMARY KEY,
            emp_name TEXT NOT NULL,
            emp_level BIGINT NOT NULL,
            company_id BIGINT NOT NULL,
            designation TEXT NOT NULL,
            emp_location TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
