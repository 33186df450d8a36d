//! Employee records: HTTP create/read/update/delete for employee and company records on PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{AppConfig, DbConfig, LogFormat};
pub use db::{create_pool, ensure_database_exists, ensure_tables};
pub use error::{AppError, ConfigError};
pub use repository::{EmployeeStore, PgEmployeeRepository};
pub use routes::{app, common_routes, employee_routes};
pub use service::{RequestValidator, ValidationError};
pub use state::AppState;
