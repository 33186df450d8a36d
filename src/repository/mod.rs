//! Record repository: the only code that reads or writes the `employee` and `company` tables.
//!
//! Every operation checks out its own pooled connection and returns it on all exit paths.
//! Infrastructure failures are always the `Err` variant; `Ok(false)` / `Ok(None)` mean the
//! statement ran but matched nothing.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgEmployeeRepository;

use crate::error::AppError;
use crate::model::{Company, Employee, EmployeeRecord, EmployeeUpdate};
use async_trait::async_trait;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn employee_exists(&self, id: i64) -> Result<bool, AppError>;

    async fn company_exists(&self, id: i64) -> Result<bool, AppError>;

    /// Insert the company and the employee in one transaction. `Ok(true)` only when both
    /// inserts affected exactly one row; otherwise nothing is persisted.
    async fn create_employee_and_company(&self, employee: &Employee, company: &Company) -> Result<bool, AppError>;

    async fn create_employee(&self, employee: &Employee) -> Result<bool, AppError>;

    async fn get_employee(&self, id: i64) -> Result<Option<EmployeeRecord>, AppError>;

    async fn update_employee(&self, employee: &EmployeeUpdate) -> Result<bool, AppError>;

    async fn delete_employee(&self, id: i64) -> Result<bool, AppError>;

    /// Round-trip to the backing store; used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
