//! PostgreSQL implementation of [`EmployeeStore`].

use super::EmployeeStore;
use crate::db::acquire;
use crate::error::AppError;
use crate::model::{Company, Employee, EmployeeRecord, EmployeeUpdate};
use async_trait::async_trait;
use sqlx::{Connection, PgConnection, PgPool};

const EMPLOYEE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM employee WHERE emp_id = $1)";
const COMPANY_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM company WHERE company_id = $1)";
const INSERT_COMPANY: &str =
    "INSERT INTO company (company_id, company_name, company_location) VALUES ($1, $2, $3)";
const INSERT_EMPLOYEE: &str = "INSERT INTO employee (emp_id, emp_name, emp_level, company_id, designation, emp_location) \
     VALUES ($1, $2, $3, $4, $5, $6)";
const SELECT_RECORD: &str = r#"
    SELECT e.emp_id,
           e.emp_name,
           e.emp_level,
           e.company_id,
           e.designation,
           e.emp_location,
           c.company_name,
           c.company_location
    FROM employee e
    INNER JOIN company c ON c.company_id = e.company_id
    WHERE e.emp_id = $1
"#;
const UPDATE_EMPLOYEE: &str = "UPDATE employee SET emp_name = $1, emp_level = $2, designation = $3, emp_location = $4 \
     WHERE emp_id = $5";
const DELETE_EMPLOYEE: &str = "DELETE FROM employee WHERE emp_id = $1";

#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn insert_company(conn: &mut PgConnection, company: &Company) -> Result<u64, AppError> {
    tracing::debug!(sql = INSERT_COMPANY, company_id = company.id, "query");
    let done = sqlx::query(INSERT_COMPANY)
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.location)
        .execute(conn)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::CompanyExists(company.id)
            } else {
                query_failed("insert_company", company.id)(e)
            }
        })?;
    Ok(done.rows_affected())
}

async fn insert_employee(conn: &mut PgConnection, employee: &Employee) -> Result<u64, AppError> {
    tracing::debug!(sql = INSERT_EMPLOYEE, emp_id = employee.id, "query");
    let done = sqlx::query(INSERT_EMPLOYEE)
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.level)
        .bind(employee.company_id)
        .bind(&employee.designation)
        .bind(&employee.location)
        .execute(conn)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::Conflict(format!("employee {} already exists", employee.id))
            } else {
                query_failed("insert_employee", employee.id)(e)
            }
        })?;
    Ok(done.rows_affected())
}

fn query_failed(op: &'static str, id: i64) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!(op, id, error = %e, "query failed");
        AppError::Db(e)
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeRepository {
    async fn employee_exists(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let exists: bool = sqlx::query_scalar(EMPLOYEE_EXISTS)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(query_failed("employee_exists", id))?;
        Ok(exists)
    }

    async fn company_exists(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let exists: bool = sqlx::query_scalar(COMPANY_EXISTS)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(query_failed("company_exists", id))?;
        Ok(exists)
    }

    async fn create_employee_and_company(&self, employee: &Employee, company: &Company) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(query_failed("begin", employee.id))?;

        let inserted = async {
            let companies = insert_company(&mut tx, company).await?;
            let employees = insert_employee(&mut tx, employee).await?;
            Ok::<_, AppError>(companies == 1 && employees == 1)
        }
        .await;

        match inserted {
            Ok(true) => {
                tx.commit().await.map_err(query_failed("commit", employee.id))?;
                tracing::info!(emp_id = employee.id, company_id = company.id, "inserted employee and company");
                Ok(true)
            }
            Ok(false) => {
                tx.rollback().await.map_err(query_failed("rollback", employee.id))?;
                tracing::warn!(emp_id = employee.id, company_id = company.id, "insert affected no rows, rolled back");
                Ok(false)
            }
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                tracing::warn!(emp_id = employee.id, company_id = company.id, error = %e, "combined insert rolled back");
                Err(e)
            }
        }
    }

    async fn create_employee(&self, employee: &Employee) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let rows = insert_employee(&mut conn, employee).await?;
        if rows == 1 {
            tracing::info!(emp_id = employee.id, "inserted employee");
        }
        Ok(rows == 1)
    }

    async fn get_employee(&self, id: i64) -> Result<Option<EmployeeRecord>, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let record = sqlx::query_as::<_, EmployeeRecord>(SELECT_RECORD)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(query_failed("get_employee", id))?;
        Ok(record)
    }

    async fn update_employee(&self, employee: &EmployeeUpdate) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let done = sqlx::query(UPDATE_EMPLOYEE)
            .bind(&employee.name)
            .bind(employee.level)
            .bind(&employee.designation)
            .bind(&employee.location)
            .bind(employee.id)
            .execute(&mut *conn)
            .await
            .map_err(query_failed("update_employee", employee.id))?;
        Ok(done.rows_affected() == 1)
    }

    async fn delete_employee(&self, id: i64) -> Result<bool, AppError> {
        let mut conn = acquire(&self.pool).await?;
        let done = sqlx::query(DELETE_EMPLOYEE)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(query_failed("delete_employee", id))?;
        if done.rows_affected() == 1 {
            tracing::info!(emp_id = id, "deleted employee");
        }
        Ok(done.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = acquire(&self.pool).await?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(query_failed("ping", 0))?;
        Ok(())
    }
}
