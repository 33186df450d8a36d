//! In-memory [`EmployeeStore`] for handler tests, with switches to simulate write and driver failures.

use super::EmployeeStore;
use crate::error::AppError;
use crate::model::{Company, Employee, EmployeeRecord, EmployeeUpdate};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    companies: BTreeMap<i64, Company>,
    employees: BTreeMap<i64, Employee>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    /// Employee inserts fail with a driver error (after any company insert in the same transaction).
    pub fail_employee_insert: AtomicBool,
    /// Inserts run but affect no rows.
    pub reject_writes: AtomicBool,
    /// `company_exists` answers false even when the company is stored.
    pub stale_company_check: AtomicBool,
    /// Every operation fails with a driver error.
    pub unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(self, company: Company) -> Self {
        self.lock().companies.insert(company.id, company);
        self
    }

    pub fn with_employee(self, employee: Employee) -> Self {
        self.lock().employees.insert(employee.id, employee);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn employee_count(&self) -> usize {
        self.lock().employees.len()
    }

    pub fn company_count(&self) -> usize {
        self.lock().companies.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn employee_insert_allowed(&self) -> Result<bool, AppError> {
        if self.fail_employee_insert.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::Protocol("employee insert failed".into())));
        }
        Ok(!self.reject_writes.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn employee_exists(&self, id: i64) -> Result<bool, AppError> {
        self.enter()?;
        Ok(self.lock().employees.contains_key(&id))
    }

    async fn company_exists(&self, id: i64) -> Result<bool, AppError> {
        self.enter()?;
        if self.stale_company_check.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.lock().companies.contains_key(&id))
    }

    async fn create_employee_and_company(&self, employee: &Employee, company: &Company) -> Result<bool, AppError> {
        self.enter()?;
        let mut tables = self.lock();
        if tables.companies.contains_key(&company.id) {
            return Err(AppError::CompanyExists(company.id));
        }
        if tables.employees.contains_key(&employee.id) {
            return Err(AppError::Conflict(format!("employee {} already exists", employee.id)));
        }
        // Both rows land together or not at all.
        if !self.employee_insert_allowed()? {
            return Ok(false);
        }
        tables.companies.insert(company.id, company.clone());
        tables.employees.insert(employee.id, employee.clone());
        Ok(true)
    }

    async fn create_employee(&self, employee: &Employee) -> Result<bool, AppError> {
        self.enter()?;
        let mut tables = self.lock();
        if tables.employees.contains_key(&employee.id) {
            return Err(AppError::Conflict(format!("employee {} already exists", employee.id)));
        }
        if !self.employee_insert_allowed()? {
            return Ok(false);
        }
        tables.employees.insert(employee.id, employee.clone());
        Ok(true)
    }

    async fn get_employee(&self, id: i64) -> Result<Option<EmployeeRecord>, AppError> {
        self.enter()?;
        let tables = self.lock();
        Ok(tables.employees.get(&id).and_then(|e| {
            tables
                .companies
                .get(&e.company_id)
                .map(|c| EmployeeRecord::from_parts(e, c))
        }))
    }

    async fn update_employee(&self, update: &EmployeeUpdate) -> Result<bool, AppError> {
        self.enter()?;
        let mut tables = self.lock();
        match tables.employees.get_mut(&update.id) {
            Some(e) => {
                e.name = update.name.clone();
                e.level = update.level;
                e.designation = update.designation.clone();
                e.location = update.location.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_employee(&self, id: i64) -> Result<bool, AppError> {
        self.enter()?;
        Ok(self.lock().employees.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter()
    }
}
