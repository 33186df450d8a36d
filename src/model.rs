//! Employee and company records as they cross the HTTP and SQL boundaries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub company_id: i64,
    pub designation: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub location: String,
}

/// Mutable part of an employee; `company_id` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub id: i64,
    pub name: String,
    pub level: i64,
    pub designation: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    pub employee: Employee,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    pub employee: EmployeeUpdate,
}

/// Employee joined with its company, as returned by the read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub emp_id: i64,
    pub emp_name: String,
    pub emp_level: i64,
    pub company_id: i64,
    pub designation: String,
    pub emp_location: String,
    pub company_name: String,
    pub company_location: String,
}

impl EmployeeRecord {
    pub fn from_parts(employee: &Employee, company: &Company) -> Self {
        EmployeeRecord {
            emp_id: employee.id,
            emp_name: employee.name.clone(),
            emp_level: employee.level,
            company_id: employee.company_id,
            designation: employee.designation.clone(),
            emp_location: employee.location.clone(),
            company_name: company.name.clone(),
            company_location: company.location.clone(),
        }
    }
}
