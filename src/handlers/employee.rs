//! Employee record handlers: create, read, update, delete.
//!
//! Each handler runs validate → check preconditions → delegate to the store → map the outcome
//! onto the response catalog.

use crate::error::AppError;
use crate::model::CreateEmployeeRequest;
use crate::response::{success_data, Success};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("\"empId\" must be a number".into()))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(v)| v)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// POST /createEmployeeRecord
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Success, AppError> {
    let body = json_body(payload)?;
    let CreateEmployeeRequest { employee, company } = RequestValidator::validate_create(&body)?;

    if state.store.employee_exists(employee.id).await? {
        return Err(AppError::Conflict(format!("employee {}", employee.id)));
    }

    if !state.store.company_exists(company.id).await? {
        match state.store.create_employee_and_company(&employee, &company).await {
            Ok(true) => return Ok(Success::CreateEmployeeAndCompany),
            Ok(false) => {
                return Err(AppError::WriteRejected(format!(
                    "employee {} with company {}",
                    employee.id, company.id
                )))
            }
            // A concurrent request created the company first; attach the employee to it.
            Err(AppError::CompanyExists(id)) => {
                tracing::info!(company_id = id, emp_id = employee.id, "company created concurrently");
            }
            Err(e) => return Err(e),
        }
    }

    if state.store.create_employee(&employee).await? {
        Ok(Success::CreateEmployee)
    } else {
        Err(AppError::WriteRejected(format!("employee {}", employee.id)))
    }
}

/// GET /getEmployeeRecord/:empId
pub async fn read_employee(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let record = state
        .store
        .get_employee(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("employee {}", id)))?;
    Ok(success_data(record))
}

/// PUT /updateEmployeeRecord/:empId
///
/// The path id replaces any `employee.id` in the body before validation.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Success, AppError> {
    let mut body = json_body(payload)?;
    if let Some(employee) = body.get_mut("employee").and_then(Value::as_object_mut) {
        let id = id_str
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(id_str.clone()));
        employee.insert("id".into(), id);
    }
    let req = RequestValidator::validate_update(&body)?;

    if state.store.update_employee(&req.employee).await? {
        Ok(Success::UpdateEmployee)
    } else {
        Err(AppError::NotFound(format!("employee {}", req.employee.id)))
    }
}

/// DELETE /deleteEmployeeRecord/:empId
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Success, AppError> {
    let id = parse_id(&id_str)?;
    if state.store.delete_employee(id).await? {
        Ok(Success::DeleteEmployee)
    } else {
        Err(AppError::NotFound(format!("employee {}", id)))
    }
}
