//! Response envelopes and the outcome → (status, payload) catalog.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const ALREADY_EXIST_EMPLOYEE: &str = "Employee ID Already Exist";
pub const NOT_FOUND: &str = "Employee ID Not Found";

/// Successful write outcomes. Every variant answers 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Success {
    CreateEmployeeAndCompany,
    CreateEmployee,
    UpdateEmployee,
    DeleteEmployee,
}

impl Success {
    pub fn message(self) -> &'static str {
        match self {
            Success::CreateEmployeeAndCompany => "Employee and company details inserted successfully",
            Success::CreateEmployee => "Employee details inserted successfully",
            Success::UpdateEmployee => "Employee details updated successfully",
            Success::DeleteEmployee => "Employee details deleted successfully",
        }
    }
}

impl IntoResponse for Success {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            Json(MessageBody {
                status_code: StatusCode::OK.as_u16(),
                message: self.message(),
            }),
        )
            .into_response()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub status_code: u16,
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBody<T> {
    pub status_code: u16,
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationBody {
    pub validation_error: ValidationDetailBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetailBody {
    pub status_code: u16,
    pub message: String,
}

pub fn success_data<T: Serialize>(data: T) -> (StatusCode, Json<DataBody<T>>) {
    (
        StatusCode::OK,
        Json(DataBody {
            status_code: StatusCode::OK.as_u16(),
            data,
        }),
    )
}

pub fn validation_failed(message: &str) -> (StatusCode, Json<ValidationBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationBody {
            validation_error: ValidationDetailBody {
                status_code: StatusCode::BAD_REQUEST.as_u16(),
                message: message.to_string(),
            },
        }),
    )
}

pub fn already_exists() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::CONFLICT, ALREADY_EXIST_EMPLOYEE)
}

pub fn not_found() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::NOT_FOUND, NOT_FOUND)
}

/// Payload always carries 500; callers may pair it with a different HTTP status.
pub fn internal_error() -> (StatusCode, Json<ErrorBody>) {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
}

fn error_body(status: StatusCode, error: &'static str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            status_code: status.as_u16(),
            error,
        }),
    )
}
