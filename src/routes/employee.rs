//! Employee record routes.

use crate::handlers::employee::{create_employee, delete_employee, read_employee, update_employee};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn employee_routes(state: AppState) -> Router {
    Router::new()
        .route("/createEmployeeRecord", post(create_employee))
        .route("/getEmployeeRecord/:emp_id", get(read_employee))
        .route("/updateEmployeeRecord/:emp_id", put(update_employee))
        .route("/deleteEmployeeRecord/:emp_id", delete(delete_employee))
        .with_state(state)
}
