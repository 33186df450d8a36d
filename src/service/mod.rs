//! Payload validation ahead of any repository call.

mod validation;
pub use validation::{RequestValidator, ValidationDetail, ValidationError, MIN_EMPLOYEE_ID, NAME_PATTERN};
