//! HTTP handlers for employee records.

pub mod employee;
pub use employee::*;
