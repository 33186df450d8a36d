//! Request validation for the create and update payloads.
//!
//! Validation stops at the first violated rule. Keys are visited in declaration order
//! (company before employee), and unknown keys are reported after the declared ones.

use crate::model::{Company, CreateEmployeeRequest, Employee, EmployeeUpdate, UpdateEmployeeRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// Letters, periods, commas and spaces.
pub const NAME_PATTERN: &str = "^[a-zA-Z., ]+$";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(NAME_PATTERN).expect("name pattern compiles"));

/// Employee ids below this are reserved.
pub const MIN_EMPLOYEE_ID: i64 = 3;

const ROOT_CREATE_KEYS: &[&str] = &["company", "employee"];
const ROOT_UPDATE_KEYS: &[&str] = &["employee"];
const COMPANY_KEYS: &[&str] = &["id", "name", "location"];
const EMPLOYEE_CREATE_KEYS: &[&str] = &["id", "name", "level", "companyId", "designation", "location"];
const EMPLOYEE_UPDATE_KEYS: &[&str] = &["id", "name", "level", "designation", "location"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub details: Vec<ValidationDetail>,
}

impl ValidationError {
    fn at(path: &str, reason: impl fmt::Display) -> Self {
        ValidationError {
            details: vec![ValidationDetail {
                message: format!("\"{}\" {}", path, reason),
                path: path.to_string(),
            }],
        }
    }

    /// Message of the first violated rule.
    pub fn message(&self) -> &str {
        self.details
            .first()
            .map(|d| d.message.as_str())
            .unwrap_or("invalid payload")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create payload: `{ company: {...}, employee: {...} }`.
    pub fn validate_create(body: &Value) -> Result<CreateEmployeeRequest, ValidationError> {
        let root = as_object(body, "value")?;

        let company_obj = object_field(root, "", "company")?;
        let company = Company {
            id: integer_field(company_obj, "company", "id", None)?,
            name: name_field(company_obj, "company", "name")?,
            location: name_field(company_obj, "company", "location")?,
        };
        reject_unknown(company_obj, "company", COMPANY_KEYS)?;

        let employee_obj = object_field(root, "", "employee")?;
        let employee = Employee {
            id: integer_field(employee_obj, "employee", "id", Some(MIN_EMPLOYEE_ID))?,
            name: name_field(employee_obj, "employee", "name")?,
            level: integer_field(employee_obj, "employee", "level", None)?,
            company_id: integer_field(employee_obj, "employee", "companyId", None)?,
            designation: name_field(employee_obj, "employee", "designation")?,
            location: name_field(employee_obj, "employee", "location")?,
        };
        reject_unknown(employee_obj, "employee", EMPLOYEE_CREATE_KEYS)?;
        reject_unknown(root, "", ROOT_CREATE_KEYS)?;

        if employee.company_id != company.id {
            return Err(ValidationError::at("employee.companyId", "must match \"company.id\""));
        }
        Ok(CreateEmployeeRequest { employee, company })
    }

    /// Validate an update payload: `{ employee: {...} }` with `employee.id` already set.
    pub fn validate_update(body: &Value) -> Result<UpdateEmployeeRequest, ValidationError> {
        let root = as_object(body, "value")?;
        let employee_obj = object_field(root, "", "employee")?;
        let employee = EmployeeUpdate {
            id: integer_field(employee_obj, "employee", "id", Some(MIN_EMPLOYEE_ID))?,
            name: name_field(employee_obj, "employee", "name")?,
            level: integer_field(employee_obj, "employee", "level", None)?,
            designation: name_field(employee_obj, "employee", "designation")?,
            location: name_field(employee_obj, "employee", "location")?,
        };
        reject_unknown(employee_obj, "employee", EMPLOYEE_UPDATE_KEYS)?;
        reject_unknown(root, "", ROOT_UPDATE_KEYS)?;
        Ok(UpdateEmployeeRequest { employee })
    }
}

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn as_object<'a>(v: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    v.as_object()
        .ok_or_else(|| ValidationError::at(path, "must be of type object"))
}

fn required<'a>(obj: &'a Map<String, Value>, prefix: &str, key: &str) -> Result<&'a Value, ValidationError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(ValidationError::at(&field_path(prefix, key), "is required")),
        Some(v) => Ok(v),
    }
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    prefix: &str,
    key: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    let v = required(obj, prefix, key)?;
    as_object(v, &field_path(prefix, key))
}

fn integer_field(
    obj: &Map<String, Value>,
    prefix: &str,
    key: &str,
    min: Option<i64>,
) -> Result<i64, ValidationError> {
    let path = field_path(prefix, key);
    let v = required(obj, prefix, key)?;
    let n = match v {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ValidationError::at(&path, "must be an integer"))?,
        // Numeric strings convert, so "113" and 113 validate alike.
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::at(&path, "must be a number"))?,
        _ => return Err(ValidationError::at(&path, "must be a number")),
    };
    if let Some(min) = min {
        if n < min {
            return Err(ValidationError::at(
                &path,
                format_args!("must be greater than or equal to {}", min),
            ));
        }
    }
    Ok(n)
}

fn name_field(obj: &Map<String, Value>, prefix: &str, key: &str) -> Result<String, ValidationError> {
    let path = field_path(prefix, key);
    let s = required(obj, prefix, key)?
        .as_str()
        .ok_or_else(|| ValidationError::at(&path, "must be a string"))?;
    if s.is_empty() {
        return Err(ValidationError::at(&path, "is not allowed to be empty"));
    }
    if !NAME_RE.is_match(s) {
        return Err(ValidationError::at(
            &path,
            format_args!("with value \"{}\" fails to match the required pattern: /{}/", s, NAME_PATTERN),
        ));
    }
    Ok(s.to_string())
}

fn reject_unknown(obj: &Map<String, Value>, prefix: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    match obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(k) => Err(ValidationError::at(&field_path(prefix, k), "is not allowed")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> Value {
        json!({
            "employee": {
                "id": 112,
                "name": "kumaran",
                "level": 8,
                "companyId": 8009,
                "designation": "Mgr",
                "location": "Bengaluru"
            },
            "company": {
                "id": 8009,
                "name": "xyz Inc.",
                "location": "Bengaluru"
            }
        })
    }

    fn create_error(body: &Value) -> String {
        RequestValidator::validate_create(body).unwrap_err().message().to_string()
    }

    #[test]
    fn accepts_valid_create_payload() {
        let req = RequestValidator::validate_create(&create_body()).unwrap();
        assert_eq!(req.employee.id, 112);
        assert_eq!(req.employee.company_id, 8009);
        assert_eq!(req.company.name, "xyz Inc.");
    }

    #[test]
    fn employee_id_must_be_at_least_three() {
        let mut body = create_body();
        body["employee"]["id"] = json!(2);
        assert_eq!(create_error(&body), "\"employee.id\" must be greater than or equal to 3");
    }

    #[test]
    fn missing_employee_is_required() {
        let mut body = create_body();
        body.as_object_mut().unwrap().remove("employee");
        assert_eq!(create_error(&body), "\"employee\" is required");
    }

    #[test]
    fn company_is_checked_before_employee() {
        let mut body = create_body();
        body["employee"]["level"] = json!("eight");
        body["company"]["location"] = json!("Bengaluru 560001");
        assert_eq!(
            create_error(&body),
            "\"company.location\" with value \"Bengaluru 560001\" fails to match the required pattern: /^[a-zA-Z., ]+$/"
        );
    }

    #[test]
    fn level_must_be_a_number() {
        let mut body = create_body();
        body["employee"]["level"] = json!("eight");
        let err = RequestValidator::validate_create(&body).unwrap_err();
        assert_eq!(err.message(), "\"employee.level\" must be a number");
        assert_eq!(err.details[0].path, "employee.level");
    }

    #[test]
    fn fractional_ids_are_rejected() {
        let mut body = create_body();
        body["company"]["id"] = json!(8009.5);
        assert_eq!(create_error(&body), "\"company.id\" must be an integer");
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut body = create_body();
        body["employee"]["name"] = json!("");
        assert_eq!(create_error(&body), "\"employee.name\" is not allowed to be empty");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut body = create_body();
        body["employee"]["salary"] = json!(100);
        assert_eq!(create_error(&body), "\"employee.salary\" is not allowed");

        let mut body = create_body();
        body["extra"] = json!(true);
        assert_eq!(create_error(&body), "\"extra\" is not allowed");
    }

    #[test]
    fn company_reference_must_match() {
        let mut body = create_body();
        body["employee"]["companyId"] = json!(1);
        assert_eq!(create_error(&body), "\"employee.companyId\" must match \"company.id\"");
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_eq!(create_error(&json!([1, 2])), "\"value\" must be of type object");
    }

    #[test]
    fn update_accepts_mutable_fields() {
        let body = json!({
            "employee": { "id": 104, "name": "kumaran", "level": 9, "designation": "Sr Mgr", "location": "Chennai" }
        });
        let req = RequestValidator::validate_update(&body).unwrap();
        assert_eq!(req.employee.id, 104);
        assert_eq!(req.employee.level, 9);
    }

    #[test]
    fn update_rejects_company_change() {
        let body = json!({
            "employee": {
                "id": 104, "name": "kumaran", "level": 9, "designation": "Mgr",
                "location": "Chennai", "companyId": 9
            }
        });
        let err = RequestValidator::validate_update(&body).unwrap_err();
        assert_eq!(err.message(), "\"employee.companyId\" is not allowed");
    }

    #[test]
    fn update_requires_string_id_to_be_numeric() {
        let body = json!({
            "employee": { "id": "abc", "name": "kumaran", "level": 9, "designation": "Mgr", "location": "Chennai" }
        });
        let err = RequestValidator::validate_update(&body).unwrap_err();
        assert_eq!(err.message(), "\"employee.id\" must be a number");
    }

    #[test]
    fn numeric_strings_are_converted() {
        let mut body = create_body();
        body["employee"]["id"] = json!("113");
        body["employee"]["level"] = json!(" 8 ");
        body["company"]["id"] = json!("8009");
        let req = RequestValidator::validate_create(&body).unwrap();
        assert_eq!(req.employee.id, 113);
        assert_eq!(req.employee.level, 8);
        assert_eq!(req.company.id, 8009);
    }

    #[test]
    fn converted_strings_still_respect_minimum() {
        let mut body = create_body();
        body["employee"]["id"] = json!("2");
        assert_eq!(create_error(&body), "\"employee.id\" must be greater than or equal to 3");
    }
}
