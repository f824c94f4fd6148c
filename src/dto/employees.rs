use axum::http::Method;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::employees::Gender,
    models::{Employee, User},
    validation::{ActionInput, FieldErrors, FormData},
};

pub const DEFAULT_IMAGE: &str = "default.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInput {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub address: String,
    pub phone: String,
    pub birth_day: Option<NaiveDate>,
    pub join_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image: String,
    pub job_title: String,
    pub is_active: bool,
}

impl EmployeeInput {
    fn parse(form: &FormData, errors: &mut FieldErrors) -> Self {
        let gender = match form.get("gender").map(str::trim) {
            Some("F") => Gender::F,
            Some("M") => Gender::M,
            Some(other) => {
                errors.add(
                    "gender",
                    format!("Invalid enum value. Expected 'F' | 'M', received '{other}'"),
                );
                Gender::F
            }
            None => {
                errors.add("gender", "Required");
                Gender::F
            }
        };

        Self {
            user_id: form.parse("user_id", "UserId is required", errors),
            first_name: form.required("first_name", "First Name is required", errors),
            last_name: form.required("last_name", "Last Name is required", errors),
            gender,
            address: form.text("address", errors),
            phone: form.text("phone", errors),
            birth_day: form.optional_date("birth_day", errors),
            join_date: form.optional_date("join_date", errors),
            end_date: form.optional_date("end_date", errors),
            image: form
                .optional("image")
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            job_title: form.text("job_title", errors),
            is_active: form.boolean("is_active", errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeAction {
    Create(EmployeeInput),
    Update(EmployeeInput),
    Delete { email: String },
}

impl EmployeeAction {
    pub fn method(&self) -> Method {
        match self {
            EmployeeAction::Create(_) => Method::POST,
            EmployeeAction::Update(_) => Method::PUT,
            EmployeeAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for EmployeeAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createEmploye") => EmployeeAction::Create(EmployeeInput::parse(form, &mut errors)),
            Some("updateEmploye") => EmployeeAction::Update(EmployeeInput::parse(form, &mut errors)),
            Some("deleteEmploye") => EmployeeAction::Delete {
                email: form.required("email", "Email is required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Action Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeePage {
    /// Users that do not have an employee record yet.
    pub users: Vec<User>,
    pub employee: Vec<Employee>,
}
