use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::Employee,
    validation::{
        ActionInput, FieldErrors, FormData, validate_confirm_password, validate_email,
        validate_password,
    },
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(message) = validate_email(&self.email) {
            errors.add("email", message);
        }
        if let Some(message) = validate_password(&self.password) {
            errors.add("password", message);
        }
        errors.check()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub email: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Submission of the login page, discriminated by `_action`.
#[derive(Debug, Clone)]
pub enum CredentialsForm {
    Login { email: String, password: String },
    Register(RegisterInput),
}

impl ActionInput for CredentialsForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let (Some(action), Some(email), Some(password)) =
            (form.get("_action"), form.get("email"), form.get("password"))
        else {
            return Err(FieldErrors::single("_action", "Invalid form data"));
        };

        let mut errors = FieldErrors::new();
        if let Some(message) = validate_email(email) {
            errors.add("email", message);
        }
        if let Some(message) = validate_password(password) {
            errors.add("password", message);
        }

        match action {
            "login" => {
                errors.check()?;
                Ok(CredentialsForm::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            "register" => {
                let Some(confirm_password) = form.get("confirm_password") else {
                    return Err(FieldErrors::single("_action", "Invalid form data"));
                };
                if let Some(message) = validate_confirm_password(password, confirm_password) {
                    errors.add("confirm_password", message);
                }
                errors.check()?;
                Ok(CredentialsForm::Register(RegisterInput {
                    email: email.to_string(),
                    password: password.to_string(),
                    confirm_password: confirm_password.to_string(),
                }))
            }
            _ => Err(FieldErrors::single("_action", "Invalid form data")),
        }
    }
}

/// Dashboard actions, discriminated by `_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardForm {
    Logout,
}

impl ActionInput for DashboardForm {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        match form.get("_action") {
            Some("logout") => Ok(DashboardForm::Logout),
            _ => Err(FieldErrors::single("_action", "Invalid form data")),
        }
    }
}

/// Signed-in user with the employee record, when there is one.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    pub employee: Option<Employee>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub email_verification: bool,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginPageQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Result of following an email verification link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    InvalidToken,
    Verified { user_id: Uuid, has_employee: bool },
}
