//! Form parsing shared by every page action.
//!
//! Bodies arrive as flat urlencoded maps. Each action input implements
//! [`ActionInput`] and reports problems as a `field -> message` map, keeping
//! only the first message for a field.

use std::{collections::BTreeMap, collections::HashMap, str::FromStr};

use axum::http::Method;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn check(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormData(HashMap<String, String>);

impl FormData {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Field that must be present and not blank.
    pub fn required(&self, field: &str, message: &str, errors: &mut FieldErrors) -> String {
        match self.get(field).map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                errors.add(field, message);
                String::new()
            }
        }
    }

    /// Field that must be present; blank is accepted.
    pub fn text(&self, field: &str, errors: &mut FieldErrors) -> String {
        match self.get(field) {
            Some(value) => value.trim().to_string(),
            None => {
                errors.add(field, "Required");
                String::new()
            }
        }
    }

    /// Absent and blank both read as `None`.
    pub fn optional(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Required field parsed into `T`; records an error and yields `T::default()` on failure.
    pub fn parse<T>(&self, field: &str, message: &str, errors: &mut FieldErrors) -> T
    where
        T: FromStr + Default,
    {
        let raw = self.required(field, message, errors);
        if raw.is_empty() {
            return T::default();
        }
        match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                errors.add(field, format!("Invalid {field}"));
                T::default()
            }
        }
    }

    pub fn date(&self, field: &str, message: &str, errors: &mut FieldErrors) -> NaiveDate {
        let raw = self.required(field, message, errors);
        if raw.is_empty() {
            return NaiveDate::default();
        }
        parse_date(&raw).unwrap_or_else(|| {
            errors.add(field, "Invalid date");
            NaiveDate::default()
        })
    }

    pub fn optional_date(&self, field: &str, errors: &mut FieldErrors) -> Option<NaiveDate> {
        let raw = self.optional(field)?;
        let date = parse_date(&raw);
        if date.is_none() {
            errors.add(field, "Invalid date");
        }
        date
    }

    pub fn boolean(&self, field: &str, errors: &mut FieldErrors) -> bool {
        match self.get(field).map(str::trim) {
            Some("true") => true,
            Some("false") => false,
            Some(_) => {
                errors.add(field, "Expected 'true' or 'false'");
                false
            }
            None => {
                errors.add(field, "Required");
                false
            }
        }
    }
}

/// Typed input of a page action.
pub trait ActionInput: Sized {
    fn parse(form: &FormData) -> Result<Self, FieldErrors>;
}

pub fn validate_action<T: ActionInput>(form: &FormData) -> AppResult<T> {
    T::parse(form).map_err(|errors| {
        tracing::debug!(?errors, "form validation failed");
        AppError::Validation(errors)
    })
}

/// Each action is bound to one HTTP method.
pub fn ensure_method(actual: &Method, expected: Method) -> AppResult<()> {
    if *actual == expected {
        Ok(())
    } else {
        Err(AppError::MethodNotAllowed)
    }
}

/// Accepts `YYYY-MM-DD` as well as full RFC 3339 timestamps from date pickers.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    const MESSAGE: &str = "Please enter a valid email address";
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Some(MESSAGE);
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Some(MESSAGE);
    };
    if local.is_empty() || domain.contains('@') {
        return Some(MESSAGE);
    }
    let has_dotted_domain = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if has_dotted_domain { None } else { Some(MESSAGE) }
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 {
        Some("Password min 6 characters")
    } else {
        None
    }
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Option<&'static str> {
    if password != confirm {
        Some("Password not Match")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("sales@store.co").is_none());
        assert!(validate_email("").is_some());
        assert!(validate_email("no-at-sign.com").is_some());
        assert!(validate_email("a@b").is_some());
        assert!(validate_email("a@.com").is_some());
        assert!(validate_email("a b@c.com").is_some());
        assert!(validate_email("a@b@c.com").is_some());
    }

    #[test]
    fn dates_from_pickers() {
        let expected = NaiveDate::from_ymd_opt(2022, 9, 1).unwrap();
        assert_eq!(parse_date("2022-09-01"), Some(expected));
        assert_eq!(parse_date("2022-09-01T10:00:00+00:00"), Some(expected));
        assert_eq!(parse_date("01/09/2022"), None);
    }
}
