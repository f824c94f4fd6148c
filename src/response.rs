use serde::Serialize;
use utoipa::ToSchema;

use crate::validation::FieldErrors;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            meta,
        }
    }

    pub fn failure(message: impl Into<String>, data: Option<T>, errors: Option<FieldErrors>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
            errors,
            meta: Some(Meta::empty()),
        }
    }
}

/// Payload of actions that only report success.
#[derive(Debug, Serialize, ToSchema)]
pub struct Ack {
    pub action: String,
}

impl Ack {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}
