use axum::http::Method;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::Supplier,
    validation::{ActionInput, FieldErrors, FormData},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierInput {
    pub supplier_name: String,
    pub phone: String,
    pub address: String,
}

impl SupplierInput {
    fn parse(form: &FormData, errors: &mut FieldErrors) -> Self {
        Self {
            supplier_name: form.required("supplier_name", "Supplier Name is Required", errors),
            phone: form.text("phone", errors),
            address: form.text("address", errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierAction {
    Create(SupplierInput),
    Update { supplier_id: i32, input: SupplierInput },
    Delete { supplier_id: i32 },
}

impl SupplierAction {
    pub fn method(&self) -> Method {
        match self {
            SupplierAction::Create(_) => Method::POST,
            SupplierAction::Update { .. } => Method::PUT,
            SupplierAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for SupplierAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createSupplier") => SupplierAction::Create(SupplierInput::parse(form, &mut errors)),
            Some("updateSupplier") => SupplierAction::Update {
                supplier_id: form.parse("supplier_id", "Supplier Id is Required", &mut errors),
                input: SupplierInput::parse(form, &mut errors),
            },
            Some("deleteSupplier") => SupplierAction::Delete {
                supplier_id: form.parse("supplier_id", "Supplier Id is Required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierPage {
    pub user_id: Uuid,
    pub supplier: Vec<Supplier>,
}
