use axum::http::Method;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{Store, SubCluster},
    validation::{ActionInput, FieldErrors, FormData},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInput {
    pub sub_cluster_id: i32,
    pub store_name: String,
    pub owner_name: String,
    pub address: String,
    pub phone: String,
}

impl StoreInput {
    fn parse(form: &FormData, errors: &mut FieldErrors) -> Self {
        Self {
            sub_cluster_id: form.parse("sub_cluster_id", "Sub Cluster Id is Required", errors),
            store_name: form.required("store_name", "Store Name is required", errors),
            owner_name: form.required("owner_name", "Owner Name is required", errors),
            address: form.text("address", errors),
            phone: form.text("phone", errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Create(StoreInput),
    Update { store_id: Uuid, input: StoreInput },
    Delete { store_id: Uuid },
}

impl StoreAction {
    pub fn method(&self) -> Method {
        match self {
            StoreAction::Create(_) => Method::POST,
            StoreAction::Update { .. } => Method::PUT,
            StoreAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for StoreAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createStore") => StoreAction::Create(StoreInput::parse(form, &mut errors)),
            Some("updateStore") => StoreAction::Update {
                store_id: form.parse("store_id", "Store Id is Required", &mut errors),
                input: StoreInput::parse(form, &mut errors),
            },
            Some("deleteStore") => StoreAction::Delete {
                store_id: form.parse("store_id", "Store Id is Required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Action Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StorePage {
    pub user_id: Uuid,
    pub store: Vec<Store>,
    pub cluster: Vec<SubCluster>,
}
