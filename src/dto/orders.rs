use axum::http::Method;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::order_details::OrderStatus,
    models::{Order, OrderDetail, OrderHeader},
    services::order_summary::OrderSummary,
    validation::{ActionInput, FieldErrors, FormData},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub store_id: Uuid,
    pub employee_id: Uuid,
    pub order_date: Option<NaiveDate>,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub product_id: i32,
    pub quantity: i32,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.items.is_empty() {
            errors.add("items", "Order needs at least one item");
        }
        if self.items.iter().any(|item| item.quantity <= 0) {
            errors.add("items", "Quantity must be greater than 0");
        }
        let mut seen = std::collections::HashSet::new();
        if !self.items.iter().all(|item| seen.insert(item.product_id)) {
            errors.add("items", "Each product may appear only once");
        }
        errors.check()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    pub order_date: NaiveDate,
    pub store_id: Uuid,
    pub employee_id: Uuid,
}

/// Actions of the order list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Update { order_id: Uuid, input: OrderUpdate },
    Delete { order_id: Uuid },
}

impl OrderAction {
    pub fn method(&self) -> Method {
        match self {
            OrderAction::Update { .. } => Method::PUT,
            OrderAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for OrderAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("updateOrder") => OrderAction::Update {
                order_id: form.parse("order_id", "Order Id is Required", &mut errors),
                input: OrderUpdate {
                    order_date: form.date("order_date", "Order Date is Required", &mut errors),
                    store_id: form.parse("store_id", "Store Id is Required", &mut errors),
                    employee_id: form.parse("employee_id", "Employe Id is required", &mut errors),
                },
            },
            Some("deleteOrder") => OrderAction::Delete {
                order_id: form.parse("order_id", "Order Id is Required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

/// Actions of the order detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDetailAction {
    UpdateStatus {
        order_id: Uuid,
        product_id: i32,
        status: OrderStatus,
    },
    DeleteOrder {
        order_id: Uuid,
    },
}

impl OrderDetailAction {
    pub fn method(&self) -> Method {
        match self {
            OrderDetailAction::UpdateStatus { .. } => Method::PUT,
            OrderDetailAction::DeleteOrder { .. } => Method::DELETE,
        }
    }

    pub fn order_id(&self) -> Uuid {
        match self {
            OrderDetailAction::UpdateStatus { order_id, .. }
            | OrderDetailAction::DeleteOrder { order_id } => *order_id,
        }
    }
}

impl ActionInput for OrderDetailAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("updateStatus") => {
                let order_id = form.parse("order_id", "Required", &mut errors);
                let product_id = form.parse("product_id", "Required", &mut errors);
                let status = match form.get("status").map(str::parse::<OrderStatus>) {
                    Some(Ok(status)) => status,
                    Some(Err(message)) => {
                        errors.add("status", message);
                        OrderStatus::default()
                    }
                    None => {
                        errors.add("status", "Required");
                        OrderStatus::default()
                    }
                };
                OrderDetailAction::UpdateStatus {
                    order_id,
                    product_id,
                    status,
                }
            }
            Some("deleteOrder") => OrderDetailAction::DeleteOrder {
                order_id: form.parse("order_id", "Required", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListPage {
    pub user_id: Uuid,
    pub order: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailPage {
    pub order: OrderHeader,
    pub detail: Vec<OrderDetail>,
    pub summary: OrderSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithDetails {
    pub order: Order,
    pub detail: Vec<OrderDetail>,
    pub summary: OrderSummary,
}
