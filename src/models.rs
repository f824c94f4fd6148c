use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{employees::Gender, order_details::OrderStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cluster {
    pub id: i32,
    pub cluster_name: String,
    pub sub_clusters: Vec<SubCluster>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubCluster {
    pub id: i32,
    pub cluster_id: i32,
    pub sub_cluster_name: String,
    pub cluster_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub sub_cluster_id: i32,
    pub sub_cluster_name: Option<String>,
    pub store_name: String,
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Supplier {
    pub id: i32,
    pub supplier_name: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub supplier_id: i32,
    pub product_name: String,
    pub price: i64,
    pub description: String,
    pub category_name: Option<String>,
    pub supplier_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_active: Option<bool>,
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
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_date: NaiveDate,
    pub store_id: Uuid,
    pub employee_id: Uuid,
    pub total: i64,
    pub store_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Header of the order detail page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderHeader {
    pub order_id: Uuid,
    pub order_date: NaiveDate,
    pub sales: String,
    pub store_name: String,
    pub store_phone: String,
    pub store_address: String,
    pub grand_total: i64,
}

/// One line of an order joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    pub product_id: i32,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
    pub status: OrderStatus,
    pub total: i64,
}
