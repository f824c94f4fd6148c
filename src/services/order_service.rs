use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, OrderDetailPage, OrderUpdate, OrderWithDetails},
    entity::{
        employees::{Column as EmployeeCol, Entity as Employees},
        order_details::{
            ActiveModel as DetailActive, Column as DetailCol, Entity as OrderDetails, OrderStatus,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
        stores::{Column as StoreCol, Entity as Stores},
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::{Order, OrderDetail, OrderHeader},
    services::order_summary::OrderSummary,
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct OrderRow {
    id: Uuid,
    order_date: NaiveDate,
    store_id: Uuid,
    employee_id: Uuid,
    total: i64,
    created_at: DateTimeWithTimeZone,
    store_name: Option<String>,
    store_phone: Option<String>,
    store_address: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct DetailRow {
    product_id: i32,
    quantity: i32,
    status: OrderStatus,
    product_name: String,
    price: i64,
}

fn with_store_and_sales(finder: Select<Orders>) -> Select<Orders> {
    finder
        .left_join(Stores)
        .left_join(Employees)
        .column_as(StoreCol::StoreName, "store_name")
        .column_as(StoreCol::Phone, "store_phone")
        .column_as(StoreCol::Address, "store_address")
        .column_as(EmployeeCol::FirstName, "first_name")
        .column_as(EmployeeCol::LastName, "last_name")
}

/// Orders with store and sales names, newest first.
pub async fn list_orders(state: &AppState) -> AppResult<Vec<Order>> {
    let orders = with_store_and_sales(Orders::find())
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::CreatedAt)
        .into_model::<OrderRow>()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_row)
        .collect();
    Ok(orders)
}

/// Header, lines and totals of one order.
pub async fn get_order_detail(state: &AppState, order_id: Uuid) -> AppResult<OrderDetailPage> {
    let row = with_store_and_sales(Orders::find_by_id(order_id))
        .into_model::<OrderRow>()
        .one(&state.orm)
        .await?;
    let row = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let detail = fetch_details(&state.orm, order_id).await?;
    let summary = OrderSummary::from_lines(&detail);

    let sales = [row.first_name.as_deref(), row.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    let order = OrderHeader {
        order_id: row.id,
        order_date: row.order_date,
        sales,
        store_name: row.store_name.unwrap_or_default(),
        store_phone: row.store_phone.unwrap_or_default(),
        store_address: row.store_address.unwrap_or_default(),
        grand_total: summary.grand_total,
    };

    Ok(OrderDetailPage {
        order,
        detail,
        summary,
    })
}

/// Lines of an order joined with product name and unit price.
pub async fn fetch_details<C>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderDetail>>
where
    C: ConnectionTrait,
{
    let rows = OrderDetails::find()
        .inner_join(Products)
        .column_as(ProdCol::ProductName, "product_name")
        .column_as(ProdCol::Price, "price")
        .filter(DetailCol::OrderId.eq(order_id))
        .order_by_asc(DetailCol::ProductId)
        .into_model::<DetailRow>()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| OrderDetail {
            product_id: row.product_id,
            product_name: row.product_name,
            price: row.price,
            quantity: row.quantity,
            status: row.status,
            total: row.price.saturating_mul(i64::from(row.quantity)),
        })
        .collect())
}

/// Place an order; every line starts as `PENDING`.
pub async fn create_order(
    state: &AppState,
    actor: &SessionUser,
    payload: CreateOrderRequest,
) -> AppResult<OrderWithDetails> {
    payload.validate().map_err(AppError::Validation)?;

    let txn = state.orm.begin().await?;
    ensure_store_and_employee(&txn, payload.store_id, payload.employee_id).await?;

    let product_ids: Vec<i32> = payload.items.iter().map(|i| i.product_id).collect();
    let prices: HashMap<i32, i64> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.price))
        .collect();

    if let Some(missing) = payload.items.iter().find(|i| !prices.contains_key(&i.product_id)) {
        return Err(AppError::BadRequest(format!(
            "Product {} does not exist",
            missing.product_id
        )));
    }

    let order_id = Uuid::new_v4();
    OrderActive {
        id: Set(order_id),
        order_date: Set(payload.order_date.unwrap_or_else(|| Utc::now().date_naive())),
        store_id: Set(payload.store_id),
        employee_id: Set(payload.employee_id),
        total: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        DetailActive {
            order_id: Set(order_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            status: Set(OrderStatus::Pending),
        }
        .insert(&txn)
        .await?;
    }

    let detail = fetch_details(&txn, order_id).await?;
    let summary = store_total(&txn, order_id, &detail).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order_id, "total": summary.grand_total }),
    )
    .await;

    let order = load_order(state, order_id).await?;
    Ok(OrderWithDetails {
        order,
        detail,
        summary,
    })
}

pub async fn update_order(
    state: &AppState,
    actor: &SessionUser,
    order_id: Uuid,
    input: OrderUpdate,
) -> AppResult<Order> {
    let txn = state.orm.begin().await?;

    let existing = Orders::find_by_id(order_id).one(&txn).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    ensure_store_and_employee(&txn, input.store_id, input.employee_id).await?;

    let mut active: OrderActive = existing.into();
    active.order_date = Set(input.order_date);
    active.store_id = Set(input.store_id);
    active.employee_id = Set(input.employee_id);
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "order_update",
        "orders",
        serde_json::json!({ "order_id": order_id }),
    )
    .await;

    load_order(state, order_id).await
}

/// Set the status of one line. Any status may replace any other; the stored
/// order total is recomputed in the same transaction.
pub async fn update_line_status(
    state: &AppState,
    actor: &SessionUser,
    order_id: Uuid,
    product_id: i32,
    status: OrderStatus,
) -> AppResult<OrderSummary> {
    let txn = state.orm.begin().await?;

    let line = OrderDetails::find_by_id((order_id, product_id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let line = match line {
        Some(l) => l,
        None => return Err(AppError::NotFound),
    };
    let previous = line.status;

    let mut active: DetailActive = line.into();
    active.status = Set(status);
    active.update(&txn).await?;

    let detail = fetch_details(&txn, order_id).await?;
    let summary = store_total(&txn, order_id, &detail).await?;
    txn.commit().await?;

    tracing::info!(%order_id, product_id, from = %previous, to = %status, "order line status changed");
    audit::record(
        &state.pool,
        Some(actor.user_id),
        "order_status_update",
        "order_details",
        serde_json::json!({
            "order_id": order_id,
            "product_id": product_id,
            "from": previous.as_str(),
            "to": status.as_str(),
        }),
    )
    .await;

    Ok(summary)
}

/// Remove an order together with its lines.
pub async fn delete_order(state: &AppState, actor: &SessionUser, order_id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    OrderDetails::delete_many()
        .filter(DetailCol::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    let result = Orders::delete_by_id(order_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": order_id }),
    )
    .await;

    Ok(())
}

async fn store_total<C>(conn: &C, order_id: Uuid, detail: &[OrderDetail]) -> AppResult<OrderSummary>
where
    C: ConnectionTrait,
{
    let summary = OrderSummary::from_lines(detail);
    Orders::update_many()
        .col_expr(OrderCol::Total, summary.grand_total.into())
        .col_expr(OrderCol::UpdatedAt, DateTimeWithTimeZone::from(Utc::now()).into())
        .filter(OrderCol::Id.eq(order_id))
        .exec(conn)
        .await?;
    Ok(summary)
}

async fn ensure_store_and_employee<C>(conn: &C, store_id: Uuid, employee_id: Uuid) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if Stores::find_by_id(store_id).one(conn).await?.is_none() {
        return Err(AppError::BadRequest(format!("Store {store_id} does not exist")));
    }
    if Employees::find_by_id(employee_id).one(conn).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Employee {employee_id} does not exist"
        )));
    }
    Ok(())
}

async fn load_order(state: &AppState, order_id: Uuid) -> AppResult<Order> {
    with_store_and_sales(Orders::find_by_id(order_id))
        .into_model::<OrderRow>()
        .one(&state.orm)
        .await?
        .map(order_from_row)
        .ok_or(AppError::NotFound)
}

fn order_from_row(row: OrderRow) -> Order {
    Order {
        id: row.id,
        order_date: row.order_date,
        store_id: row.store_id,
        employee_id: row.employee_id,
        total: row.total,
        store_name: row.store_name,
        first_name: row.first_name,
        last_name: row.last_name,
        created_at: row.created_at.with_timezone(&Utc),
    }
}
