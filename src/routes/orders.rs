use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::Method,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderAction, OrderDetailAction, OrderDetailPage, OrderListPage},
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::order_service,
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/order",
            get(order_loader).put(order_action).delete(order_action),
        )
        .route(
            "/order/{order_id}",
            get(order_detail_loader)
                .put(order_detail_action)
                .delete(order_detail_action),
        )
}

#[utoipa::path(
    get,
    path = "/order",
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<OrderListPage>)
    ),
    tag = "Order"
)]
pub async fn order_loader(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<ApiResponse<OrderListPage>>> {
    let order = order_service::list_orders(&state).await?;
    let total = order.len() as i64;
    let data = OrderListPage {
        user_id: user.user_id,
        order,
    };
    Ok(Json(ApiResponse::success(
        "Ok",
        data,
        Some(Meta::new(1, total, total)),
    )))
}

#[utoipa::path(
    put,
    path = "/order",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is updateOrder (PUT) or deleteOrder (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Order"
)]
pub async fn order_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: OrderAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        OrderAction::Update { order_id, input } => {
            let order = order_service::update_order(&state, &user, order_id, input).await?;
            Json(ApiResponse::success("Order updated", order, None)).into_response()
        }
        OrderAction::Delete { order_id } => {
            order_service::delete_order(&state, &user, order_id).await?;
            Json(ApiResponse::success("Order deleted", Ack::new("deleteOrder"), None))
                .into_response()
        }
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/order/{order_id}",
    params(("order_id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order header, lines and totals", body = ApiResponse<OrderDetailPage>),
        (status = 404, description = "Order not found")
    ),
    tag = "Order"
)]
pub async fn order_detail_loader(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetailPage>>> {
    let data = order_service::get_order_detail(&state, order_id).await?;
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

/// Line status changes answer with the new totals; deleting the order sends
/// the browser back to the order list.
#[utoipa::path(
    put,
    path = "/order/{order_id}",
    params(("order_id" = Uuid, Path, description = "Order id")),
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is updateStatus (PUT) or deleteOrder (DELETE)"),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<crate::services::order_summary::OrderSummary>),
        (status = 303, description = "Order deleted, redirect to /order"),
        (status = 400, description = "Invalid form data or order id mismatch"),
        (status = 404, description = "Order line not found")
    ),
    tag = "Order"
)]
pub async fn order_detail_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Path(path_order_id): Path<Uuid>,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: OrderDetailAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;
    if action.order_id() != path_order_id {
        return Err(AppError::BadRequest("Order id does not match the page".into()));
    }

    let response = match action {
        OrderDetailAction::UpdateStatus {
            order_id,
            product_id,
            status,
        } => {
            let summary =
                order_service::update_line_status(&state, &user, order_id, product_id, status)
                    .await?;
            Json(ApiResponse::success("Status updated", summary, None)).into_response()
        }
        OrderDetailAction::DeleteOrder { order_id } => {
            order_service::delete_order(&state, &user, order_id).await?;
            Redirect::to("/order").into_response()
        }
    };
    Ok(response)
}
