use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{CreateOrderRequest, OrderWithDetails},
        products::ProductList,
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    services::{auth_service, order_service, product_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/product", get(list_products))
        .route("/order", post(create_order))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Refresh token issued", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid email or password shape"),
        (status = 401, description = "Invalid credentials or account not usable yet")
    ),
    tag = "Api"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    payload.validate().map_err(AppError::Validation)?;

    let user = auth_service::authenticate(&state, &payload.email, &payload.password)
        .await
        .map_err(|err| match err {
            AppError::BadRequest(message) => AppError::Unauthorized(message),
            other => other,
        })?;

    let data = auth_service::issue_refresh_token(&state, user).await?;
    Ok(Json(ApiResponse::success("Login success", data, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/api/product",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search in name and description"),
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Api"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::search_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderWithDetails>),
        (status = 400, description = "Empty order, bad quantity or unknown reference"),
        (status = 303, description = "No session, redirect to login")
    ),
    tag = "Api"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: SessionUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithDetails>>)> {
    let data = order_service::create_order(&state, &user, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order created", data, Some(Meta::empty()))),
    ))
}
