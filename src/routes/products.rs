use axum::{
    Form, Json, Router,
    extract::State,
    http::Method,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::products::{CategoryAction, ProductAction, ProductPage},
    error::AppResult,
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::{product_service, supplier_service},
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/product",
            get(product_loader)
                .post(product_action)
                .put(product_action)
                .delete(product_action),
        )
        .route(
            "/category",
            get(category_loader)
                .post(category_action)
                .put(category_action)
                .delete(category_action),
        )
}

#[utoipa::path(
    get,
    path = "/product",
    responses(
        (status = 200, description = "Products with the categories and suppliers to pick from", body = ApiResponse<ProductPage>)
    ),
    tag = "Product"
)]
pub async fn product_loader(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let product = product_service::list_products(&state).await?;
    let category = product_service::list_categories(&state).await?;
    let supplier = supplier_service::list_suppliers(&state).await?;
    let data = ProductPage {
        user_id: user.user_id,
        product,
        category,
        supplier,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/product",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createProduct (POST), updateProduct (PUT) or deleteProduct (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data or unknown category/supplier"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Product"
)]
pub async fn product_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: ProductAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        ProductAction::Create(input) => {
            let product = product_service::create_product(&state, &user, input).await?;
            Json(ApiResponse::success("Product created", product, None)).into_response()
        }
        ProductAction::Update { product_id, input } => {
            let product =
                product_service::update_product(&state, &user, product_id, input).await?;
            Json(ApiResponse::success("Product updated", product, None)).into_response()
        }
        ProductAction::Delete { product_id } => {
            product_service::delete_product(&state, &user, product_id).await?;
            Json(ApiResponse::success("Product deleted", Ack::new("deleteProduct"), None))
                .into_response()
        }
    };
    Ok(response)
}

/// Categories are listed on the product page.
pub async fn category_loader(_user: SessionUser) -> Redirect {
    Redirect::to("/product")
}

#[utoipa::path(
    post,
    path = "/category",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createCategory (POST), updateCategory (PUT) or deleteCategory (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Product"
)]
pub async fn category_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: CategoryAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        CategoryAction::Create { category_name } => {
            let category = product_service::create_category(&state, &user, category_name).await?;
            Json(ApiResponse::success("Category created", category, None)).into_response()
        }
        CategoryAction::Update {
            category_id,
            category_name,
        } => {
            let category =
                product_service::update_category(&state, &user, category_id, category_name)
                    .await?;
            Json(ApiResponse::success("Category updated", category, None)).into_response()
        }
        CategoryAction::Delete { category_id } => {
            product_service::delete_category(&state, &user, category_id).await?;
            Json(ApiResponse::success(
                "Category deleted",
                Ack::new("deleteCategory"),
                None,
            ))
            .into_response()
        }
    };
    Ok(response)
}
