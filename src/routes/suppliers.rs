use axum::{
    Form, Json, Router,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::suppliers::{SupplierAction, SupplierPage},
    error::AppResult,
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::supplier_service,
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/supplier",
        get(supplier_loader)
            .post(supplier_action)
            .put(supplier_action)
            .delete(supplier_action),
    )
}

#[utoipa::path(
    get,
    path = "/supplier",
    responses(
        (status = 200, description = "Suppliers, newest first", body = ApiResponse<SupplierPage>)
    ),
    tag = "Supplier"
)]
pub async fn supplier_loader(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<ApiResponse<SupplierPage>>> {
    let supplier = supplier_service::list_suppliers(&state).await?;
    let data = SupplierPage {
        user_id: user.user_id,
        supplier,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/supplier",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createSupplier (POST), updateSupplier (PUT) or deleteSupplier (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Supplier"
)]
pub async fn supplier_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: SupplierAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        SupplierAction::Create(input) => {
            let supplier = supplier_service::create_supplier(&state, &user, input).await?;
            Json(ApiResponse::success("Supplier created", supplier, None)).into_response()
        }
        SupplierAction::Update { supplier_id, input } => {
            let supplier =
                supplier_service::update_supplier(&state, &user, supplier_id, input).await?;
            Json(ApiResponse::success("Supplier updated", supplier, None)).into_response()
        }
        SupplierAction::Delete { supplier_id } => {
            supplier_service::delete_supplier(&state, &user, supplier_id).await?;
            Json(ApiResponse::success(
                "Supplier deleted",
                Ack::new("deleteSupplier"),
                None,
            ))
            .into_response()
        }
    };
    Ok(response)
}
