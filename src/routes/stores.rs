use axum::{
    Form, Json, Router,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::stores::{StoreAction, StorePage},
    error::AppResult,
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::{cluster_service, store_service},
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/store",
        get(store_loader)
            .post(store_action)
            .put(store_action)
            .delete(store_action),
    )
}

#[utoipa::path(
    get,
    path = "/store",
    responses(
        (status = 200, description = "Stores and the sub-clusters they can belong to", body = ApiResponse<StorePage>),
        (status = 303, description = "No session, redirect to login")
    ),
    tag = "Store"
)]
pub async fn store_loader(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<ApiResponse<StorePage>>> {
    let store = store_service::list_stores(&state).await?;
    let cluster = cluster_service::list_sub_clusters(&state).await?;
    let data = StorePage {
        user_id: user.user_id,
        store,
        cluster,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/store",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createStore (POST), updateStore (PUT) or deleteStore (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Store"
)]
pub async fn store_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: StoreAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        StoreAction::Create(input) => {
            let store = store_service::create_store(&state, &user, input).await?;
            Json(ApiResponse::success("Store created", store, None)).into_response()
        }
        StoreAction::Update { store_id, input } => {
            let store = store_service::update_store(&state, &user, store_id, input).await?;
            Json(ApiResponse::success("Store updated", store, None)).into_response()
        }
        StoreAction::Delete { store_id } => {
            store_service::delete_store(&state, &user, store_id).await?;
            Json(ApiResponse::success("Store deleted", Ack::new("deleteStore"), None))
                .into_response()
        }
    };
    Ok(response)
}
