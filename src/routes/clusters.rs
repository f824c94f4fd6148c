use axum::{
    Form, Json, Router,
    extract::State,
    http::Method,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::{
    dto::clusters::{ClusterAction, ClusterPage, SubClusterAction},
    error::AppResult,
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::cluster_service,
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/cluster",
            get(cluster_loader).post(cluster_action).delete(cluster_action),
        )
        .route(
            "/sub-cluster",
            get(sub_cluster_loader)
                .post(sub_cluster_action)
                .put(sub_cluster_action)
                .delete(sub_cluster_action),
        )
}

#[utoipa::path(
    get,
    path = "/cluster",
    responses(
        (status = 200, description = "Clusters with their sub-clusters", body = ApiResponse<ClusterPage>),
        (status = 303, description = "No session, redirect to login")
    ),
    tag = "Cluster"
)]
pub async fn cluster_loader(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<ApiResponse<ClusterPage>>> {
    let cluster = cluster_service::list_clusters(&state).await?;
    let data = ClusterPage {
        user_id: user.user_id,
        cluster,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/cluster",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is insertCluster, insertSubCluster or deleteCluster (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Cluster"
)]
pub async fn cluster_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: ClusterAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        ClusterAction::InsertCluster { cluster_name } => {
            let cluster = cluster_service::create_cluster(&state, &user, cluster_name).await?;
            Json(ApiResponse::success("Cluster created", cluster, None)).into_response()
        }
        ClusterAction::InsertSubCluster(input) => {
            let sub = cluster_service::create_sub_cluster(&state, &user, input).await?;
            Json(ApiResponse::success("Sub cluster created", sub, None)).into_response()
        }
        ClusterAction::DeleteCluster { cluster_id } => {
            cluster_service::delete_cluster(&state, &user, cluster_id).await?;
            Json(ApiResponse::success("Cluster deleted", Ack::new("deleteCluster"), None))
                .into_response()
        }
    };
    Ok(response)
}

/// Sub-clusters are managed from the cluster page.
pub async fn sub_cluster_loader(_user: SessionUser) -> Redirect {
    Redirect::to("/cluster")
}

#[utoipa::path(
    post,
    path = "/sub-cluster",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createSubCluster (POST), updateSubCluster (PUT) or deleteSubCluster (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Cluster"
)]
pub async fn sub_cluster_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: SubClusterAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        SubClusterAction::Create(input) => {
            let sub = cluster_service::create_sub_cluster(&state, &user, input).await?;
            Json(ApiResponse::success("Sub cluster created", sub, None)).into_response()
        }
        SubClusterAction::Update { id, input } => {
            let sub = cluster_service::update_sub_cluster(&state, &user, id, input).await?;
            Json(ApiResponse::success("Sub cluster updated", sub, None)).into_response()
        }
        SubClusterAction::Delete { id } => {
            cluster_service::delete_sub_cluster(&state, &user, id).await?;
            Json(ApiResponse::success(
                "Sub cluster deleted",
                Ack::new("deleteSubCluster"),
                None,
            ))
            .into_response()
        }
    };
    Ok(response)
}
