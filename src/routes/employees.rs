use axum::{
    Form, Json, Router,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    dto::employees::{EmployeeAction, EmployeePage},
    error::AppResult,
    middleware::auth::SessionUser,
    response::{Ack, ApiResponse, Meta},
    services::employee_service,
    state::AppState,
    validation::{FormData, ensure_method, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/employee",
        get(employee_loader)
            .post(employee_action)
            .put(employee_action)
            .delete(employee_action),
    )
}

#[utoipa::path(
    get,
    path = "/employee",
    responses(
        (status = 200, description = "Employees and the users without an employee record", body = ApiResponse<EmployeePage>)
    ),
    tag = "Employee"
)]
pub async fn employee_loader(
    State(state): State<AppState>,
    _user: SessionUser,
) -> AppResult<Json<ApiResponse<EmployeePage>>> {
    let users = employee_service::list_candidate_users(&state).await?;
    let employee = employee_service::list_employees(&state).await?;
    let data = EmployeePage { users, employee };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/employee",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`action` is createEmploye (POST), updateEmploye (PUT) or deleteEmploye (DELETE)"),
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<Ack>),
        (status = 400, description = "Invalid form data"),
        (status = 405, description = "Action does not match the method")
    ),
    tag = "Employee"
)]
pub async fn employee_action(
    State(state): State<AppState>,
    user: SessionUser,
    method: Method,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    let action: EmployeeAction = validate_action(&form)?;
    ensure_method(&method, action.method())?;

    let response = match action {
        EmployeeAction::Create(input) => {
            let employee = employee_service::create_employee(&state, &user, input).await?;
            Json(ApiResponse::success("Employee created", employee, None)).into_response()
        }
        EmployeeAction::Update(input) => {
            let employee = employee_service::update_employee(&state, &user, input).await?;
            Json(ApiResponse::success("Employee updated", employee, None)).into_response()
        }
        EmployeeAction::Delete { email } => {
            employee_service::delete_employee_user(&state, &user, &email).await?;
            Json(ApiResponse::success("User deleted", Ack::new("deleteEmploye"), None))
                .into_response()
        }
    };
    Ok(response)
}
