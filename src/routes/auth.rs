use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    dto::auth::{
        CredentialsForm, CurrentUser, DashboardForm, LoginPage, LoginPageQuery, VerifyOutcome,
    },
    error::AppResult,
    models::User,
    response::{ApiResponse, Meta},
    services::{auth_service, employee_service::user_from_entity},
    session::{create_user_session, destroy_session, session_user_id},
    state::AppState,
    validation::{FormData, validate_action},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_action))
        .route("/logout", post(logout))
        .route("/verified/{token}", get(verify_email))
        .route("/dashboard", get(dashboard).post(dashboard_action))
}

/// Only same-site absolute paths are followed after login.
fn safe_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/dashboard",
    }
}

#[utoipa::path(
    get,
    path = "/login",
    params(("redirectTo" = Option<String>, Query, description = "Path to return to after login")),
    responses(
        (status = 200, description = "Login page settings", body = ApiResponse<LoginPage>),
        (status = 303, description = "Already signed in, redirect to /dashboard")
    ),
    tag = "Auth"
)]
pub async fn login_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<LoginPageQuery>,
) -> AppResult<Response> {
    if let Some(user_id) = session_user_id(&jar) {
        if auth_service::get_user(&state, user_id).await?.is_some() {
            return Ok(Redirect::to("/dashboard").into_response());
        }
    }

    let data = LoginPage {
        email_verification: state.config.email_verification,
        redirect_to: query.redirect_to,
    };
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))).into_response())
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`_action` is login or register; fields email, password, confirm_password, redirectTo"),
    responses(
        (status = 200, description = "Registered", body = ApiResponse<User>),
        (status = 303, description = "Signed in, redirect to the requested page"),
        (status = 400, description = "Invalid form data or credentials")
    ),
    tag = "Auth"
)]
pub async fn login_action(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<FormData>,
) -> AppResult<Response> {
    match validate_action::<CredentialsForm>(&form)? {
        CredentialsForm::Login { email, password } => {
            let user = auth_service::authenticate(&state, &email, &password).await?;
            let target = safe_redirect(form.get("redirectTo"));
            let secure = state.config.is_production();
            Ok(create_user_session(jar, user.id, secure, target).into_response())
        }
        CredentialsForm::Register(input) => {
            let user = auth_service::register_user(&state, input).await?;
            let body = ApiResponse::success(
                auth_service::REGISTERED,
                user_from_entity(user),
                Some(Meta::empty()),
            );
            Ok(Json(body).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Session removed, redirect to /login")),
    tag = "Auth"
)]
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    destroy_session(jar)
}

#[utoipa::path(
    get,
    path = "/verified/{token}",
    params(("token" = String, Path, description = "Token from the verification mail")),
    responses(
        (status = 200, description = "Unknown token", body = ApiResponse<String>),
        (status = 303, description = "Verified, redirect to /dashboard or /login")
    ),
    tag = "Auth"
)]
pub async fn verify_email(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(token): Path<String>,
) -> AppResult<Response> {
    match auth_service::verify_email(&state, &token).await? {
        VerifyOutcome::InvalidToken => {
            let body = ApiResponse::<String>::failure("Token Invalid", None, None);
            Ok(Json(body).into_response())
        }
        VerifyOutcome::Verified {
            has_employee: false,
            ..
        } => Ok(Redirect::to("/login").into_response()),
        VerifyOutcome::Verified { user_id, .. } => {
            let secure = state.config.is_production();
            Ok(create_user_session(jar, user_id, secure, "/dashboard").into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Signed-in user", body = ApiResponse<CurrentUser>),
        (status = 303, description = "No session, redirect to /login")
    ),
    tag = "Auth"
)]
pub async fn dashboard(State(state): State<AppState>, jar: SignedCookieJar) -> AppResult<Response> {
    let Some(user_id) = session_user_id(&jar) else {
        return Ok(Redirect::to("/login").into_response());
    };
    match auth_service::get_user(&state, user_id).await? {
        Some(user) => {
            Ok(Json(ApiResponse::success("Ok", user, Some(Meta::empty()))).into_response())
        }
        None => {
            tracing::info!(%user_id, "session user no longer exists");
            Ok(destroy_session(jar).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/dashboard",
    request_body(content = FormData, content_type = "application/x-www-form-urlencoded",
        description = "`_action` is logout"),
    responses(
        (status = 303, description = "Logged out, redirect to /login"),
        (status = 400, description = "Unknown action")
    ),
    tag = "Auth"
)]
pub async fn dashboard_action(
    jar: SignedCookieJar,
    Form(form): Form<FormData>,
) -> AppResult<(SignedCookieJar, Redirect)> {
    match validate_action::<DashboardForm>(&form)? {
        DashboardForm::Logout => Ok(destroy_session(jar)),
    }
}

#[cfg(test)]
mod tests {
    use super::safe_redirect;

    #[test]
    fn redirect_targets_stay_on_site() {
        assert_eq!(safe_redirect(Some("/cluster")), "/cluster");
        assert_eq!(safe_redirect(Some("//evil.example")), "/dashboard");
        assert_eq!(safe_redirect(Some("https://evil.example")), "/dashboard");
        assert_eq!(safe_redirect(Some("/\\evil.example")), "/dashboard");
        assert_eq!(safe_redirect(Some("/order\\1")), "/dashboard");
        assert_eq!(safe_redirect(None), "/dashboard");
    }
}
