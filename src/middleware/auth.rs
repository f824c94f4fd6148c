use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use uuid::Uuid;

use crate::{
    services::auth_service,
    session::{destroy_session, login_redirect, session_user_id},
    state::AppState,
};

/// Signed-in user taken from the session cookie.
///
/// Requests without a valid session are redirected to the login page, which
/// sends the user back to the requested path afterwards. A session whose
/// account no longer exists is removed and redirected to `/login`.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        let Some(user_id) = session_user_id(&jar) else {
            tracing::debug!(path = %parts.uri.path(), "no session, redirecting to login");
            return Err(Redirect::to(&login_redirect(parts.uri.path())).into_response());
        };

        match auth_service::get_user(state, user_id).await {
            Ok(Some(_)) => Ok(SessionUser { user_id }),
            Ok(None) => {
                tracing::info!(%user_id, "session user no longer exists");
                Err(destroy_session(jar).into_response())
            }
            Err(err) => Err(err.into_response()),
        }
    }
}
