use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "admin-session";
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

pub fn session_cookie(user_id: Uuid, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Store the user id in the signed session cookie and redirect.
pub fn create_user_session(
    jar: SignedCookieJar,
    user_id: Uuid,
    secure: bool,
    redirect_to: &str,
) -> (SignedCookieJar, Redirect) {
    tracing::info!(%user_id, "session created");
    (jar.add(session_cookie(user_id, secure)), Redirect::to(redirect_to))
}

pub fn destroy_session(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/"));
    (jar, Redirect::to("/login"))
}

/// User id held by the session. Tampered or malformed cookies read as no session.
pub fn session_user_id(jar: &SignedCookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

pub fn login_redirect(redirect_to: &str) -> String {
    format!("/login?redirectTo={}", urlencoding::encode(redirect_to))
}
