use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use retail_admin::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    routes,
    services::auth_service::hash_password,
    session::{SESSION_COOKIE, session_cookie},
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run session tests.");
            None
        }
    }
}

async fn setup(database_url: &str) -> anyhow::Result<(Router, AppState)> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    let state = AppState::new(pool, AppConfig::for_database(database_url));
    Ok((routes::app(state.clone()), state))
}

/// Insert a verified, active account with a unique email.
async fn insert_user(state: &AppState) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, is_verified, is_active) \
         VALUES ($1, $2, $3, TRUE, TRUE)",
    )
    .bind(id)
    .bind(format!("{id}@session.test"))
    .bind(hash_password("secret1")?)
    .execute(&state.pool)
    .await?;
    Ok(id)
}

fn signed_session(state: &AppState, user_id: Uuid) -> String {
    let jar = SignedCookieJar::new(state.cookie_key.clone()).add(session_cookie(user_id, false));
    let response = (jar, ()).into_response();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header");
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

fn form(method: &str, uri: &str, cookie: &str, body: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))?)
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

fn clears_session(response: &Response) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
}

async fn json_body(response: Response) -> anyhow::Result<serde_json::Value> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[tokio::test]
async fn signed_session_reaches_the_page() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let (app, state) = setup(&url).await?;
    let cookie = signed_session(&state, insert_user(&state).await?);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sub-cluster")
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    // The sub-cluster loader only forwards to the cluster page.
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/cluster"));
    Ok(())
}

#[tokio::test]
async fn session_of_unknown_user_is_dropped() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let (app, state) = setup(&url).await?;
    let cookie = signed_session(&state, Uuid::new_v4());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cluster")
                .header(header::COOKIE, cookie)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(clears_session(&response), "expected the session cookie to be removed");
    Ok(())
}

#[tokio::test]
async fn deleted_account_loses_access() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let (app, state) = setup(&url).await?;
    let user_id = insert_user(&state).await?;
    let cookie = signed_session(&state, user_id);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&state.pool)
        .await?;

    let response = app
        .oneshot(form("POST", "/cluster", &cookie, "action=insertCluster&cluster_name=Ghost")?)
        .await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(clears_session(&response));

    let (ghosts,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM clusters WHERE cluster_name = 'Ghost'")
            .fetch_one(&state.pool)
            .await?;
    assert_eq!(ghosts, 0);
    Ok(())
}

#[tokio::test]
async fn action_sent_with_the_wrong_method_is_refused() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let (app, state) = setup(&url).await?;
    let cookie = signed_session(&state, insert_user(&state).await?);
    let body = format!(
        "action=updateStore&store_id={}&sub_cluster_id=1&store_name=A&owner_name=B&address=&phone=",
        Uuid::new_v4()
    );

    let response = app.oneshot(form("POST", "/store", &cookie, &body)?).await?;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = json_body(response).await?;
    assert_eq!(json["message"], "Method Not Allowed");
    Ok(())
}

#[tokio::test]
async fn unknown_page_action_is_a_validation_error() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let (app, state) = setup(&url).await?;
    let cookie = signed_session(&state, insert_user(&state).await?);

    let response = app
        .oneshot(form("POST", "/employee", &cookie, "action=promote")?)
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await?;
    assert_eq!(json["errors"]["action"], "Action Not Allowed");
    Ok(())
}
