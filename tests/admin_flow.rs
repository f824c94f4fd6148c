use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use retail_admin::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    dto::{
        auth::{Claims, RegisterInput, VerifyOutcome},
        clusters::SubClusterInput,
        employees::{DEFAULT_IMAGE, EmployeeInput},
        orders::{CreateOrderRequest, OrderLineRequest, OrderUpdate},
        products::ProductInput,
        stores::StoreInput,
        suppliers::SupplierInput,
    },
    entity::{AuditLogs, audit_logs, employees::Gender, order_details::OrderStatus},
    error::{AppError, AppResult},
    mailer::{Email, Mailer},
    middleware::auth::SessionUser,
    routes::params::ProductQuery,
    services::{
        auth_service, cluster_service, employee_service, order_service, product_service,
        store_service, supplier_service,
    },
    state::AppState,
};

#[derive(Default)]
struct CapturingMailer {
    sent: Mutex<Vec<Email>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, email: Email) -> AppResult<()> {
        self.sent.lock().expect("mailer lock").push(email);
        Ok(())
    }
}

// Integration flow: register -> verify -> employee -> master data -> order -> status changes -> delete.
#[tokio::test]
async fn register_catalog_and_order_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let mailer = Arc::new(CapturingMailer::default());
    let state = setup_state(&database_url, mailer.clone()).await?;

    // Register and verify
    let user = auth_service::register_user(
        &state,
        RegisterInput {
            email: "sales@store.co".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        },
    )
    .await?;
    assert!(!user.is_verified);
    {
        let sent = mailer.sent.lock().expect("mailer lock");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "sales@store.co");
        assert!(sent[0].html.contains("/verified/"));
    }

    let duplicate = auth_service::register_user(
        &state,
        RegisterInput {
            email: "sales@store.co".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::BadRequest(ref m)) if m == "Email already exist"));

    let blocked = auth_service::authenticate(&state, "sales@store.co", "secret1").await;
    assert!(
        matches!(blocked, Err(AppError::BadRequest(ref m)) if m == auth_service::NOT_VERIFIED)
    );

    let (token,): (String,) = sqlx::query_as("SELECT token FROM verified_emails WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(
        auth_service::verify_email(&state, "not-a-token").await?,
        VerifyOutcome::InvalidToken
    );
    assert_eq!(
        auth_service::verify_email(&state, &token).await?,
        VerifyOutcome::Verified {
            user_id: user.id,
            has_employee: false
        }
    );

    let inactive = auth_service::authenticate(&state, "sales@store.co", "secret1").await;
    assert!(matches!(inactive, Err(AppError::BadRequest(ref m)) if m == auth_service::NOT_ACTIVE));

    // Employee activates the account
    let actor = SessionUser { user_id: user.id };
    assert_eq!(employee_service::list_candidate_users(&state).await?.len(), 1);
    let employee = employee_service::create_employee(
        &state,
        &actor,
        EmployeeInput {
            user_id: user.id,
            first_name: "Sari".into(),
            last_name: "Dewi".into(),
            gender: Gender::F,
            address: String::new(),
            phone: String::new(),
            birth_day: None,
            join_date: NaiveDate::from_ymd_opt(2022, 9, 1),
            end_date: None,
            image: DEFAULT_IMAGE.into(),
            job_title: "Sales".into(),
            is_active: true,
        },
    )
    .await?;
    assert_eq!(employee.is_active, Some(true));
    assert!(employee_service::list_candidate_users(&state).await?.is_empty());

    let authed = auth_service::authenticate(&state, "sales@store.co", "secret1").await?;
    let login = auth_service::issue_refresh_token(&state, authed).await?;
    assert_eq!(login.user_id, user.id);
    assert!(!login.refresh_token.is_empty());

    let claims = jsonwebtoken::decode::<Claims>(
        &login.refresh_token,
        &DecodingKey::from_secret(state.config.jwt_refresh_secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;
    assert_eq!(claims.sub, user.id.to_string());
    let days_left = (claims.exp as i64 - Utc::now().timestamp()) / 86_400;
    assert!((29..=30).contains(&days_left));

    let current = auth_service::get_user(&state, user.id)
        .await?
        .expect("current user");
    assert_eq!(current.employee.map(|e| e.first_name), Some("Sari".into()));

    let wrong = auth_service::authenticate(&state, "sales@store.co", "wrong-pass").await;
    assert!(
        matches!(wrong, Err(AppError::BadRequest(ref m)) if m == auth_service::INVALID_CREDENTIALS)
    );

    // Master data
    let cluster = cluster_service::create_cluster(&state, &actor, "North".into()).await?;
    let sub = cluster_service::create_sub_cluster(
        &state,
        &actor,
        SubClusterInput {
            cluster_id: cluster.id,
            sub_cluster_name: "North Central".into(),
        },
    )
    .await?;
    let missing_cluster = cluster_service::create_sub_cluster(
        &state,
        &actor,
        SubClusterInput {
            cluster_id: cluster.id + 1000,
            sub_cluster_name: "Nowhere".into(),
        },
    )
    .await;
    assert!(matches!(missing_cluster, Err(AppError::BadRequest(_))));

    let clusters = cluster_service::list_clusters(&state).await?;
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].sub_clusters.len(), 1);

    let store = store_service::create_store(
        &state,
        &actor,
        StoreInput {
            sub_cluster_id: sub.id,
            store_name: "Corner Mart".into(),
            owner_name: "Budi".into(),
            address: "Jl. Merdeka 1".into(),
            phone: "0812".into(),
        },
    )
    .await?;
    let stores = store_service::list_stores(&state).await?;
    assert_eq!(stores[0].sub_cluster_name.as_deref(), Some("North Central"));

    let supplier = supplier_service::create_supplier(
        &state,
        &actor,
        SupplierInput {
            supplier_name: "Sumber Rejeki".into(),
            phone: String::new(),
            address: String::new(),
        },
    )
    .await?;
    let category = product_service::create_category(&state, &actor, "Beverages".into()).await?;

    let tea = product_service::create_product(
        &state,
        &actor,
        ProductInput {
            category_id: category.id,
            supplier_id: supplier.id,
            product_name: "Iced Tea".into(),
            price: 1500,
            description: "Sweet jasmine tea".into(),
        },
    )
    .await?;
    let water = product_service::create_product(
        &state,
        &actor,
        ProductInput {
            category_id: category.id,
            supplier_id: supplier.id,
            product_name: "Mineral Water".into(),
            price: 200,
            description: "Bottled".into(),
        },
    )
    .await?;

    let found = product_service::search_products(
        &state,
        ProductQuery {
            q: Some("jasmine".into()),
            ..Default::default()
        },
    )
    .await?;
    let items = found.data.expect("product data").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].supplier_name.as_deref(), Some("Sumber Rejeki"));

    // Order
    let created = order_service::create_order(
        &state,
        &actor,
        CreateOrderRequest {
            store_id: store.id,
            employee_id: employee.id,
            order_date: NaiveDate::from_ymd_opt(2022, 10, 1),
            items: vec![
                OrderLineRequest {
                    product_id: tea.id,
                    quantity: 2,
                },
                OrderLineRequest {
                    product_id: water.id,
                    quantity: 3,
                },
            ],
        },
    )
    .await?;
    let order_id = created.order.id;
    assert_eq!(created.summary.grand_total, 2 * 1500 + 3 * 200);
    assert_eq!(created.order.total, 3600);
    assert!(created.detail.iter().all(|d| d.status == OrderStatus::Pending));

    let unknown_product = order_service::create_order(
        &state,
        &actor,
        CreateOrderRequest {
            store_id: store.id,
            employee_id: employee.id,
            order_date: None,
            items: vec![OrderLineRequest {
                product_id: water.id + 1000,
                quantity: 1,
            }],
        },
    )
    .await;
    assert!(matches!(unknown_product, Err(AppError::BadRequest(_))));

    // Cancelling a line drops it from the totals
    let summary =
        order_service::update_line_status(&state, &actor, order_id, tea.id, OrderStatus::Cancel)
            .await?;
    assert_eq!(summary.grand_total, 600);
    assert_eq!(summary.item_count, 1);

    let page = order_service::get_order_detail(&state, order_id).await?;
    assert_eq!(page.order.sales, "Sari Dewi");
    assert_eq!(page.order.store_name, "Corner Mart");
    assert_eq!(page.order.grand_total, 600);
    assert_eq!(page.detail.len(), 2);
    let tea_line = page
        .detail
        .iter()
        .find(|d| d.product_id == tea.id)
        .expect("tea line");
    assert_eq!(tea_line.total, 3000);
    assert_eq!(tea_line.status, OrderStatus::Cancel);

    let orders = order_service::list_orders(&state).await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, 600);
    assert_eq!(orders[0].first_name.as_deref(), Some("Sari"));

    // Any status may follow any other
    let summary =
        order_service::update_line_status(&state, &actor, order_id, tea.id, OrderStatus::Confirm)
            .await?;
    assert_eq!(summary.grand_total, 3600);

    let missing_line = order_service::update_line_status(
        &state,
        &actor,
        order_id,
        water.id + 1000,
        OrderStatus::Confirm,
    )
    .await;
    assert!(matches!(missing_line, Err(AppError::NotFound)));

    let moved = order_service::update_order(
        &state,
        &actor,
        order_id,
        OrderUpdate {
            order_date: NaiveDate::from_ymd_opt(2022, 10, 2).expect("date"),
            store_id: store.id,
            employee_id: employee.id,
        },
    )
    .await?;
    assert_eq!(moved.order_date, NaiveDate::from_ymd_opt(2022, 10, 2).expect("date"));

    order_service::delete_order(&state, &actor, order_id).await?;
    assert!(order_service::list_orders(&state).await?.is_empty());
    assert!(matches!(
        order_service::delete_order(&state, &actor, order_id).await,
        Err(AppError::NotFound)
    ));

    let audits = AuditLogs::find()
        .filter(audit_logs::Column::Action.eq("order_status_update"))
        .filter(audit_logs::Column::UserId.eq(user.id))
        .count(&state.orm)
        .await?;
    assert_eq!(audits, 2);

    // Removing the account takes the employee with it
    employee_service::delete_employee_user(&state, &actor, "sales@store.co").await?;
    assert!(employee_service::list_employees(&state).await?.is_empty());
    assert!(auth_service::get_user(&state, user.id).await?.is_none());

    Ok(())
}

async fn setup_state(database_url: &str, mailer: Arc<CapturingMailer>) -> anyhow::Result<AppState> {
    let pool: DbPool = create_pool(database_url).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE audit_logs, order_details, orders, products, categories, suppliers, \
         stores, sub_clusters, clusters, employees, verified_emails, users RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await?;

    let mut config = AppConfig::for_database(database_url);
    config.email_verification = true;
    Ok(AppState::with_mailer(pool, config, mailer))
}
