use chrono::NaiveDate;
use retail_admin::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        clusters::SubClusterInput,
        employees::{DEFAULT_IMAGE, EmployeeInput},
        orders::{CreateOrderRequest, OrderLineRequest},
        products::ProductInput,
        stores::StoreInput,
        suppliers::SupplierInput,
    },
    entity::employees::Gender,
    error::{AppError, STILL_REFERENCED},
    middleware::auth::SessionUser,
    services::{
        auth_service::hash_password,
        cluster_service,
        employee_service::{self, EMPLOYEE_EXISTS},
        order_service, product_service, store_service, supplier_service,
    },
    state::AppState,
};
use uuid::Uuid;

fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run delete tests.");
            None
        }
    }
}

async fn setup(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(AppState::new(pool, AppConfig::for_database(database_url)))
}

async fn insert_user(state: &AppState) -> anyhow::Result<(Uuid, String)> {
    let id = Uuid::new_v4();
    let email = format!("{id}@delete.test");
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, is_verified, is_active) \
         VALUES ($1, $2, $3, TRUE, FALSE)",
    )
    .bind(id)
    .bind(&email)
    .bind(hash_password("secret1")?)
    .execute(&state.pool)
    .await?;
    Ok((id, email))
}

fn employee_input(user_id: Uuid) -> EmployeeInput {
    EmployeeInput {
        user_id,
        first_name: "Rina".into(),
        last_name: "Putri".into(),
        gender: Gender::F,
        address: String::new(),
        phone: String::new(),
        birth_day: None,
        join_date: NaiveDate::from_ymd_opt(2023, 1, 2),
        end_date: None,
        image: DEFAULT_IMAGE.into(),
        job_title: "Sales".into(),
        is_active: true,
    }
}

fn is_still_referenced(result: &Result<(), AppError>) -> bool {
    matches!(result, Err(AppError::BadRequest(m)) if m == STILL_REFERENCED)
}

#[tokio::test]
async fn deleting_referenced_records_is_a_bad_request() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let state = setup(&url).await?;
    let (user_id, email) = insert_user(&state).await?;
    let actor = SessionUser { user_id };
    let id = user_id.to_string();
    let tag = &id[..8];

    let cluster = cluster_service::create_cluster(&state, &actor, format!("Cluster {tag}")).await?;
    let sub = cluster_service::create_sub_cluster(
        &state,
        &actor,
        SubClusterInput {
            cluster_id: cluster.id,
            sub_cluster_name: format!("Sub {tag}"),
        },
    )
    .await?;
    let store = store_service::create_store(
        &state,
        &actor,
        StoreInput {
            sub_cluster_id: sub.id,
            store_name: format!("Store {tag}"),
            owner_name: "Owner".into(),
            address: String::new(),
            phone: String::new(),
        },
    )
    .await?;

    // Stores keep their sub-cluster, and with it the cluster.
    assert!(is_still_referenced(
        &cluster_service::delete_cluster(&state, &actor, cluster.id).await
    ));
    assert!(is_still_referenced(
        &cluster_service::delete_sub_cluster(&state, &actor, sub.id).await
    ));

    let supplier = supplier_service::create_supplier(
        &state,
        &actor,
        SupplierInput {
            supplier_name: format!("Supplier {tag}"),
            phone: String::new(),
            address: String::new(),
        },
    )
    .await?;
    let category =
        product_service::create_category(&state, &actor, format!("Category {tag}")).await?;
    let product = product_service::create_product(
        &state,
        &actor,
        ProductInput {
            category_id: category.id,
            supplier_id: supplier.id,
            product_name: format!("Product {tag}"),
            price: 1000,
            description: String::new(),
        },
    )
    .await?;

    assert!(is_still_referenced(
        &product_service::delete_category(&state, &actor, category.id).await
    ));
    assert!(is_still_referenced(
        &supplier_service::delete_supplier(&state, &actor, supplier.id).await
    ));

    let employee = employee_service::create_employee(&state, &actor, employee_input(user_id)).await?;
    let order = order_service::create_order(
        &state,
        &actor,
        CreateOrderRequest {
            store_id: store.id,
            employee_id: employee.id,
            order_date: None,
            items: vec![OrderLineRequest {
                product_id: product.id,
                quantity: 2,
            }],
        },
    )
    .await?;

    assert!(is_still_referenced(
        &product_service::delete_product(&state, &actor, product.id).await
    ));
    assert!(is_still_referenced(
        &store_service::delete_store(&state, &actor, store.id).await
    ));
    assert!(is_still_referenced(
        &employee_service::delete_employee_user(&state, &actor, &email).await
    ));

    // Once the order is gone everything can be removed again.
    order_service::delete_order(&state, &actor, order.order.id).await?;
    product_service::delete_product(&state, &actor, product.id).await?;
    store_service::delete_store(&state, &actor, store.id).await?;
    cluster_service::delete_cluster(&state, &actor, cluster.id).await?;
    assert!(matches!(
        cluster_service::delete_sub_cluster(&state, &actor, sub.id).await,
        Err(AppError::NotFound)
    ));
    employee_service::delete_employee_user(&state, &actor, &email).await?;

    Ok(())
}

#[tokio::test]
async fn concurrent_employee_creates_report_the_duplicate() -> anyhow::Result<()> {
    let Some(url) = database_url() else {
        return Ok(());
    };
    let state = setup(&url).await?;
    let (user_id, _) = insert_user(&state).await?;
    let actor = SessionUser { user_id };

    let (first, second) = tokio::join!(
        employee_service::create_employee(&state, &actor, employee_input(user_id)),
        employee_service::create_employee(&state, &actor, employee_input(user_id)),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(
        |r| matches!(r, Err(AppError::BadRequest(m)) if m == EMPLOYEE_EXISTS)
    ));
    Ok(())
}
