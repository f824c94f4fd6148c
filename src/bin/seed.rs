use retail_admin::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};
use uuid::Uuid;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(ADMIN_EMAIL)
        .fetch_optional(&pool)
        .await?;
    if let Some((id,)) = existing {
        println!("Already seeded. Admin ID: {id}");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    let (admin_id, employee_id) = seed_admin(&mut tx).await?;
    let store_id = seed_store(&mut tx).await?;
    seed_catalog(&mut tx).await?;
    tx.commit().await?;

    println!(
        "Seed completed. Admin ID: {admin_id}, Employee ID: {employee_id}, Store ID: {store_id}"
    );
    Ok(())
}

type Tx = sqlx::Transaction<'static, sqlx::Postgres>;

/// Verified, active admin with an employee record so the dashboard works.
async fn seed_admin(tx: &mut Tx) -> anyhow::Result<(Uuid, Uuid)> {
    let password_hash = hash_password(ADMIN_PASSWORD)?;
    let admin_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, is_verified, is_active)
        VALUES ($1, $2, $3, TRUE, TRUE)
        "#,
    )
    .bind(admin_id)
    .bind(ADMIN_EMAIL)
    .bind(password_hash)
    .execute(&mut **tx)
    .await?;

    let employee_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO employees (id, user_id, first_name, last_name, gender, job_title, join_date)
        VALUES ($1, $2, 'Admin', 'Retail', 'M', 'Administrator', CURRENT_DATE)
        "#,
    )
    .bind(employee_id)
    .bind(admin_id)
    .execute(&mut **tx)
    .await?;

    println!("Ensured admin {ADMIN_EMAIL}");
    Ok((admin_id, employee_id))
}

async fn seed_store(tx: &mut Tx) -> anyhow::Result<Uuid> {
    let (cluster_id,): (i32,) =
        sqlx::query_as("INSERT INTO clusters (cluster_name) VALUES ($1) RETURNING id")
            .bind("North")
            .fetch_one(&mut **tx)
            .await?;
    let (sub_cluster_id,): (i32,) = sqlx::query_as(
        "INSERT INTO sub_clusters (cluster_id, sub_cluster_name) VALUES ($1, $2) RETURNING id",
    )
    .bind(cluster_id)
    .bind("North Central")
    .fetch_one(&mut **tx)
    .await?;

    let store_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO stores (id, sub_cluster_id, store_name, owner_name, address, phone)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(store_id)
    .bind(sub_cluster_id)
    .bind("Corner Mart")
    .bind("Budi")
    .bind("Jl. Merdeka 1")
    .bind("0812000000")
    .execute(&mut **tx)
    .await?;

    println!("Seeded cluster, sub-cluster and store");
    Ok(store_id)
}

async fn seed_catalog(tx: &mut Tx) -> anyhow::Result<()> {
    let (supplier_id,): (i32,) = sqlx::query_as(
        "INSERT INTO suppliers (supplier_name, phone, address) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Sumber Rejeki")
    .bind("0813000000")
    .bind("Jl. Industri 7")
    .fetch_one(&mut **tx)
    .await?;
    let (category_id,): (i32,) =
        sqlx::query_as("INSERT INTO categories (category_name) VALUES ($1) RETURNING id")
            .bind("Beverages")
            .fetch_one(&mut **tx)
            .await?;

    let products = [
        ("Mineral Water 600ml", "Bottled water", 3500_i64),
        ("Iced Tea 350ml", "Sweet jasmine tea", 5000),
        ("Instant Coffee 10x20g", "Coffee sachets", 15000),
    ];
    for (name, description, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (category_id, supplier_id, product_name, price, description)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(category_id)
        .bind(supplier_id)
        .bind(name)
        .bind(price)
        .bind(description)
        .execute(&mut **tx)
        .await?;
    }

    println!("Seeded supplier, category and products");
    Ok(())
}
