use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::{
    audit,
    dto::products::{ProductInput, ProductList},
    entity::{
        categories::{
            ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
            Model as CategoryModel,
        },
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products, Model as ProductModel},
        suppliers::{Column as SupplierCol, Entity as Suppliers},
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::{Category, Product},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i32,
    category_id: i32,
    supplier_id: i32,
    product_name: String,
    price: i64,
    description: String,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    category_name: Option<String>,
    supplier_name: Option<String>,
}

fn with_names(finder: Select<Products>) -> Select<Products> {
    finder
        .left_join(Categories)
        .left_join(Suppliers)
        .column_as(CategoryCol::CategoryName, "category_name")
        .column_as(SupplierCol::SupplierName, "supplier_name")
}

/// Every product with its category and supplier names, newest first.
pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    let items = with_names(Products::find())
        .order_by_desc(ProdCol::CreatedAt)
        .into_model::<ProductRow>()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_row)
        .collect();
    Ok(items)
}

/// Paged product search for the JSON API.
pub async fn search_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Products, ProdCol::ProductName)).ilike(pattern.clone()))
                .add(Expr::col((Products, ProdCol::Description)).ilike(pattern)),
        );
    }

    let finder = Products::find().filter(condition);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = with_names(finder)
        .order_by_desc(ProdCol::CreatedAt)
        .limit(limit as u64)
        .offset(offset as u64)
        .into_model::<ProductRow>()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_row)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    actor: &SessionUser,
    input: ProductInput,
) -> AppResult<Product> {
    ensure_references(state, &input).await?;

    let product = ProductActive {
        id: NotSet,
        category_id: Set(input.category_id),
        supplier_id: Set(input.supplier_id),
        product_name: Set(input.product_name),
        price: Set(input.price),
        description: Set(input.description),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(product_from_entity(product))
}

pub async fn update_product(
    state: &AppState,
    actor: &SessionUser,
    id: i32,
    input: ProductInput,
) -> AppResult<Product> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    ensure_references(state, &input).await?;

    let mut active: ProductActive = existing.into();
    active.category_id = Set(input.category_id);
    active.supplier_id = Set(input.supplier_id);
    active.product_name = Set(input.product_name);
    active.price = Set(input.price);
    active.description = Set(input.description);
    active.updated_at = Set(Utc::now().into());
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(product_from_entity(product))
}

pub async fn delete_product(state: &AppState, actor: &SessionUser, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(())
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_desc(CategoryCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    Ok(categories)
}

pub async fn create_category(
    state: &AppState,
    actor: &SessionUser,
    name: String,
) -> AppResult<Category> {
    let category = CategoryActive {
        id: NotSet,
        category_name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(category_from_entity(category))
}

pub async fn update_category(
    state: &AppState,
    actor: &SessionUser,
    id: i32,
    name: String,
) -> AppResult<Category> {
    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: CategoryActive = existing.into();
    active.category_name = Set(name);
    let category = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(category_from_entity(category))
}

pub async fn delete_category(state: &AppState, actor: &SessionUser, id: i32) -> AppResult<()> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(())
}

async fn ensure_references(state: &AppState, input: &ProductInput) -> AppResult<()> {
    if Categories::find_by_id(input.category_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "Category {} does not exist",
            input.category_id
        )));
    }
    if Suppliers::find_by_id(input.supplier_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "Supplier {} does not exist",
            input.supplier_id
        )));
    }
    Ok(())
}

fn product_from_row(row: ProductRow) -> Product {
    Product {
        id: row.id,
        category_id: row.category_id,
        supplier_id: row.supplier_id,
        product_name: row.product_name,
        price: row.price,
        description: row.description,
        category_name: row.category_name,
        supplier_name: row.supplier_name,
        created_at: row.created_at.with_timezone(&Utc),
        updated_at: row.updated_at.with_timezone(&Utc),
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        category_id: model.category_id,
        supplier_id: model.supplier_id,
        product_name: model.product_name,
        price: model.price,
        description: model.description,
        category_name: None,
        supplier_name: None,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        category_name: model.category_name,
    }
}
