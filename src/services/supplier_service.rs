use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::suppliers::SupplierInput,
    entity::suppliers::{
        ActiveModel as SupplierActive, Column as SupplierCol, Entity as Suppliers,
        Model as SupplierModel,
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::Supplier,
    state::AppState,
};

pub async fn list_suppliers(state: &AppState) -> AppResult<Vec<Supplier>> {
    let suppliers = Suppliers::find()
        .order_by_desc(SupplierCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(supplier_from_entity)
        .collect();
    Ok(suppliers)
}

pub async fn create_supplier(
    state: &AppState,
    actor: &SessionUser,
    input: SupplierInput,
) -> AppResult<Supplier> {
    let supplier = SupplierActive {
        id: NotSet,
        supplier_name: Set(input.supplier_name),
        phone: Set(input.phone),
        address: Set(input.address),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "supplier_create",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(supplier_from_entity(supplier))
}

pub async fn update_supplier(
    state: &AppState,
    actor: &SessionUser,
    id: i32,
    input: SupplierInput,
) -> AppResult<Supplier> {
    let existing = Suppliers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: SupplierActive = existing.into();
    active.supplier_name = Set(input.supplier_name);
    active.phone = Set(input.phone);
    active.address = Set(input.address);
    active.updated_at = Set(Utc::now().into());
    let supplier = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "supplier_update",
        "suppliers",
        serde_json::json!({ "supplier_id": supplier.id }),
    )
    .await;

    Ok(supplier_from_entity(supplier))
}

pub async fn delete_supplier(state: &AppState, actor: &SessionUser, id: i32) -> AppResult<()> {
    let result = Suppliers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "supplier_delete",
        "suppliers",
        serde_json::json!({ "supplier_id": id }),
    )
    .await;

    Ok(())
}

pub fn supplier_from_entity(model: SupplierModel) -> Supplier {
    Supplier {
        id: model.id,
        supplier_name: model.supplier_name,
        phone: model.phone,
        address: model.address,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
