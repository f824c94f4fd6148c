use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::stores::StoreInput,
    entity::{
        stores::{ActiveModel as StoreActive, Column as StoreCol, Entity as Stores, Model as StoreModel},
        sub_clusters::Entity as SubClusters,
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::Store,
    state::AppState,
};

/// Stores with their sub-cluster name, newest first.
pub async fn list_stores(state: &AppState) -> AppResult<Vec<Store>> {
    let stores = Stores::find()
        .find_also_related(SubClusters)
        .order_by_desc(StoreCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(store, sub)| store_from_entity(store, sub.map(|s| s.sub_cluster_name)))
        .collect();
    Ok(stores)
}

pub async fn create_store(state: &AppState, actor: &SessionUser, input: StoreInput) -> AppResult<Store> {
    ensure_sub_cluster(state, input.sub_cluster_id).await?;

    let store = StoreActive {
        id: Set(Uuid::new_v4()),
        sub_cluster_id: Set(input.sub_cluster_id),
        store_name: Set(input.store_name),
        owner_name: Set(input.owner_name),
        address: Set(input.address),
        phone: Set(input.phone),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "store_create",
        "stores",
        serde_json::json!({ "store_id": store.id }),
    )
    .await;

    Ok(store_from_entity(store, None))
}

pub async fn update_store(
    state: &AppState,
    actor: &SessionUser,
    id: Uuid,
    input: StoreInput,
) -> AppResult<Store> {
    let existing = Stores::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    ensure_sub_cluster(state, input.sub_cluster_id).await?;

    let mut active: StoreActive = existing.into();
    active.sub_cluster_id = Set(input.sub_cluster_id);
    active.store_name = Set(input.store_name);
    active.owner_name = Set(input.owner_name);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.updated_at = Set(Utc::now().into());
    let store = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "store_update",
        "stores",
        serde_json::json!({ "store_id": store.id }),
    )
    .await;

    Ok(store_from_entity(store, None))
}

pub async fn delete_store(state: &AppState, actor: &SessionUser, id: Uuid) -> AppResult<()> {
    let result = Stores::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "store_delete",
        "stores",
        serde_json::json!({ "store_id": id }),
    )
    .await;

    Ok(())
}

async fn ensure_sub_cluster(state: &AppState, sub_cluster_id: i32) -> AppResult<()> {
    match SubClusters::find_by_id(sub_cluster_id).one(&state.orm).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(format!(
            "Sub cluster {sub_cluster_id} does not exist"
        ))),
    }
}

fn store_from_entity(model: StoreModel, sub_cluster_name: Option<String>) -> Store {
    Store {
        id: model.id,
        sub_cluster_id: model.sub_cluster_id,
        sub_cluster_name,
        store_name: model.store_name,
        owner_name: model.owner_name,
        address: model.address,
        phone: model.phone,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
