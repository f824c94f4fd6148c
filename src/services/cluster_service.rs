use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::{
    audit,
    dto::clusters::SubClusterInput,
    entity::{
        clusters::{ActiveModel as ClusterActive, Column as ClusterCol, Entity as Clusters},
        sub_clusters::{
            ActiveModel as SubClusterActive, Column as SubClusterCol, Entity as SubClusters,
            Model as SubClusterModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::SessionUser,
    models::{Cluster, SubCluster},
    state::AppState,
};

/// Clusters with their sub-clusters, newest cluster first.
pub async fn list_clusters(state: &AppState) -> AppResult<Vec<Cluster>> {
    let clusters = Clusters::find()
        .find_with_related(SubClusters)
        .order_by_desc(ClusterCol::Id)
        .order_by_asc(SubClusterCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(cluster, subs)| Cluster {
            id: cluster.id,
            cluster_name: cluster.cluster_name.clone(),
            sub_clusters: subs
                .into_iter()
                .map(|s| sub_cluster_from_entity(s, Some(cluster.cluster_name.clone())))
                .collect(),
        })
        .collect();
    Ok(clusters)
}

/// Sub-clusters with the name of their cluster, ordered by cluster id descending.
pub async fn list_sub_clusters(state: &AppState) -> AppResult<Vec<SubCluster>> {
    let subs = SubClusters::find()
        .find_also_related(Clusters)
        .order_by_desc(SubClusterCol::ClusterId)
        .order_by_asc(SubClusterCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|(sub, cluster)| sub_cluster_from_entity(sub, cluster.map(|c| c.cluster_name)))
        .collect();
    Ok(subs)
}

pub async fn create_cluster(state: &AppState, actor: &SessionUser, name: String) -> AppResult<Cluster> {
    let cluster = ClusterActive {
        id: NotSet,
        cluster_name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "cluster_create",
        "clusters",
        serde_json::json!({ "cluster_id": cluster.id }),
    )
    .await;

    Ok(Cluster {
        id: cluster.id,
        cluster_name: cluster.cluster_name,
        sub_clusters: Vec::new(),
    })
}

/// Delete a cluster; its sub-clusters are removed by the foreign key cascade.
pub async fn delete_cluster(state: &AppState, actor: &SessionUser, id: i32) -> AppResult<()> {
    let result = Clusters::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "cluster_delete",
        "clusters",
        serde_json::json!({ "cluster_id": id }),
    )
    .await;

    Ok(())
}

pub async fn create_sub_cluster(
    state: &AppState,
    actor: &SessionUser,
    input: SubClusterInput,
) -> AppResult<SubCluster> {
    ensure_cluster(state, input.cluster_id).await?;

    let sub = SubClusterActive {
        id: NotSet,
        cluster_id: Set(input.cluster_id),
        sub_cluster_name: Set(input.sub_cluster_name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "sub_cluster_create",
        "sub_clusters",
        serde_json::json!({ "sub_cluster_id": sub.id, "cluster_id": sub.cluster_id }),
    )
    .await;

    Ok(sub_cluster_from_entity(sub, None))
}

pub async fn update_sub_cluster(
    state: &AppState,
    actor: &SessionUser,
    id: i32,
    input: SubClusterInput,
) -> AppResult<SubCluster> {
    let existing = SubClusters::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    ensure_cluster(state, input.cluster_id).await?;

    let mut active: SubClusterActive = existing.into();
    active.cluster_id = Set(input.cluster_id);
    active.sub_cluster_name = Set(input.sub_cluster_name);
    let sub = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "sub_cluster_update",
        "sub_clusters",
        serde_json::json!({ "sub_cluster_id": sub.id }),
    )
    .await;

    Ok(sub_cluster_from_entity(sub, None))
}

pub async fn delete_sub_cluster(state: &AppState, actor: &SessionUser, id: i32) -> AppResult<()> {
    let result = SubClusters::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(actor.user_id),
        "sub_cluster_delete",
        "sub_clusters",
        serde_json::json!({ "sub_cluster_id": id }),
    )
    .await;

    Ok(())
}

async fn ensure_cluster(state: &AppState, cluster_id: i32) -> AppResult<()> {
    match Clusters::find_by_id(cluster_id).one(&state.orm).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(format!("Cluster {cluster_id} does not exist"))),
    }
}

fn sub_cluster_from_entity(model: SubClusterModel, cluster_name: Option<String>) -> SubCluster {
    SubCluster {
        id: model.id,
        cluster_id: model.cluster_id,
        sub_cluster_name: model.sub_cluster_name,
        cluster_name,
    }
}
