use axum::http::Method;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{Cluster, SubCluster},
    validation::{ActionInput, FieldErrors, FormData},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubClusterInput {
    pub cluster_id: i32,
    pub sub_cluster_name: String,
}

impl SubClusterInput {
    fn parse(form: &FormData, errors: &mut FieldErrors) -> Self {
        Self {
            cluster_id: form.parse("cluster_id", "Cluster id is Require", errors),
            sub_cluster_name: form.required(
                "sub_cluster_name",
                "Sub Cluster Name is Require",
                errors,
            ),
        }
    }
}

/// Actions of the cluster page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterAction {
    InsertCluster { cluster_name: String },
    InsertSubCluster(SubClusterInput),
    DeleteCluster { cluster_id: i32 },
}

impl ClusterAction {
    pub fn method(&self) -> Method {
        match self {
            ClusterAction::InsertCluster { .. } | ClusterAction::InsertSubCluster(_) => {
                Method::POST
            }
            ClusterAction::DeleteCluster { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for ClusterAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("insertCluster") => ClusterAction::InsertCluster {
                cluster_name: form.required("cluster_name", "Cluster Name is Require", &mut errors),
            },
            Some("insertSubCluster") => {
                ClusterAction::InsertSubCluster(SubClusterInput::parse(form, &mut errors))
            }
            Some("deleteCluster") => ClusterAction::DeleteCluster {
                cluster_id: form.parse("cluster_id", "Cluster id is Require", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

/// Actions of the sub-cluster page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubClusterAction {
    Create(SubClusterInput),
    Update { id: i32, input: SubClusterInput },
    Delete { id: i32 },
}

impl SubClusterAction {
    pub fn method(&self) -> Method {
        match self {
            SubClusterAction::Create(_) => Method::POST,
            SubClusterAction::Update { .. } => Method::PUT,
            SubClusterAction::Delete { .. } => Method::DELETE,
        }
    }
}

impl ActionInput for SubClusterAction {
    fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let action = match form.get("action") {
            Some("createSubCluster") => {
                SubClusterAction::Create(SubClusterInput::parse(form, &mut errors))
            }
            Some("updateSubCluster") => SubClusterAction::Update {
                id: form.parse("id", "Sub Cluster id is Require", &mut errors),
                input: SubClusterInput::parse(form, &mut errors),
            },
            Some("deleteSubCluster") => SubClusterAction::Delete {
                id: form.parse("id", "Sub Cluster id is Require", &mut errors),
            },
            _ => return Err(FieldErrors::single("action", "Method Not Allowed")),
        };
        errors.check()?;
        Ok(action)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClusterPage {
    pub user_id: uuid::Uuid,
    pub cluster: Vec<Cluster>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SubClusterList {
    #[schema(value_type = Vec<SubCluster>)]
    pub items: Vec<SubCluster>,
}
