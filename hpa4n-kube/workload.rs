use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::serde_json::json;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, fmt::Display, str::FromStr};

use crate::ClientError;
use crate::client::FIELD_MANAGER;

#[cfg(test)]
#[path = "./workload.tests.rs"]
mod workload_tests;

pub const APPS_API_VERSION: &str = "apps/v1";
pub const RELATED_HPA_ANNOTATION: &str = "kubesphere.io/relatedHPA";

/// Workload kinds that can be scaled by the horizontal pod autoscaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    /// Returns kind name as used by the kubernetes API.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::StatefulSet => "StatefulSet",
        }
    }
}

impl Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deployment" | "deployments" | "deploy" => Ok(WorkloadKind::Deployment),
            "statefulset" | "statefulsets" | "sts" => Ok(WorkloadKind::StatefulSet),
            _ => Err(format!("unsupported workload kind '{s}', expected deployment or statefulset")),
        }
    }
}

/// Reference to the workload scaled by the horizontal pod autoscaler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRef {
    pub kind: WorkloadKind,
    pub name: String,
    pub namespace: String,
    pub uid: String,
}

impl WorkloadRef {
    /// Creates new [`WorkloadRef`] instance.
    pub fn new(kind: WorkloadKind, name: impl Into<String>, namespace: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            uid: uid.into(),
        }
    }

    /// Gets the workload from the cluster and returns reference to it.
    pub async fn fetch(client: Client, namespace: &str, kind: WorkloadKind, name: &str) -> Result<Self, ClientError> {
        let uid = match kind {
            WorkloadKind::Deployment => fetch_uid(Api::<Deployment>::namespaced(client, namespace), name).await?,
            WorkloadKind::StatefulSet => fetch_uid(Api::<StatefulSet>::namespaced(client, namespace), name).await?,
        };

        uid.map(|uid| WorkloadRef::new(kind, name, namespace, uid))
            .ok_or_else(|| ClientError::MissingUid(kind.to_string(), name.to_owned()))
    }

    /// Annotates the workload with the name of the horizontal pod autoscaler that scales it.
    pub async fn annotate_related_hpa(&self, client: Client, hpa_name: &str) -> Result<(), ClientError> {
        let patch = json!({
            "metadata": {
                "annotations": {
                    RELATED_HPA_ANNOTATION: hpa_name,
                }
            }
        });

        match self.kind {
            WorkloadKind::Deployment => {
                patch_workload(Api::<Deployment>::namespaced(client, &self.namespace), &self.name, &patch).await
            },
            WorkloadKind::StatefulSet => {
                patch_workload(Api::<StatefulSet>::namespaced(client, &self.namespace), &self.name, &patch).await
            },
        }
    }
}

async fn fetch_uid<K>(api: Api<K>, name: &str) -> Result<Option<String>, ClientError>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    Ok(api.get(name).await?.uid())
}

async fn patch_workload<K>(api: Api<K>, name: &str, patch: &k8s_openapi::serde_json::Value) -> Result<(), ClientError>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    let mut params = PatchParams::default();
    params.field_manager = Some(FIELD_MANAGER.to_owned());
    api.patch(name, &params, &Patch::Merge(patch)).await?;
    tracing::info!("Workload '{}' annotated with related HPA", name);

    Ok(())
}
