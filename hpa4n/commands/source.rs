use anyhow::{Result, anyhow};
use hpa4n_kube::{EventRow, HpaClient, get_client, load_manifests};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use std::path::PathBuf;

use crate::cli::Args;

#[cfg(test)]
#[path = "./source.tests.rs"]
mod source_tests;

/// Place the horizontal pod autoscalers are read from.
pub enum Source {
    Cluster(HpaClient),
    File {
        path: PathBuf,
        namespace: Option<String>,
        items: Vec<HorizontalPodAutoscaler>,
    },
}

impl Source {
    /// Loads manifests when `--file` is set, otherwise connects to the cluster.
    pub async fn open(args: &Args) -> Result<Self> {
        if let Some(path) = &args.file {
            let items = load_manifests(path).await?;
            tracing::info!("Loaded {} autoscalers from '{}'", items.len(), path.display());

            return Ok(Source::File {
                path: path.clone(),
                namespace: args.namespace.clone(),
                items,
            });
        }

        let (client, _) = get_client(args.kube_config.as_deref(), args.context.as_deref()).await?;
        Ok(Source::Cluster(HpaClient::new(client, args.namespace.as_deref())))
    }

    /// Returns cluster client or an error when working with a file.
    pub fn cluster(&self) -> Result<&HpaClient> {
        match self {
            Source::Cluster(client) => Ok(client),
            Source::File { path, .. } => Err(anyhow!(
                "command needs a cluster connection and cannot work with '{}'",
                path.display()
            )),
        }
    }

    /// Lists horizontal pod autoscalers matching the equality based `label_selector`.
    pub async fn list(
        &self,
        all_namespaces: bool,
        label_selector: Option<&str>,
    ) -> Result<Vec<HorizontalPodAutoscaler>> {
        match self {
            Source::Cluster(client) => Ok(client.list(all_namespaces, label_selector).await?),
            Source::File { namespace, items, .. } => Ok(items
                .iter()
                .filter(|hpa| all_namespaces || in_namespace(hpa, namespace.as_deref()))
                .filter(|hpa| label_selector.is_none_or(|s| matches_labels(hpa, s)))
                .cloned()
                .collect()),
        }
    }

    /// Gets horizontal pod autoscaler by name.
    pub async fn get(&self, name: &str) -> Result<HorizontalPodAutoscaler> {
        match self {
            Source::Cluster(client) => Ok(client.get(name).await?),
            Source::File { path, namespace, items } => items
                .iter()
                .find(|hpa| hpa.metadata.name.as_deref() == Some(name) && in_namespace(hpa, namespace.as_deref()))
                .cloned()
                .ok_or_else(|| anyhow!("horizontalpodautoscaler '{}' not found in '{}'", name, path.display())),
        }
    }

    /// Lists events of the horizontal pod autoscaler, `None` when working with a file.
    pub async fn events(&self, name: &str) -> Result<Option<Vec<EventRow>>> {
        match self {
            Source::Cluster(client) => Ok(Some(client.events(name).await?)),
            Source::File { .. } => Ok(None),
        }
    }
}

fn in_namespace(hpa: &HorizontalPodAutoscaler, namespace: Option<&str>) -> bool {
    match (namespace, hpa.metadata.namespace.as_deref()) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => true,
    }
}

fn matches_labels(hpa: &HorizontalPodAutoscaler, selector: &str) -> bool {
    let labels = hpa.metadata.labels.as_ref();
    selector.split(',').filter(|s| !s.is_empty()).all(|requirement| {
        let (key, value) = requirement.split_once('=').unwrap_or((requirement, ""));
        labels
            .and_then(|l| l.get(key.trim()))
            .is_some_and(|actual| actual == value.trim())
    })
}
