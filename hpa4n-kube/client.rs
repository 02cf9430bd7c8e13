use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::Event;
use k8s_openapi::serde_json::Value;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};

use crate::events::{EventRow, event_selector, to_event_rows};

pub const FIELD_MANAGER: &str = "hpa4n";

/// Possible errors from communicating with the kubernetes cluster.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Failed to process kube configuration.
    #[error("failed to process kube configuration: {0}")]
    KubeconfigError(#[from] kube::config::KubeconfigError),

    /// Kube context does not exist in the configuration.
    #[error("kube context '{0}' not found in configuration")]
    ContextNotFound(String),

    /// Failed to call the kubernetes API.
    #[error("kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    /// Resource returned by the kubernetes API has no UID.
    #[error("{0} '{1}' has no UID")]
    MissingUid(String, String),
}

/// Creates kubernetes client and returns it together with used context.\
/// **Note** that `kube_config_path` defaults to `KUBECONFIG` or `HOME/.kube/config`.
pub async fn get_client(
    kube_config_path: Option<&str>,
    kube_context: Option<&str>,
) -> Result<(Client, String), ClientError> {
    let kube_config = get_kube_config(kube_config_path)?;
    let context = kube_context
        .map(String::from)
        .or_else(|| kube_config.current_context.clone())
        .unwrap_or_default();

    if !kube_config.contexts.iter().any(|c| c.name == context) {
        return Err(ClientError::ContextNotFound(context));
    }

    let options = KubeConfigOptions {
        context: Some(context.clone()),
        user: None,
        cluster: None,
    };
    let config = Config::from_custom_kubeconfig(kube_config, &options).await?;
    tracing::info!("Using kube context '{}'", context);

    Ok((Client::try_from(config)?, context))
}

fn get_kube_config(kube_config_path: Option<&str>) -> Result<Kubeconfig, ClientError> {
    match kube_config_path {
        Some(path) => Ok(Kubeconfig::read_from(path)?),
        None => Ok(Kubeconfig::read()?),
    }
}

/// Typed access to the `HorizontalPodAutoscaler` resources.
pub struct HpaClient {
    client: Client,
    namespace: String,
}

impl HpaClient {
    /// Creates new [`HpaClient`] instance.\
    /// **Note** that `None` namespace means the default namespace of the kube context.
    pub fn new(client: Client, namespace: Option<&str>) -> Self {
        let namespace = namespace.map_or_else(|| client.default_namespace().to_owned(), String::from);
        Self { client, namespace }
    }

    /// Returns namespace used for namespaced operations.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns cloned kubernetes client that can be consumed.
    pub fn get_client(&self) -> Client {
        self.client.clone()
    }

    /// Lists horizontal pod autoscalers in the namespace or across all namespaces.
    pub async fn list(
        &self,
        all_namespaces: bool,
        label_selector: Option<&str>,
    ) -> Result<Vec<HorizontalPodAutoscaler>, ClientError> {
        let api = if all_namespaces {
            Api::all(self.client.clone())
        } else {
            self.api()
        };

        let mut params = ListParams::default();
        if let Some(selector) = label_selector {
            params = params.labels(selector);
        }

        Ok(api.list(&params).await?.items)
    }

    /// Gets horizontal pod autoscaler by name.
    pub async fn get(&self, name: &str) -> Result<HorizontalPodAutoscaler, ClientError> {
        Ok(self.api().get(name).await?)
    }

    /// Creates horizontal pod autoscaler, nothing is persisted when `dry_run` is set.
    pub async fn create(
        &self,
        hpa: &HorizontalPodAutoscaler,
        dry_run: bool,
    ) -> Result<HorizontalPodAutoscaler, ClientError> {
        let params = PostParams {
            dry_run,
            field_manager: Some(FIELD_MANAGER.to_owned()),
        };

        Ok(self.api().create(&params, hpa).await?)
    }

    /// Applies JSON merge patch to the horizontal pod autoscaler.
    pub async fn patch(&self, name: &str, patch: &Value, dry_run: bool) -> Result<HorizontalPodAutoscaler, ClientError> {
        let mut params = PatchParams::default();
        params.dry_run = dry_run;
        params.field_manager = Some(FIELD_MANAGER.to_owned());

        Ok(self.api().patch(name, &params, &Patch::Merge(patch)).await?)
    }

    /// Deletes horizontal pod autoscaler by name.
    pub async fn delete(&self, name: &str) -> Result<(), ClientError> {
        self.api().delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    /// Lists events reported for the horizontal pod autoscaler, most recent first.
    pub async fn events(&self, name: &str) -> Result<Vec<EventRow>, ClientError> {
        let api = Api::<Event>::namespaced(self.client.clone(), &self.namespace);
        let params = ListParams::default().fields(&event_selector(name));

        Ok(to_event_rows(&api.list(&params).await?.items))
    }

    fn api(&self) -> Api<HorizontalPodAutoscaler> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}
