use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::serde_json;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

#[cfg(test)]
#[path = "./source.tests.rs"]
mod source_tests;

const HPA_KIND: &str = "HorizontalPodAutoscaler";
const HPA_LIST_KIND: &str = "HorizontalPodAutoscalerList";
const HPA_API_VERSION: &str = "autoscaling/v2";

/// Possible errors from reading manifests.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// Cannot read manifests file.
    #[error("cannot read manifests file: {0}")]
    IoError(#[from] std::io::Error),

    /// Cannot deserialize manifest.
    #[error("cannot deserialize manifest: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Cannot convert manifest to a patch.
    #[error("cannot convert manifest to a patch: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Reads horizontal pod autoscalers from a multi-document YAML file.
pub async fn load_manifests(path: &Path) -> Result<Vec<HorizontalPodAutoscaler>, SourceError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_manifests(&content)
}

/// Parses horizontal pod autoscalers from multi-document YAML.\
/// **Note** that `List` documents are flattened and other kinds are skipped.
pub fn parse_manifests(content: &str) -> Result<Vec<HorizontalPodAutoscaler>, SourceError> {
    let mut result = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        collect_manifests(value, &mut result)?;
    }

    Ok(result)
}

/// Converts edited manifest to JSON merge patch of the whole object.\
/// **Note** that `status` and `metadata.managedFields` are dropped as they are owned by the server.
pub fn manifest_to_patch(hpa: &HorizontalPodAutoscaler) -> Result<serde_json::Value, SourceError> {
    let mut patch = serde_json::to_value(hpa)?;
    if let Some(object) = patch.as_object_mut() {
        object.remove("status");
        if let Some(metadata) = object.get_mut("metadata").and_then(serde_json::Value::as_object_mut) {
            metadata.remove("managedFields");
        }
    }

    Ok(patch)
}

fn collect_manifests(value: Value, result: &mut Vec<HorizontalPodAutoscaler>) -> Result<(), SourceError> {
    let Value::Mapping(mut mapping) = value else {
        return Ok(());
    };

    let kind = mapping.get("kind").and_then(Value::as_str).map(String::from);
    match kind.as_deref() {
        Some(kind) if kind.ends_with("List") => {
            let is_hpa_list = kind == HPA_LIST_KIND;
            if let Some(Value::Sequence(items)) = mapping.remove("items") {
                for item in items {
                    collect_manifests(if is_hpa_list { with_type_meta(item) } else { item }, result)?;
                }
            }
        },
        Some(HPA_KIND) => result.push(serde_yaml::from_value(Value::Mapping(mapping))?),
        other => tracing::debug!("Skipping manifest of kind '{}'", other.unwrap_or_default()),
    }

    Ok(())
}

fn with_type_meta(item: Value) -> Value {
    let Value::Mapping(mut mapping) = item else {
        return item;
    };

    if !mapping.contains_key("kind") {
        mapping.insert("kind".into(), HPA_KIND.into());
    }

    if !mapping.contains_key("apiVersion") {
        mapping.insert("apiVersion".into(), HPA_API_VERSION.into());
    }

    Value::Mapping(mapping)
}
