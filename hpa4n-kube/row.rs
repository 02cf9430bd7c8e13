use hpa4n_metrics::{
    ResourceName, TargetType, current_metrics, find_target_metric, format_current_metric, format_target_metric,
    target_metrics,
};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;

use crate::ConditionSummary;
use crate::session::ALIAS_ANNOTATION;
use crate::utils::format_age;

#[cfg(test)]
#[path = "./row.tests.rs"]
mod row_tests;

/// Horizontal pod autoscaler data shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpaRow {
    pub name: String,
    pub namespace: String,
    pub alias: Option<String>,
    pub target: String,
    pub cpu_target: String,
    pub cpu_current: String,
    pub memory_target: String,
    pub memory_current: String,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub current_replicas: i32,
    pub desired_replicas: i32,
    pub age: Option<String>,
    pub conditions: ConditionSummary,
}

impl From<&HorizontalPodAutoscaler> for HpaRow {
    fn from(hpa: &HorizontalPodAutoscaler) -> Self {
        let spec = hpa.spec.as_ref();
        let status = hpa.status.as_ref();
        let targets = target_metrics(hpa);
        let current = current_metrics(hpa);
        let target_type = |name: ResourceName| {
            find_target_metric(targets, name).and_then(|source| TargetType::from_name(&source.target.type_))
        };

        Self {
            name: hpa.metadata.name.clone().unwrap_or_default(),
            namespace: hpa.metadata.namespace.clone().unwrap_or_default(),
            alias: hpa
                .metadata
                .annotations
                .as_ref()
                .and_then(|a| a.get(ALIAS_ANNOTATION))
                .cloned(),
            target: spec
                .map(|s| format!("{}/{}", s.scale_target_ref.kind, s.scale_target_ref.name))
                .unwrap_or_default(),
            cpu_target: format_target_metric(targets, ResourceName::Cpu),
            cpu_current: format_current_metric(current, ResourceName::Cpu, target_type(ResourceName::Cpu)),
            memory_target: format_target_metric(targets, ResourceName::Memory),
            memory_current: format_current_metric(current, ResourceName::Memory, target_type(ResourceName::Memory)),
            min_replicas: spec.and_then(|s| s.min_replicas).unwrap_or(1),
            max_replicas: spec.map(|s| s.max_replicas).unwrap_or_default(),
            current_replicas: status.and_then(|s| s.current_replicas).unwrap_or_default(),
            desired_replicas: status.map(|s| s.desired_replicas).unwrap_or_default(),
            age: hpa.metadata.creation_timestamp.as_ref().map(|t| format_age(&t.0)),
            conditions: ConditionSummary::from(hpa),
        }
    }
}

impl HpaRow {
    /// Returns CPU column text: `target / current`.
    pub fn cpu(&self) -> String {
        format!("{} / {}", self.cpu_target, self.cpu_current)
    }

    /// Returns memory column text: `target / current`.
    pub fn memory(&self) -> String {
        format!("{} / {}", self.memory_target, self.memory_current)
    }

    /// Returns replica bounds column text, e.g. `1-5`.
    pub fn replica_bounds(&self) -> String {
        format!("{}-{}", self.min_replicas, self.max_replicas)
    }

    /// Returns replicas column text: `current/desired`.
    pub fn replicas(&self) -> String {
        format!("{}/{}", self.current_replicas, self.desired_replicas)
    }
}
