use k8s_openapi::api::autoscaling::v2::{
    HorizontalPodAutoscaler, MetricSpec, MetricStatus, MetricValueStatus, ResourceMetricSource,
};

use crate::ResourceName;

#[cfg(test)]
#[path = "./locator.tests.rs"]
mod locator_tests;

const RESOURCE_METRIC: &str = "Resource";

/// Returns target metric for the specified resource.\
/// **Note** that only the first matching entry is returned, duplicates are ignored.
pub fn find_target_metric(metrics: &[MetricSpec], name: ResourceName) -> Option<&ResourceMetricSource> {
    metrics
        .iter()
        .filter(|metric| metric.type_ == RESOURCE_METRIC)
        .filter_map(|metric| metric.resource.as_ref())
        .find(|resource| resource.name == name.as_str())
}

/// Returns current (observed) metric value for the specified resource.\
/// **Note** that only the first matching entry is returned, duplicates are ignored.
pub fn find_current_metric(metrics: &[MetricStatus], name: ResourceName) -> Option<&MetricValueStatus> {
    metrics
        .iter()
        .filter(|metric| metric.type_ == RESOURCE_METRIC)
        .filter_map(|metric| metric.resource.as_ref())
        .find(|resource| resource.name == name.as_str())
        .map(|resource| &resource.current)
}

/// Returns `spec.metrics` of the HPA or an empty slice.
pub fn target_metrics(hpa: &HorizontalPodAutoscaler) -> &[MetricSpec] {
    hpa.spec
        .as_ref()
        .and_then(|spec| spec.metrics.as_deref())
        .unwrap_or_default()
}

/// Returns `status.currentMetrics` of the HPA or an empty slice.
pub fn current_metrics(hpa: &HorizontalPodAutoscaler) -> &[MetricStatus] {
    hpa.status
        .as_ref()
        .and_then(|status| status.current_metrics.as_deref())
        .unwrap_or_default()
}
