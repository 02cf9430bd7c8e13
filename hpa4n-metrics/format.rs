use k8s_openapi::api::autoscaling::v2::{MetricSpec, MetricStatus, MetricTarget};

use crate::{
    Mebibytes, MetricValue, ResourceName, TargetType, find_current_metric, find_target_metric, quantity_to_canonical,
};

#[cfg(test)]
#[path = "./format.tests.rs"]
mod format_tests;

/// Text displayed for a metric that is not configured.
pub const EMPTY_VALUE: &str = "--";

/// Formats CPU metric value for display.
pub fn format_cpu_metric_value(value: Option<&MetricValue>, target_type: Option<TargetType>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return EMPTY_VALUE.to_owned();
    };

    match target_type {
        Some(TargetType::Utilization) => format!("{value}%"),
        Some(TargetType::AverageValue) | None => value.to_string(),
    }
}

/// Formats memory metric value for display.\
/// **Note** that absolute values are always shown in `Mi`.
pub fn format_memory_metric_value(value: Option<&MetricValue>, target_type: Option<TargetType>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return EMPTY_VALUE.to_owned();
    };

    match target_type {
        Some(TargetType::Utilization) => format!("{value}%"),
        Some(TargetType::AverageValue) => match value {
            MetricValue::Number(mebibytes) => Mebibytes::new(*mebibytes).to_string(),
            MetricValue::Quantity(quantity) => quantity_to_canonical(quantity).display,
        },
        None => value.to_string(),
    }
}

/// Formats metric value of the specified resource for display.
pub fn format_metric_value(name: ResourceName, value: Option<&MetricValue>, target_type: Option<TargetType>) -> String {
    match name {
        ResourceName::Cpu => format_cpu_metric_value(value, target_type),
        ResourceName::Memory => format_memory_metric_value(value, target_type),
    }
}

/// Formats the configured scaling target of the specified resource.
pub fn format_target_metric(metrics: &[MetricSpec], name: ResourceName) -> String {
    let Some(source) = find_target_metric(metrics, name) else {
        return EMPTY_VALUE.to_owned();
    };

    let target_type = TargetType::from_name(&source.target.type_);
    format_metric_value(name, target_value(&source.target).as_ref(), target_type)
}

/// Formats the observed value of the specified resource.\
/// `target_type` selects between the utilization and the average value reported in the status.
pub fn format_current_metric(metrics: &[MetricStatus], name: ResourceName, target_type: Option<TargetType>) -> String {
    let Some(current) = find_current_metric(metrics, name) else {
        return EMPTY_VALUE.to_owned();
    };

    let value = match target_type {
        Some(TargetType::Utilization) => current.average_utilization.map(MetricValue::from),
        _ => current.average_value.as_ref().map(|q| MetricValue::from(q.0.as_str())),
    };

    format_metric_value(name, value.as_ref(), target_type.or(Some(TargetType::AverageValue)))
}

fn target_value(target: &MetricTarget) -> Option<MetricValue> {
    target
        .average_utilization
        .map(MetricValue::from)
        .or_else(|| target.average_value.as_ref().map(|q| MetricValue::from(q.0.as_str())))
        .or_else(|| target.value.as_ref().map(|q| MetricValue::from(q.0.as_str())))
}
