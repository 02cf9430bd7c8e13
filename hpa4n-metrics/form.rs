use k8s_openapi::api::autoscaling::v2::{MetricSpec, MetricTarget, ResourceMetricSource};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    MetricValue, ResourceName, TargetType, find_target_metric, mebibytes_to_quantity, millicores_to_quantity,
};

#[cfg(test)]
#[path = "./form.tests.rs"]
mod form_tests;

static MILLICORES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(m?)$").expect("millicores pattern should compile"));

/// Single resource metric as edited by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FormMetric {
    pub name: ResourceName,
    pub target_type: TargetType,
    pub value: Option<MetricValue>,
}

impl FormMetric {
    /// Creates new, not configured [`FormMetric`] instance.
    pub fn new(name: ResourceName, target_type: TargetType) -> Self {
        Self {
            name,
            target_type,
            value: None,
        }
    }

    /// Returns [`FormMetric`] with the value set.
    pub fn with_value(mut self, value: impl Into<MetricValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the target type together with its value.
    pub fn set(&mut self, target_type: TargetType, value: impl Into<MetricValue>) {
        self.target_type = target_type;
        self.value = Some(value.into());
    }

    /// Marks metric as not configured.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Returns `true` if the metric has a value configured.
    pub fn is_set(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_empty())
    }

    /// Returns configured value as a number in the form unit.
    pub fn resolved_value(&self) -> Option<f64> {
        self.value
            .as_ref()
            .filter(|value| !value.is_empty())
            .and_then(|value| value.resolve(self.name, self.target_type))
    }
}

/// CPU and memory metrics as edited by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct FormMetrics {
    pub cpu: FormMetric,
    pub memory: FormMetric,
}

impl Default for FormMetrics {
    fn default() -> Self {
        Self::new(
            ResourceName::Cpu.default_target_type(),
            ResourceName::Memory.default_target_type(),
        )
    }
}

impl FormMetrics {
    /// Creates new [`FormMetrics`] instance with both metrics not configured.
    pub fn new(cpu_type: TargetType, memory_type: TargetType) -> Self {
        Self {
            cpu: FormMetric::new(ResourceName::Cpu, cpu_type),
            memory: FormMetric::new(ResourceName::Memory, memory_type),
        }
    }

    /// Returns metric for the specified resource.
    pub fn get(&self, name: ResourceName) -> &FormMetric {
        match name {
            ResourceName::Cpu => &self.cpu,
            ResourceName::Memory => &self.memory,
        }
    }

    /// Returns mutable metric for the specified resource.
    pub fn get_mut(&mut self, name: ResourceName) -> &mut FormMetric {
        match name {
            ResourceName::Cpu => &mut self.cpu,
            ResourceName::Memory => &mut self.memory,
        }
    }

    /// Returns iterator over metrics in declaration order (CPU first).
    pub fn iter(&self) -> impl Iterator<Item = &FormMetric> {
        [&self.cpu, &self.memory].into_iter()
    }
}

/// Converts form metrics to the kubernetes `spec.metrics` array.\
/// **Note** that metrics without a value are omitted and CPU always goes before memory.
pub fn form_metrics_to_spec(form: &FormMetrics) -> Vec<MetricSpec> {
    form.iter().filter_map(to_metric_spec).collect()
}

/// Converts kubernetes `spec.metrics` array to form metrics.
pub fn spec_to_form_metrics(metrics: &[MetricSpec]) -> FormMetrics {
    FormMetrics {
        cpu: to_form_metric(metrics, ResourceName::Cpu),
        memory: to_form_metric(metrics, ResourceName::Memory),
    }
}

fn to_metric_spec(metric: &FormMetric) -> Option<MetricSpec> {
    let value = metric.value.as_ref().filter(|value| !value.is_empty())?;
    let mut target = MetricTarget {
        type_: metric.target_type.as_str().to_owned(),
        ..Default::default()
    };

    match metric.target_type {
        TargetType::Utilization => {
            let Some(percent) = value.resolve(metric.name, TargetType::Utilization) else {
                tracing::warn!("Skipping {} metric, '{}' is not a valid utilization", metric.name, value);
                return None;
            };
            target.average_utilization = Some(percent.round() as i32);
        },
        TargetType::AverageValue => {
            target.average_value = Some(match (value, metric.name) {
                (MetricValue::Number(millicores), ResourceName::Cpu) => millicores_to_quantity(*millicores),
                (MetricValue::Number(mebibytes), ResourceName::Memory) => mebibytes_to_quantity(*mebibytes),
                (MetricValue::Quantity(quantity), _) => Quantity(quantity.trim().to_owned()),
            });
        },
    }

    Some(MetricSpec {
        type_: "Resource".to_owned(),
        resource: Some(ResourceMetricSource {
            name: metric.name.as_str().to_owned(),
            target,
        }),
        ..Default::default()
    })
}

fn to_form_metric(metrics: &[MetricSpec], name: ResourceName) -> FormMetric {
    let Some(source) = find_target_metric(metrics, name) else {
        return FormMetric::new(name, name.default_target_type());
    };

    FormMetric {
        name,
        target_type: TargetType::from_name(&source.target.type_).unwrap_or(name.default_target_type()),
        value: extract_metric_value(name, &source.target),
    }
}

fn extract_metric_value(name: ResourceName, target: &MetricTarget) -> Option<MetricValue> {
    if let Some(utilization) = target.average_utilization {
        return Some(utilization.into());
    }

    let quantity = target.average_value.as_ref()?.0.trim();
    match name {
        ResourceName::Cpu => Some(parse_millicores(quantity).map_or_else(|| quantity.into(), MetricValue::Number)),
        ResourceName::Memory => Some(quantity.into()),
    }
}

/// Parses CPU quantity to millicores, a value without the `m` suffix is in cores.
fn parse_millicores(quantity: &str) -> Option<f64> {
    let captures = MILLICORES_PATTERN.captures(quantity)?;
    let value = captures.get(1)?.as_str().parse::<f64>().ok()?;
    if captures.get(2).is_some_and(|suffix| !suffix.as_str().is_empty()) {
        Some(value)
    } else {
        Some((value * 1_000_000.0).round() / 1_000.0)
    }
}
