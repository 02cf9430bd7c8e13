use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::ParsedQuantity;

/// Resource that can be used as a scaling target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceName {
    Cpu,
    Memory,
}

impl ResourceName {
    /// Returns resource name as used by the kubernetes API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceName::Cpu => "cpu",
            ResourceName::Memory => "memory",
        }
    }

    /// Returns target type used when the API object does not specify one.
    pub fn default_target_type(&self) -> TargetType {
        match self {
            ResourceName::Cpu => TargetType::Utilization,
            ResourceName::Memory => TargetType::AverageValue,
        }
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of the metric target.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// Percentage of the requested resource.
    #[default]
    Utilization,

    /// Absolute quantity per pod.
    AverageValue,
}

impl TargetType {
    /// Returns target type name as used by the kubernetes API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Utilization => "Utilization",
            TargetType::AverageValue => "AverageValue",
        }
    }

    /// Returns [`TargetType`] for the kubernetes API name or `None` if it is not supported.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Utilization" => Some(TargetType::Utilization),
            "AverageValue" => Some(TargetType::AverageValue),
            _ => None,
        }
    }
}

impl Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single form metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Plain number: percentage, millicores (CPU) or mebibytes (memory).
    Number(f64),

    /// Kubernetes quantity kept exactly as received from the API.
    Quantity(String),
}

impl MetricValue {
    /// Returns `true` if the value holds an empty quantity string.
    pub fn is_empty(&self) -> bool {
        matches!(self, MetricValue::Quantity(quantity) if quantity.trim().is_empty())
    }

    /// Resolves value to a number in the form unit of the `resource`.\
    /// Returns `None` if the quantity cannot be parsed.
    pub fn resolve(&self, resource: ResourceName, target_type: TargetType) -> Option<f64> {
        let quantity = match self {
            MetricValue::Number(value) => return Some(*value),
            MetricValue::Quantity(quantity) => quantity.trim(),
        };

        if target_type == TargetType::Utilization {
            return quantity.parse::<f64>().ok();
        }

        let parsed = ParsedQuantity::from_str(quantity).ok()?;
        match resource {
            ResourceName::Cpu => Some(parsed.millicores()),
            ResourceName::Memory => Some(parsed.mebibytes().value),
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Number(value) => f.write_fmt(format_args!("{value}")),
            MetricValue::Quantity(quantity) => f.write_str(quantity),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<i32> for MetricValue {
    fn from(value: i32) -> Self {
        MetricValue::Number(f64::from(value))
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Quantity(value.to_owned())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Quantity(value)
    }
}
