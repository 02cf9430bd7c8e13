use crate::{FormMetric, FormMetrics, ResourceName, TargetType};

#[cfg(test)]
#[path = "./validation.tests.rs"]
mod validation_tests;

/// Possible errors from validating form metrics.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsError {
    /// Neither CPU nor memory target is configured.
    #[error("at least one of CPU or memory targets must be set")]
    MetricsRequired,

    /// CPU utilization is not in the `(0, 100]` range.
    #[error("CPU utilization must be greater than 0 and not greater than 100")]
    CpuUtilizationOutOfRange,

    /// CPU average value is not positive.
    #[error("CPU average value must be greater than 0")]
    CpuAverageValueNotPositive,

    /// Memory utilization is not in the `(0, 100]` range.
    #[error("memory utilization must be greater than 0 and not greater than 100")]
    MemoryUtilizationOutOfRange,

    /// Memory average value is not positive.
    #[error("memory average value must be greater than 0")]
    MemoryAverageValueNotPositive,
}

impl MetricsError {
    /// Returns error code.
    pub fn code(&self) -> &'static str {
        match self {
            MetricsError::MetricsRequired => "MetricsRequired",
            MetricsError::CpuUtilizationOutOfRange => "CpuUtilizationOutOfRange",
            MetricsError::CpuAverageValueNotPositive => "CpuAverageValueNotPositive",
            MetricsError::MemoryUtilizationOutOfRange => "MemoryUtilizationOutOfRange",
            MetricsError::MemoryAverageValueNotPositive => "MemoryAverageValueNotPositive",
        }
    }

    fn out_of_range(metric: &FormMetric) -> Self {
        match (metric.name, metric.target_type) {
            (ResourceName::Cpu, TargetType::Utilization) => MetricsError::CpuUtilizationOutOfRange,
            (ResourceName::Cpu, TargetType::AverageValue) => MetricsError::CpuAverageValueNotPositive,
            (ResourceName::Memory, TargetType::Utilization) => MetricsError::MemoryUtilizationOutOfRange,
            (ResourceName::Memory, TargetType::AverageValue) => MetricsError::MemoryAverageValueNotPositive,
        }
    }
}

/// Validates form metrics.\
/// At least one metric must hold a non-zero value and every configured value, including an explicit zero,
/// must be in range: `(0, 100]` for utilization, positive for average values.
pub fn validate_form_metrics(form: &FormMetrics) -> Result<(), MetricsError> {
    if !form.iter().any(has_non_zero_value) {
        return Err(MetricsError::MetricsRequired);
    }

    form.iter().try_for_each(validate_metric)
}

fn has_non_zero_value(metric: &FormMetric) -> bool {
    metric.is_set() && metric.resolved_value() != Some(0.0)
}

fn validate_metric(metric: &FormMetric) -> Result<(), MetricsError> {
    if !metric.is_set() {
        return Ok(());
    }

    let value = metric.resolved_value();
    let is_valid = match metric.target_type {
        TargetType::Utilization => value.is_some_and(|v| v > 0.0 && v <= 100.0),
        TargetType::AverageValue => value.is_some_and(|v| v > 0.0),
    };

    if is_valid {
        Ok(())
    } else {
        Err(MetricsError::out_of_range(metric))
    }
}
