use rstest::rstest;

use super::*;
use crate::MetricValue;

fn form(cpu: Option<(TargetType, MetricValue)>, memory: Option<(TargetType, MetricValue)>) -> FormMetrics {
    let mut form = FormMetrics::new(TargetType::Utilization, TargetType::Utilization);
    if let Some((target_type, value)) = cpu {
        form.cpu.set(target_type, value);
    }

    if let Some((target_type, value)) = memory {
        form.memory.set(target_type, value);
    }

    form
}

#[rstest]
#[case(Ok(()), 100.0)]
#[case(Ok(()), 1.0)]
#[case(Ok(()), 0.5)]
#[case(Err(MetricsError::CpuUtilizationOutOfRange), 101.0)]
#[case(Err(MetricsError::CpuUtilizationOutOfRange), -5.0)]
#[case(Err(MetricsError::MetricsRequired), 0.0)]
fn cpu_utilization_boundary_test(#[case] expected: Result<(), MetricsError>, #[case] value: f64) {
    let form = form(Some((TargetType::Utilization, value.into())), None);
    assert_eq!(expected, validate_form_metrics(&form));
}

#[test]
fn metrics_required_test() {
    assert_eq!(Err(MetricsError::MetricsRequired), validate_form_metrics(&form(None, None)));

    let empty = form(
        Some((TargetType::Utilization, "".into())),
        Some((TargetType::AverageValue, " ".into())),
    );
    assert_eq!(Err(MetricsError::MetricsRequired), validate_form_metrics(&empty));

    let zeros = form(
        Some((TargetType::AverageValue, 0.0.into())),
        Some((TargetType::AverageValue, "0Mi".into())),
    );
    assert_eq!(Err(MetricsError::MetricsRequired), validate_form_metrics(&zeros));
}

#[test]
fn explicit_zero_next_to_valid_metric_test() {
    let form = form(
        Some((TargetType::Utilization, 80.0.into())),
        Some((TargetType::AverageValue, 0.0.into())),
    );

    assert_eq!(Err(MetricsError::MemoryAverageValueNotPositive), validate_form_metrics(&form));
}

#[rstest]
#[case(Ok(()), TargetType::AverageValue, MetricValue::Number(250.0))]
#[case(Ok(()), TargetType::AverageValue, MetricValue::from("500m"))]
#[case(Err(MetricsError::CpuAverageValueNotPositive), TargetType::AverageValue, MetricValue::Number(-1.0))]
#[case(Err(MetricsError::CpuAverageValueNotPositive), TargetType::AverageValue, MetricValue::from("cores"))]
#[case(Err(MetricsError::CpuUtilizationOutOfRange), TargetType::Utilization, MetricValue::from("high"))]
fn cpu_metric_test(#[case] expected: Result<(), MetricsError>, #[case] target_type: TargetType, #[case] value: MetricValue) {
    let form = form(Some((target_type, value)), None);
    assert_eq!(expected, validate_form_metrics(&form));
}

#[rstest]
#[case(Ok(()), TargetType::AverageValue, MetricValue::Number(512.0))]
#[case(Ok(()), TargetType::AverageValue, MetricValue::from("1Gi"))]
#[case(Ok(()), TargetType::Utilization, MetricValue::Number(100.0))]
#[case(Err(MetricsError::MemoryUtilizationOutOfRange), TargetType::Utilization, MetricValue::Number(150.0))]
#[case(Err(MetricsError::MemoryAverageValueNotPositive), TargetType::AverageValue, MetricValue::from("-1Gi"))]
#[case(Err(MetricsError::MemoryAverageValueNotPositive), TargetType::AverageValue, MetricValue::from("abc123xyz!"))]
fn memory_metric_test(
    #[case] expected: Result<(), MetricsError>,
    #[case] target_type: TargetType,
    #[case] value: MetricValue,
) {
    let form = form(None, Some((target_type, value)));
    assert_eq!(expected, validate_form_metrics(&form));
}

#[test]
fn cpu_is_checked_before_memory_test() {
    let form = form(
        Some((TargetType::Utilization, 120.0.into())),
        Some((TargetType::Utilization, 120.0.into())),
    );

    assert_eq!(Err(MetricsError::CpuUtilizationOutOfRange), validate_form_metrics(&form));
}

#[test]
fn error_code_test() {
    assert_eq!("MetricsRequired", MetricsError::MetricsRequired.code());
    assert_eq!(
        "MemoryAverageValueNotPositive",
        MetricsError::MemoryAverageValueNotPositive.code()
    );
}
