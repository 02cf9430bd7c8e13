use k8s_openapi::api::autoscaling::v2::{MetricValueStatus, ResourceMetricSource, ResourceMetricStatus};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use rstest::rstest;

use super::*;

#[rstest]
#[case("0%", Some(MetricValue::Number(0.0)), Some(TargetType::Utilization))]
#[case("80%", Some(MetricValue::Number(80.0)), Some(TargetType::Utilization))]
#[case("12.5%", Some(MetricValue::Number(12.5)), Some(TargetType::Utilization))]
#[case("500m", Some(MetricValue::from("500m")), Some(TargetType::AverageValue))]
#[case("250", Some(MetricValue::Number(250.0)), Some(TargetType::AverageValue))]
#[case("5", Some(MetricValue::Number(5.0)), None)]
#[case("--", None, Some(TargetType::Utilization))]
#[case("--", Some(MetricValue::from("")), Some(TargetType::Utilization))]
#[case("--", None, None)]
fn format_cpu_metric_value_test(
    #[case] expected: &str,
    #[case] value: Option<MetricValue>,
    #[case] target_type: Option<TargetType>,
) {
    assert_eq!(expected, format_cpu_metric_value(value.as_ref(), target_type));
}

#[rstest]
#[case("70%", Some(MetricValue::Number(70.0)), Some(TargetType::Utilization))]
#[case("1024Mi", Some(MetricValue::from("1Gi")), Some(TargetType::AverageValue))]
#[case("512Mi", Some(MetricValue::from("512Mi")), Some(TargetType::AverageValue))]
#[case("1024Mi", Some(MetricValue::Number(1_024.0)), Some(TargetType::AverageValue))]
#[case("0.5Mi", Some(MetricValue::Number(0.5)), Some(TargetType::AverageValue))]
#[case("0Mi", Some(MetricValue::Number(0.0)), Some(TargetType::AverageValue))]
#[case("0Mi", Some(MetricValue::from("bad!")), Some(TargetType::AverageValue))]
#[case("512Mi", Some(MetricValue::from("512Mi")), None)]
#[case("--", None, Some(TargetType::AverageValue))]
#[case("--", Some(MetricValue::from("  ")), Some(TargetType::AverageValue))]
fn format_memory_metric_value_test(
    #[case] expected: &str,
    #[case] value: Option<MetricValue>,
    #[case] target_type: Option<TargetType>,
) {
    assert_eq!(expected, format_memory_metric_value(value.as_ref(), target_type));
}

#[test]
fn format_target_metric_test() {
    let metrics = vec![
        MetricSpec {
            type_: "Resource".to_owned(),
            resource: Some(ResourceMetricSource {
                name: "cpu".to_owned(),
                target: MetricTarget {
                    type_: "Utilization".to_owned(),
                    average_utilization: Some(80),
                    ..Default::default()
                },
            }),
            ..Default::default()
        },
        MetricSpec {
            type_: "Resource".to_owned(),
            resource: Some(ResourceMetricSource {
                name: "memory".to_owned(),
                target: MetricTarget {
                    type_: "AverageValue".to_owned(),
                    average_value: Some(Quantity("1Gi".to_owned())),
                    ..Default::default()
                },
            }),
            ..Default::default()
        },
    ];

    assert_eq!("80%", format_target_metric(&metrics, ResourceName::Cpu));
    assert_eq!("1024Mi", format_target_metric(&metrics, ResourceName::Memory));
    assert_eq!("--", format_target_metric(&metrics[..1], ResourceName::Memory));
}

#[test]
fn format_current_metric_test() {
    let metrics = vec![
        MetricStatus {
            type_: "Resource".to_owned(),
            resource: Some(ResourceMetricStatus {
                name: "cpu".to_owned(),
                current: MetricValueStatus {
                    average_utilization: Some(45),
                    average_value: Some(Quantity("120m".to_owned())),
                    ..Default::default()
                },
            }),
            ..Default::default()
        },
        MetricStatus {
            type_: "Resource".to_owned(),
            resource: Some(ResourceMetricStatus {
                name: "memory".to_owned(),
                current: MetricValueStatus {
                    average_value: Some(Quantity("268435456".to_owned())),
                    ..Default::default()
                },
            }),
            ..Default::default()
        },
    ];

    assert_eq!(
        "45%",
        format_current_metric(&metrics, ResourceName::Cpu, Some(TargetType::Utilization))
    );
    assert_eq!(
        "120m",
        format_current_metric(&metrics, ResourceName::Cpu, Some(TargetType::AverageValue))
    );
    assert_eq!(
        "256Mi",
        format_current_metric(&metrics, ResourceName::Memory, Some(TargetType::AverageValue))
    );
    assert_eq!(
        "--",
        format_current_metric(&metrics, ResourceName::Memory, Some(TargetType::Utilization))
    );
    assert_eq!("--", format_current_metric(&[], ResourceName::Cpu, None));
}
