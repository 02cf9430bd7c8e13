use k8s_openapi::api::autoscaling::v2::{
    HorizontalPodAutoscalerSpec, HorizontalPodAutoscalerStatus, MetricTarget, PodsMetricSource, ResourceMetricStatus,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::*;

fn resource_spec(name: &str, utilization: i32) -> MetricSpec {
    MetricSpec {
        type_: "Resource".to_owned(),
        resource: Some(ResourceMetricSource {
            name: name.to_owned(),
            target: MetricTarget {
                type_: "Utilization".to_owned(),
                average_utilization: Some(utilization),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

fn resource_status(name: &str, value: &str) -> MetricStatus {
    MetricStatus {
        type_: "Resource".to_owned(),
        resource: Some(ResourceMetricStatus {
            name: name.to_owned(),
            current: MetricValueStatus {
                average_value: Some(Quantity(value.to_owned())),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

#[test]
fn find_target_metric_test() {
    let metrics = vec![resource_spec("memory", 70), resource_spec("cpu", 80)];

    let cpu = find_target_metric(&metrics, ResourceName::Cpu).unwrap();
    assert_eq!("cpu", cpu.name);
    assert_eq!(Some(80), cpu.target.average_utilization);

    let memory = find_target_metric(&metrics, ResourceName::Memory).unwrap();
    assert_eq!(Some(70), memory.target.average_utilization);
}

#[test]
fn find_target_metric_absent_test() {
    assert!(find_target_metric(&[], ResourceName::Cpu).is_none());

    let metrics = vec![resource_spec("memory", 70)];
    assert!(find_target_metric(&metrics, ResourceName::Cpu).is_none());
}

#[test]
fn find_target_metric_first_match_test() {
    let metrics = vec![resource_spec("cpu", 50), resource_spec("cpu", 90)];

    let cpu = find_target_metric(&metrics, ResourceName::Cpu).unwrap();
    assert_eq!(Some(50), cpu.target.average_utilization);
}

#[test]
fn find_target_metric_skips_other_types_test() {
    let mut pods_metric = resource_spec("cpu", 10);
    pods_metric.type_ = "Pods".to_owned();
    pods_metric.pods = Some(PodsMetricSource::default());

    let metrics = vec![pods_metric, resource_spec("cpu", 60)];
    let cpu = find_target_metric(&metrics, ResourceName::Cpu).unwrap();
    assert_eq!(Some(60), cpu.target.average_utilization);
}

#[test]
fn find_current_metric_test() {
    let metrics = vec![resource_status("cpu", "250m"), resource_status("memory", "300Mi")];

    let memory = find_current_metric(&metrics, ResourceName::Memory).unwrap();
    assert_eq!(Some(Quantity("300Mi".to_owned())), memory.average_value);

    let cpu = find_current_metric(&metrics, ResourceName::Cpu).unwrap();
    assert_eq!(Some(Quantity("250m".to_owned())), cpu.average_value);

    assert!(find_current_metric(&metrics[..1], ResourceName::Memory).is_none());
}

#[test]
fn hpa_metrics_test() {
    let mut hpa = HorizontalPodAutoscaler::default();
    assert!(target_metrics(&hpa).is_empty());
    assert!(current_metrics(&hpa).is_empty());

    hpa.spec = Some(HorizontalPodAutoscalerSpec {
        metrics: Some(vec![resource_spec("cpu", 80)]),
        ..Default::default()
    });
    hpa.status = Some(HorizontalPodAutoscalerStatus {
        current_metrics: Some(vec![resource_status("memory", "1Gi")]),
        ..Default::default()
    });

    assert_eq!(1, target_metrics(&hpa).len());
    assert_eq!(1, current_metrics(&hpa).len());
}
