use rstest::rstest;

use super::*;

fn cpu_utilization(value: i32) -> MetricSpec {
    MetricSpec {
        type_: "Resource".to_owned(),
        resource: Some(ResourceMetricSource {
            name: "cpu".to_owned(),
            target: MetricTarget {
                type_: "Utilization".to_owned(),
                average_utilization: Some(value),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

fn average_value(name: &str, value: &str) -> MetricSpec {
    MetricSpec {
        type_: "Resource".to_owned(),
        resource: Some(ResourceMetricSource {
            name: name.to_owned(),
            target: MetricTarget {
                type_: "AverageValue".to_owned(),
                average_value: Some(Quantity(value.to_owned())),
                ..Default::default()
            },
        }),
        ..Default::default()
    }
}

#[test]
fn cpu_utilization_round_trip_test() {
    let metrics = vec![cpu_utilization(80)];
    let form = spec_to_form_metrics(&metrics);

    assert_eq!(
        FormMetric::new(ResourceName::Cpu, TargetType::Utilization).with_value(80),
        form.cpu
    );
    assert_eq!(FormMetric::new(ResourceName::Memory, TargetType::AverageValue), form.memory);
    assert_eq!(metrics, form_metrics_to_spec(&form));
}

#[test]
fn memory_average_value_test() {
    let mut form = FormMetrics::default();
    form.memory.set(TargetType::AverageValue, 512.0);

    let metrics = form_metrics_to_spec(&form);
    assert_eq!(vec![average_value("memory", "512Mi")], metrics);

    let decoded = spec_to_form_metrics(&metrics);
    assert_eq!(Some(MetricValue::from("512Mi")), decoded.memory.value);
    assert_eq!(Some(512.0), decoded.memory.resolved_value());
    assert_eq!(metrics, form_metrics_to_spec(&decoded));
}

#[rstest]
#[case("500m", MetricValue::Number(500.0), "500m")]
#[case("0.5m", MetricValue::Number(0.5), "0.5m")]
#[case("1", MetricValue::Number(1_000.0), "1000m")]
#[case("1.5", MetricValue::Number(1_500.0), "1500m")]
#[case("2", MetricValue::Number(2_000.0), "2000m")]
#[case("2k", MetricValue::from("2k"), "2k")]
fn cpu_average_value_test(#[case] quantity: &str, #[case] expected: MetricValue, #[case] encoded: &str) {
    let form = spec_to_form_metrics(&[average_value("cpu", quantity)]);

    assert_eq!(TargetType::AverageValue, form.cpu.target_type);
    assert_eq!(Some(expected), form.cpu.value);
    assert_eq!(vec![average_value("cpu", encoded)], form_metrics_to_spec(&form));
}

#[rstest]
#[case("1Gi")]
#[case("300M")]
#[case("268435456")]
fn memory_quantity_is_preserved_test(#[case] quantity: &str) {
    let metrics = vec![average_value("memory", quantity)];
    let form = spec_to_form_metrics(&metrics);

    assert_eq!(Some(MetricValue::from(quantity)), form.memory.value);
    assert_eq!(metrics, form_metrics_to_spec(&form));
}

#[test]
fn explicit_zero_is_emitted_test() {
    let mut form = FormMetrics::default();
    form.cpu.set(TargetType::Utilization, 0.0);

    assert_eq!(vec![cpu_utilization(0)], form_metrics_to_spec(&form));
}

#[test]
fn unset_metrics_are_omitted_test() {
    let mut form = FormMetrics::default();
    assert!(form_metrics_to_spec(&form).is_empty());

    form.memory.set(TargetType::AverageValue, "");
    assert!(form_metrics_to_spec(&form).is_empty());

    form.memory.set(TargetType::AverageValue, 256.0);
    assert_eq!(1, form_metrics_to_spec(&form).len());

    form.memory.clear();
    assert!(form_metrics_to_spec(&form).is_empty());
}

#[test]
fn cpu_goes_before_memory_test() {
    let mut form = FormMetrics::default();
    form.memory.set(TargetType::Utilization, 60.0);
    form.cpu.set(TargetType::AverageValue, 250.0);

    let metrics = form_metrics_to_spec(&form);
    let names = metrics
        .iter()
        .map(|m| m.resource.as_ref().unwrap().name.as_str())
        .collect::<Vec<_>>();

    assert_eq!(vec!["cpu", "memory"], names);
    assert_eq!(Some(Quantity("250m".to_owned())), metrics[0].resource.as_ref().unwrap().target.average_value);
    assert_eq!(Some(60), metrics[1].resource.as_ref().unwrap().target.average_utilization);
}

#[test]
fn utilization_is_rounded_test() {
    let mut form = FormMetrics::default();
    form.cpu.set(TargetType::Utilization, 80.6);

    assert_eq!(vec![cpu_utilization(81)], form_metrics_to_spec(&form));

    form.cpu.set(TargetType::Utilization, "not a number");
    assert!(form_metrics_to_spec(&form).is_empty());
}

#[test]
fn unknown_target_type_uses_defaults_test() {
    let mut metric = average_value("memory", "1Gi");
    metric.resource.as_mut().unwrap().target.type_ = "Value".to_owned();

    let form = spec_to_form_metrics(&[metric]);
    assert_eq!(TargetType::AverageValue, form.memory.target_type);
    assert_eq!(Some(MetricValue::from("1Gi")), form.memory.value);
    assert_eq!(TargetType::Utilization, form.cpu.target_type);
    assert_eq!(None, form.cpu.value);
}

#[test]
fn get_metric_test() {
    let mut form = FormMetrics::new(TargetType::AverageValue, TargetType::Utilization);
    form.get_mut(ResourceName::Memory).set(TargetType::Utilization, 75.0);

    assert_eq!(TargetType::AverageValue, form.get(ResourceName::Cpu).target_type);
    assert_eq!(Some(75.0), form.get(ResourceName::Memory).resolved_value());
    assert!(!form.get(ResourceName::Cpu).is_set());
}
