use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscalerStatus;

use super::*;

fn condition(type_: &str, status: &str, reason: &str) -> HorizontalPodAutoscalerCondition {
    HorizontalPodAutoscalerCondition {
        type_: type_.to_owned(),
        status: status.to_owned(),
        reason: Some(reason.to_owned()),
        message: Some(format!("{type_} message")),
        ..Default::default()
    }
}

fn hpa_with(conditions: Vec<HorizontalPodAutoscalerCondition>) -> HorizontalPodAutoscaler {
    HorizontalPodAutoscaler {
        status: Some(HorizontalPodAutoscalerStatus {
            conditions: Some(conditions),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn summary_test() {
    let hpa = hpa_with(vec![
        condition(SCALING_LIMITED, "False", "DesiredWithinRange"),
        condition(ABLE_TO_SCALE, "True", "ReadyForNewScale"),
        condition(SCALING_ACTIVE, "True", "ValidMetricFound"),
        condition("Other", "False", "Ignored"),
    ]);

    let summary = ConditionSummary::from(&hpa);
    assert_eq!("A:T S:T L:F", summary.to_string());
    assert_eq!(Some("ValidMetricFound"), summary.scaling_active.reason.as_deref());
    assert_eq!(Some("AbleToScale message"), summary.able_to_scale.message.as_deref());
}

#[test]
fn missing_conditions_are_unknown_test() {
    let summary = ConditionSummary::from(&HorizontalPodAutoscaler::default());
    assert_eq!("A:? S:? L:?", summary.to_string());
    assert!(summary.iter().all(|(_, state)| state.status_str() == "Unknown"));

    let hpa = hpa_with(vec![condition(SCALING_ACTIVE, "Unknown", "FailedGetResourceMetric")]);
    let summary = ConditionSummary::from(&hpa);
    assert_eq!("A:? S:? L:?", summary.to_string());
    assert_eq!(Some("FailedGetResourceMetric"), summary.scaling_active.reason.as_deref());
}

#[test]
fn iter_order_test() {
    let names = ConditionSummary::default().iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(vec![ABLE_TO_SCALE, SCALING_ACTIVE, SCALING_LIMITED], names);
}
