use super::*;

const HPA: &str = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  namespace: shop
  annotations:
    kubesphere.io/alias-name: Storefront
    kubesphere.io/description: Main shop
spec:
  scaleTargetRef:
    apiVersion: apps/v1
    kind: Deployment
    name: web
  minReplicas: 2
  maxReplicas: 8
  metrics:
    - type: Resource
      resource:
        name: cpu
        target:
          type: Utilization
          averageUtilization: 80
  behavior:
    scaleDown:
      selectPolicy: Min
      stabilizationWindowSeconds: 120
      policies:
        - type: Pods
          value: 2
          periodSeconds: 60
status:
  currentReplicas: 3
  desiredReplicas: 4
  currentMetrics:
    - type: Resource
      resource:
        name: cpu
        current:
          averageUtilization: 45
  conditions:
    - type: AbleToScale
      status: "True"
      reason: ReadyForNewScale
      message: recommended size matches current size
    - type: ScalingActive
      status: "True"
      reason: ValidMetricFound
"#;

#[test]
fn render_description_test() {
    let hpa = serde_yaml::from_str::<HorizontalPodAutoscaler>(HPA).unwrap();

    let expected = [
        "Name:         web",
        "Namespace:    shop",
        "Alias:        Storefront",
        "Description:  Main shop",
        "Target:       Deployment/web",
        "Replicas:     2-8 (current 3, desired 4)",
        "Age:          --",
        "Metrics:",
        "  cpu:        Utilization 80% (current 45%)",
        "  memory:     --",
        "Behavior:",
        "  scale-up:   cluster defaults",
        "  scale-down: select Min, window 120s, policies 2 pods / 60s",
        "Conditions:",
        "  TYPE            STATUS   REASON            MESSAGE",
        "  AbleToScale     True     ReadyForNewScale  recommended size matches current size",
        "  ScalingActive   True     ValidMetricFound",
        "  ScalingLimited  Unknown",
        "",
    ];

    assert_eq!(expected.join("\n"), render_description(&hpa, None));
}

fn event_row(event_type: &str, reason: &str, message: &str, count: i32) -> EventRow {
    EventRow {
        event_type: event_type.to_owned(),
        reason: reason.to_owned(),
        from: "horizontal-pod-autoscaler".to_owned(),
        message: message.to_owned(),
        count,
        last_seen: None,
    }
}

#[test]
fn render_description_with_events_test() {
    let hpa = serde_yaml::from_str::<HorizontalPodAutoscaler>(HPA).unwrap();
    let events = [
        event_row("Warning", "FailedGetScale", r#"deployments/scale.apps "web" not found"#, 1),
        event_row("Normal", "SuccessfulRescale", "New size: 4", 3),
    ];

    let description = render_description(&hpa, Some(&events[..]));
    let expected = [
        "Events:",
        "  TYPE     REASON             AGE      FROM                       MESSAGE",
        r#"  Warning  FailedGetScale     --       horizontal-pod-autoscaler  deployments/scale.apps "web" not found"#,
        "  Normal   SuccessfulRescale  -- (x3)  horizontal-pod-autoscaler  New size: 4",
        "",
    ];
    assert!(description.ends_with(&expected.join("\n")));
    assert!(description.starts_with("Name:         web\n"));
}

#[test]
fn render_description_without_events_test() {
    let hpa = serde_yaml::from_str::<HorizontalPodAutoscaler>(HPA).unwrap();
    let none: &[EventRow] = &[];
    assert!(render_description(&hpa, Some(none)).ends_with("Events:\n  <none>\n"));
    assert!(!render_description(&hpa, None).contains("Events:"));
}

#[test]
fn describe_rules_test() {
    assert_eq!(
        "select Max, window 300s, policies 100% / 15s",
        describe_rules(&FormScalingRules::scale_down_default())
    );
    assert_eq!(
        "select Max, window 0s, policies none",
        describe_rules(&FormScalingRules::scale_up_default())
    );
}
