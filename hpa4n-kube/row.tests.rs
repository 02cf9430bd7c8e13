use super::*;

fn hpa(yaml: &str) -> HorizontalPodAutoscaler {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn row_from_hpa_test() {
    let hpa = hpa(r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  namespace: shop
  annotations:
    kubesphere.io/alias-name: Storefront
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
    - type: Resource
      resource:
        name: memory
        target:
          type: AverageValue
          averageValue: 1Gi
status:
  currentReplicas: 3
  desiredReplicas: 4
  currentMetrics:
    - type: Resource
      resource:
        name: cpu
        current:
          averageUtilization: 45
          averageValue: 120m
    - type: Resource
      resource:
        name: memory
        current:
          averageValue: "268435456"
  conditions:
    - type: AbleToScale
      status: "True"
    - type: ScalingLimited
      status: "False"
"#);

    let row = HpaRow::from(&hpa);
    assert_eq!("web", row.name);
    assert_eq!("shop", row.namespace);
    assert_eq!(Some("Storefront"), row.alias.as_deref());
    assert_eq!("Deployment/web", row.target);
    assert_eq!("80% / 45%", row.cpu());
    assert_eq!("1024Mi / 256Mi", row.memory());
    assert_eq!("2-8", row.replica_bounds());
    assert_eq!("3/4", row.replicas());
    assert_eq!(None, row.age);
    assert_eq!("A:T S:? L:F", row.conditions.to_string());
}

#[test]
fn row_without_metrics_and_status_test() {
    let hpa = hpa(r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: worker
  namespace: jobs
  creationTimestamp: "2024-01-01T00:00:00Z"
spec:
  scaleTargetRef:
    kind: StatefulSet
    name: worker
  maxReplicas: 3
"#);

    let row = HpaRow::from(&hpa);
    assert_eq!("StatefulSet/worker", row.target);
    assert_eq!("-- / --", row.cpu());
    assert_eq!("-- / --", row.memory());
    assert_eq!("1-3", row.replica_bounds());
    assert_eq!("0/0", row.replicas());
    assert!(row.age.as_deref().is_some_and(|age| age.ends_with('h')));
}
