use hpa4n_metrics::{MetricValue, PolicyType};
use k8s_openapi::api::autoscaling::v2::{MetricSpec, MetricTarget, ResourceMetricSource};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use rstest::rstest;

use super::*;
use crate::WorkloadKind;

fn workload() -> WorkloadRef {
    WorkloadRef::new(WorkloadKind::Deployment, "web", "shop", "0c8f6f4a-uid")
}

fn session_with_cpu(value: f64) -> HpaSession {
    let mut session = HpaSession::for_create(&workload(), &SessionDefaults::default());
    session.update(SessionUpdate {
        cpu: Some(MetricUpdate::Set(TargetType::Utilization, value.into())),
        max_replicas: Some(5),
        ..Default::default()
    });
    session
}

fn existing_hpa() -> HorizontalPodAutoscaler {
    let yaml = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: api-hpa
  namespace: shop
  annotations:
    kubesphere.io/alias-name: API
  ownerReferences:
    - apiVersion: apps/v1
      kind: StatefulSet
      name: api
      uid: 7d1e-uid
      controller: true
spec:
  scaleTargetRef:
    apiVersion: apps/v1
    kind: StatefulSet
    name: api
  minReplicas: 2
  maxReplicas: 6
  metrics:
    - type: Resource
      resource:
        name: memory
        target:
          type: AverageValue
          averageValue: 1Gi
  behavior:
    scaleUp:
      selectPolicy: Max
      stabilizationWindowSeconds: 30
      policies:
        - type: Pods
          value: 4
          periodSeconds: 60
"#;

    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn for_create_test() {
    let session = HpaSession::for_create(&workload(), &SessionDefaults::default());
    let form = session.form();

    assert_eq!("web", form.name);
    assert_eq!("shop", form.namespace);
    assert_eq!("Deployment", form.target.kind);
    assert_eq!(1, form.min_replicas);
    assert_eq!(TargetType::Utilization, form.metrics.cpu.target_type);
    assert_eq!(TargetType::AverageValue, form.metrics.memory.target_type);
    assert_eq!(FormBehavior::default(), form.behavior);
    assert!(!session.is_modified());
}

#[test]
fn for_edit_test() {
    let session = HpaSession::for_edit(&existing_hpa(), &SessionDefaults::default());
    let form = session.form();

    assert_eq!("api-hpa", form.name);
    assert_eq!(Some("7d1e-uid"), form.target.uid.as_deref());
    assert_eq!((2, 6), (form.min_replicas, form.max_replicas));
    assert_eq!(Some(MetricValue::from("1Gi")), form.metrics.memory.value);
    assert!(!form.metrics.cpu.is_set());
    assert_eq!(Some(30), form.behavior.scale_up.stabilization_window_seconds);
    assert_eq!(Some("API"), form.alias.as_deref());
    assert_eq!(None, form.description);
}

#[test]
fn policies_are_replaced_not_appended_test() {
    let mut session = HpaSession::for_create(&workload(), &SessionDefaults::default());
    assert_eq!(1, session.form().behavior.scale_down.policies.len());

    session.update(SessionUpdate {
        scale_down: RulesUpdate {
            policies: Some(vec![
                BehaviorPolicy::new(PolicyType::Pods, 1, 60),
                BehaviorPolicy::new(PolicyType::Percent, 10, 60),
            ]),
            ..Default::default()
        },
        ..Default::default()
    });
    session.update(SessionUpdate {
        scale_down: RulesUpdate {
            policies: Some(vec![BehaviorPolicy::new(PolicyType::Pods, 2, 30)]),
            ..Default::default()
        },
        ..Default::default()
    });

    assert_eq!(
        vec![BehaviorPolicy::new(PolicyType::Pods, 2, 30)],
        session.form().behavior.scale_down.policies
    );
    assert_eq!(Some(300), session.form().behavior.scale_down.stabilization_window_seconds);
}

#[test]
fn reset_restores_initial_state_test() {
    let mut session = HpaSession::for_create(&workload(), &SessionDefaults::default());
    session.update(SessionUpdate {
        name: Some("renamed".to_owned()),
        memory: Some(MetricUpdate::Set(TargetType::AverageValue, 512.0.into())),
        scale_up: RulesUpdate {
            select_policy: Some(SelectPolicy::Disabled),
            policies: Some(vec![BehaviorPolicy::new(PolicyType::Percent, 50, 15)]),
            ..Default::default()
        },
        ..Default::default()
    });
    assert!(session.is_modified());

    session.reset();
    assert!(!session.is_modified());
    assert_eq!("web", session.form().name);
    assert!(!session.form().metrics.memory.is_set());
    assert_eq!(FormBehavior::default(), session.form().behavior);
}

#[test]
fn clear_metric_test() {
    let mut session = session_with_cpu(80.0);
    assert!(session.form().metrics.cpu.is_set());

    session.update(SessionUpdate {
        cpu: Some(MetricUpdate::Clear),
        ..Default::default()
    });
    assert!(!session.form().metrics.cpu.is_set());
    assert_eq!(
        Err(SessionError::Metrics(MetricsError::MetricsRequired)),
        session.validate()
    );
}

#[rstest]
#[case(Some(""), None, None, Err(SessionError::NameRequired))]
#[case(None, Some(0), None, Err(SessionError::MinReplicasTooLow))]
#[case(None, Some(3), Some(2), Err(SessionError::MaxReplicasBelowMin))]
#[case(None, Some(3), Some(3), Ok(()))]
fn validate_test(
    #[case] name: Option<&str>,
    #[case] min: Option<i32>,
    #[case] max: Option<i32>,
    #[case] expected: Result<(), SessionError>,
) {
    let mut session = session_with_cpu(80.0);
    session.update(SessionUpdate {
        name: name.map(String::from),
        min_replicas: min,
        max_replicas: max,
        ..Default::default()
    });

    assert_eq!(expected, session.validate());
}

#[test]
fn validate_metrics_and_behavior_test() {
    let session = session_with_cpu(101.0);
    assert_eq!(
        Err(SessionError::Metrics(MetricsError::CpuUtilizationOutOfRange)),
        session.validate()
    );

    let mut session = session_with_cpu(80.0);
    session.update(SessionUpdate {
        scale_up: RulesUpdate {
            stabilization_window_seconds: Some(4_000),
            ..Default::default()
        },
        ..Default::default()
    });
    assert_eq!(
        Err(SessionError::Behavior(BehaviorError::StabilizationWindowOutOfRange(
            ScalingDirection::Up
        ))),
        session.validate()
    );
}

#[test]
fn to_manifest_test() {
    let mut session = session_with_cpu(80.0);
    session.update(SessionUpdate {
        alias: Some("Web".to_owned()),
        ..Default::default()
    });

    let hpa = session.to_manifest();
    let labels = hpa.metadata.labels.as_ref().unwrap();
    assert_eq!("Deployment", labels[SCALE_TARGET_KIND_LABEL]);
    assert_eq!("web", labels[SCALE_TARGET_NAME_LABEL]);

    let annotations = hpa.metadata.annotations.as_ref().unwrap();
    assert_eq!("Web", annotations[ALIAS_ANNOTATION]);
    assert!(!annotations.contains_key(DESCRIPTION_ANNOTATION));

    let owner = &hpa.metadata.owner_references.as_ref().unwrap()[0];
    assert_eq!(("apps/v1", "Deployment", "web"), (owner.api_version.as_str(), owner.kind.as_str(), owner.name.as_str()));
    assert_eq!(Some(true), owner.controller);
    assert_eq!(Some(true), owner.block_owner_deletion);

    let spec = hpa.spec.as_ref().unwrap();
    assert_eq!(Some("apps/v1"), spec.scale_target_ref.api_version.as_deref());
    assert_eq!((Some(1), 5), (spec.min_replicas, spec.max_replicas));
    assert_eq!(
        Some(vec![MetricSpec {
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
        }]),
        spec.metrics
    );

    let yaml = serde_yaml::to_string(&hpa).unwrap();
    assert!(yaml.starts_with("apiVersion: autoscaling/v2\nkind: HorizontalPodAutoscaler\n"));
}

#[test]
fn to_patch_test() {
    let mut session = HpaSession::for_edit(&existing_hpa(), &SessionDefaults::default());
    session.update(SessionUpdate {
        cpu: Some(MetricUpdate::Set(TargetType::AverageValue, 250.0.into())),
        scale_up: RulesUpdate {
            policies: Some(Vec::new()),
            ..Default::default()
        },
        alias: Some(String::new()),
        ..Default::default()
    });

    let patch = session.to_patch();
    assert_eq!(Value::Null, patch["metadata"]["annotations"][ALIAS_ANNOTATION]);
    assert_eq!(2, patch["spec"]["minReplicas"]);
    assert_eq!(6, patch["spec"]["maxReplicas"]);
    assert_eq!("250m", patch["spec"]["metrics"][0]["resource"]["target"]["averageValue"]);
    assert_eq!("1Gi", patch["spec"]["metrics"][1]["resource"]["target"]["averageValue"]);
    assert_eq!(Value::Null, patch["spec"]["behavior"]["scaleUp"]["policies"]);
    assert_eq!(30, patch["spec"]["behavior"]["scaleUp"]["stabilizationWindowSeconds"]);
    assert_eq!(300, patch["spec"]["behavior"]["scaleDown"]["stabilizationWindowSeconds"]);
    assert_eq!("Percent", patch["spec"]["behavior"]["scaleDown"]["policies"][0]["type"]);
}

#[test]
fn update_is_empty_test() {
    assert!(SessionUpdate::default().is_empty());
    assert!(
        !SessionUpdate {
            min_replicas: Some(2),
            ..Default::default()
        }
        .is_empty()
    );
}

#[test]
fn quantity_value_survives_edit_test() {
    let mut hpa = existing_hpa();
    let metric = &mut hpa.spec.as_mut().unwrap().metrics.as_mut().unwrap()[0];
    metric.resource.as_mut().unwrap().target.average_value = Some(Quantity("300M".to_owned()));

    let session = HpaSession::for_edit(&hpa, &SessionDefaults::default());
    let spec = session.to_manifest().spec.unwrap();
    assert_eq!(
        Some(&Quantity("300M".to_owned())),
        spec.metrics.as_ref().unwrap()[0].resource.as_ref().unwrap().target.average_value.as_ref()
    );
}

fn hpa_with_foreign_fields() -> HorizontalPodAutoscaler {
    let yaml = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  namespace: shop
  resourceVersion: "4711"
  labels:
    app: web
  annotations:
    team: checkout
    kubesphere.io/alias-name: Storefront
spec:
  scaleTargetRef:
    apiVersion: apps/v1
    kind: Deployment
    name: web
  minReplicas: 1
  maxReplicas: 4
  metrics:
    - type: Resource
      resource:
        name: cpu
        target:
          type: Utilization
          averageUtilization: 70
    - type: Pods
      pods:
        metric:
          name: requests_per_second
        target:
          type: AverageValue
          averageValue: "100"
"#;

    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn to_edited_keeps_unmanaged_fields_test() {
    let mut session = HpaSession::for_edit(&hpa_with_foreign_fields(), &SessionDefaults::default());
    session.update(SessionUpdate {
        max_replicas: Some(9),
        alias: Some(String::new()),
        ..Default::default()
    });

    let hpa = session.to_edited();
    assert_eq!(Some("4711"), hpa.metadata.resource_version.as_deref());
    assert_eq!(
        Some(&BTreeMap::from([("app".to_owned(), "web".to_owned())])),
        hpa.metadata.labels.as_ref()
    );
    assert_eq!(
        Some(&BTreeMap::from([("team".to_owned(), "checkout".to_owned())])),
        hpa.metadata.annotations.as_ref()
    );
    assert_eq!(None, hpa.metadata.owner_references);

    let spec = hpa.spec.unwrap();
    assert_eq!(9, spec.max_replicas);
    assert_eq!(Some(1), spec.min_replicas);

    let metrics = spec.metrics.unwrap();
    assert_eq!(2, metrics.len());
    assert_eq!(Some(70), metrics[0].resource.as_ref().unwrap().target.average_utilization);
    assert_eq!("Pods", metrics[1].type_);
    assert_eq!("requests_per_second", metrics[1].pods.as_ref().unwrap().metric.name);
}

#[test]
fn to_edited_of_new_autoscaler_test() {
    let session = session_with_cpu(60.0);
    assert_eq!(session.to_manifest(), session.to_edited());
}

#[test]
fn to_patch_keeps_unmanaged_metrics_test() {
    let mut session = HpaSession::for_edit(&hpa_with_foreign_fields(), &SessionDefaults::default());
    session.update(SessionUpdate {
        cpu: Some(MetricUpdate::Clear),
        ..Default::default()
    });

    let patch = session.to_patch();
    let metrics = patch["spec"]["metrics"].as_array().unwrap();
    assert_eq!(1, metrics.len());
    assert_eq!("Pods", metrics[0]["type"]);
    assert_eq!("100", metrics[0]["pods"]["target"]["averageValue"]);
}
