use hpa4n_metrics::{PolicyType, SelectPolicy};

use super::*;

#[test]
fn empty_document_uses_defaults_test() {
    let defaults = serde_yaml::from_str::<SessionDefaults>("{}").unwrap();
    assert_eq!(SessionDefaults::default(), defaults);
    assert_eq!(TargetType::Utilization, defaults.form_metrics().cpu.target_type);
    assert_eq!(TargetType::AverageValue, defaults.form_metrics().memory.target_type);
}

#[test]
fn partial_document_test() {
    let yaml = r#"
maxReplicas: 5
memoryTargetType: Utilization
behavior:
  scaleUp:
    selectPolicy: Min
    policies:
      - type: Percent
        value: 50
        periodSeconds: 30
"#;

    let defaults = serde_yaml::from_str::<SessionDefaults>(yaml).unwrap();
    assert_eq!(1, defaults.min_replicas);
    assert_eq!(5, defaults.max_replicas);
    assert_eq!(TargetType::Utilization, defaults.memory_target_type);
    assert_eq!(SelectPolicy::Min, defaults.behavior.scale_up.select_policy);
    assert_eq!(None, defaults.behavior.scale_up.stabilization_window_seconds);
    assert_eq!(PolicyType::Percent, defaults.behavior.scale_up.policies[0].policy_type);
    assert_eq!(Some(300), defaults.behavior.scale_down.stabilization_window_seconds);
}
