use rstest::rstest;

use super::*;

fn scaling_rules(select: &str, window: Option<i32>, policies: &[(&str, i32, i32)]) -> HPAScalingRules {
    HPAScalingRules {
        select_policy: Some(select.to_owned()),
        stabilization_window_seconds: window,
        policies: if policies.is_empty() {
            None
        } else {
            Some(
                policies
                    .iter()
                    .map(|(type_, value, period_seconds)| HPAScalingPolicy {
                        type_: (*type_).to_owned(),
                        value: *value,
                        period_seconds: *period_seconds,
                    })
                    .collect(),
            )
        },
        ..Default::default()
    }
}

#[test]
fn default_behavior_to_spec_test() {
    let spec = behavior_to_spec(&FormBehavior::default());

    assert_eq!(Some(scaling_rules("Max", Some(0), &[])), spec.scale_up);
    assert_eq!(Some(scaling_rules("Max", Some(300), &[("Percent", 100, 15)])), spec.scale_down);
}

#[test]
fn behavior_round_trip_test() {
    let spec = HorizontalPodAutoscalerBehavior {
        scale_up: Some(scaling_rules("Min", Some(60), &[("Pods", 4, 60), ("Percent", 50, 30)])),
        scale_down: Some(scaling_rules("Disabled", None, &[])),
    };

    let form = spec_to_behavior(Some(&spec));
    assert_eq!(SelectPolicy::Min, form.scale_up.select_policy);
    assert_eq!(
        vec![
            BehaviorPolicy::new(PolicyType::Pods, 4, 60),
            BehaviorPolicy::new(PolicyType::Percent, 50, 30)
        ],
        form.scale_up.policies
    );
    assert_eq!(SelectPolicy::Disabled, form.scale_down.select_policy);
    assert_eq!(None, form.scale_down.stabilization_window_seconds);

    assert_eq!(spec, behavior_to_spec(&form));
}

#[test]
fn missing_behavior_uses_defaults_test() {
    assert_eq!(FormBehavior::default(), spec_to_behavior(None));

    let spec = HorizontalPodAutoscalerBehavior {
        scale_up: Some(scaling_rules("Max", Some(15), &[])),
        scale_down: None,
    };
    let form = spec_to_behavior(Some(&spec));
    assert_eq!(Some(15), form.scale_up.stabilization_window_seconds);
    assert_eq!(FormScalingRules::scale_down_default(), form.scale_down);
}

#[test]
fn unknown_values_are_normalized_test() {
    let spec = HorizontalPodAutoscalerBehavior {
        scale_up: Some(scaling_rules("Whatever", Some(0), &[("Nodes", 1, 10), ("Pods", 2, 10)])),
        scale_down: None,
    };

    let form = spec_to_behavior(Some(&spec));
    assert_eq!(SelectPolicy::Max, form.scale_up.select_policy);
    assert_eq!(vec![BehaviorPolicy::new(PolicyType::Pods, 2, 10)], form.scale_up.policies);
}

#[test]
fn set_policies_replaces_all_test() {
    let mut behavior = FormBehavior::default();
    behavior
        .rules_mut(ScalingDirection::Down)
        .set_policies(vec![BehaviorPolicy::new(PolicyType::Pods, 1, 60)]);

    assert_eq!(
        &vec![BehaviorPolicy::new(PolicyType::Pods, 1, 60)],
        &behavior.rules(ScalingDirection::Down).policies
    );

    behavior.rules_mut(ScalingDirection::Down).set_policies(Vec::new());
    assert_eq!(None, behavior_to_spec(&behavior).scale_down.and_then(|r| r.policies));
}

#[rstest]
#[case("Percent:100:15", Ok(BehaviorPolicy::new(PolicyType::Percent, 100, 15)))]
#[case("pods:4:60", Ok(BehaviorPolicy::new(PolicyType::Pods, 4, 60)))]
#[case(" Pods : 2 : 30 ", Ok(BehaviorPolicy::new(PolicyType::Pods, 2, 30)))]
#[case("Nodes:1:10", Err(BehaviorError::InvalidPolicy("Nodes:1:10".to_owned())))]
#[case("Pods:4", Err(BehaviorError::InvalidPolicy("Pods:4".to_owned())))]
#[case("Pods:x:60", Err(BehaviorError::InvalidPolicy("Pods:x:60".to_owned())))]
#[case("Pods:4:60:1", Err(BehaviorError::InvalidPolicy("Pods:4:60:1".to_owned())))]
fn parse_policy_test(#[case] input: &str, #[case] expected: Result<BehaviorPolicy, BehaviorError>) {
    assert_eq!(expected, input.parse::<BehaviorPolicy>());
}

#[rstest]
#[case(Ok(()), Some(0), 4, 60)]
#[case(Ok(()), Some(3_600), 1, 1_800)]
#[case(Ok(()), None, 100, 1)]
#[case(Err(BehaviorError::StabilizationWindowOutOfRange(ScalingDirection::Up)), Some(3_601), 4, 60)]
#[case(Err(BehaviorError::StabilizationWindowOutOfRange(ScalingDirection::Up)), Some(-1), 4, 60)]
#[case(Err(BehaviorError::PolicyValueNotPositive(ScalingDirection::Up)), Some(0), 0, 60)]
#[case(Err(BehaviorError::PolicyPeriodOutOfRange(ScalingDirection::Up)), Some(0), 4, 0)]
#[case(Err(BehaviorError::PolicyPeriodOutOfRange(ScalingDirection::Up)), Some(0), 4, 1_801)]
fn validate_scale_up_test(
    #[case] expected: Result<(), BehaviorError>,
    #[case] window: Option<i32>,
    #[case] value: i32,
    #[case] period: i32,
) {
    let mut behavior = FormBehavior::default();
    behavior.scale_up.stabilization_window_seconds = window;
    behavior
        .scale_up
        .set_policies(vec![BehaviorPolicy::new(PolicyType::Pods, value, period)]);

    assert_eq!(expected, validate_behavior(&behavior));
}

#[test]
fn validate_scale_down_test() {
    let mut behavior = FormBehavior::default();
    assert_eq!(Ok(()), validate_behavior(&behavior));

    behavior.scale_down.policies[0].value = -10;
    assert_eq!(
        Err(BehaviorError::PolicyValueNotPositive(ScalingDirection::Down)),
        validate_behavior(&behavior)
    );
    assert_eq!(
        "scale-down policy value must be greater than 0",
        BehaviorError::PolicyValueNotPositive(ScalingDirection::Down).to_string()
    );
}

#[test]
fn behavior_config_serde_test() {
    let yaml = r#"
scaleDown:
  selectPolicy: Min
  stabilizationWindowSeconds: 120
  policies:
    - type: Pods
      value: 2
      periodSeconds: 60
"#;

    let behavior = serde_yaml::from_str::<FormBehavior>(yaml).unwrap();
    assert_eq!(FormScalingRules::scale_up_default(), behavior.scale_up);
    assert_eq!(SelectPolicy::Min, behavior.scale_down.select_policy);
    assert_eq!(Some(120), behavior.scale_down.stabilization_window_seconds);
    assert_eq!(vec![BehaviorPolicy::new(PolicyType::Pods, 2, 60)], behavior.scale_down.policies);
}

#[rstest]
#[case("Max", Ok(SelectPolicy::Max))]
#[case("min", Ok(SelectPolicy::Min))]
#[case("DISABLED", Ok(SelectPolicy::Disabled))]
#[case("Avg", Err(BehaviorError::InvalidSelectPolicy("Avg".to_owned())))]
fn parse_select_policy_test(#[case] input: &str, #[case] expected: Result<SelectPolicy, BehaviorError>) {
    assert_eq!(expected, input.parse::<SelectPolicy>());
}
