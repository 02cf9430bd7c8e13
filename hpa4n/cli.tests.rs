use clap::Parser;
use hpa4n_metrics::PolicyType;
use rstest::rstest;

use super::*;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("hpa4n").chain(args.iter().copied())).unwrap()
}

#[test]
fn global_args_test() {
    let args = parse(&["list", "-n", "shop", "--context", "prod", "--wide"]);

    assert_eq!(Some("shop"), args.namespace.as_deref());
    assert_eq!(Some("prod"), args.context.as_deref());
    assert!(matches!(args.command, Command::List(ListArgs { wide: true, .. })));
}

#[rstest]
#[case(&["list"], None)]
#[case(&["list", "--kind", "sts"], Some("autoscaling.kubesphere.io/scale-target-kind=StatefulSet"))]
#[case(
    &["list", "--kind", "deployment", "--workload", "web"],
    Some("autoscaling.kubesphere.io/scale-target-kind=Deployment,autoscaling.kubesphere.io/scale-target-name=web")
)]
fn label_selector_test(#[case] args: &[&str], #[case] expected: Option<&str>) {
    let Command::List(list) = parse(args).command else {
        panic!("expected list command");
    };

    assert_eq!(expected, list.label_selector().as_deref());
}

#[test]
fn create_args_test() {
    let args = parse(&[
        "create",
        "--kind",
        "deployment",
        "--workload",
        "web",
        "--name",
        "web-hpa",
        "--cpu-utilization",
        "80",
        "--memory-average",
        "512Mi",
        "--max",
        "5",
        "--scale-down-policy",
        "Pods:1:60",
        "--scale-down-policy",
        "Percent:10:60",
        "--dry-run",
    ]);

    let Command::Create(create) = args.command else {
        panic!("expected create command");
    };
    assert_eq!(WorkloadKind::Deployment, create.kind);
    assert!(create.dry_run);

    let update = create.to_update();
    assert_eq!(Some("web-hpa"), update.name.as_deref());
    assert_eq!(Some(5), update.max_replicas);
    assert_eq!(None, update.min_replicas);
    assert_eq!(Some(MetricUpdate::Set(TargetType::Utilization, 80.0.into())), update.cpu);
    assert_eq!(Some(MetricUpdate::Set(TargetType::AverageValue, "512Mi".into())), update.memory);
    assert_eq!(RulesUpdate::default(), update.scale_up);
    assert_eq!(
        Some(vec![
            BehaviorPolicy::new(PolicyType::Pods, 1, 60),
            BehaviorPolicy::new(PolicyType::Percent, 10, 60)
        ]),
        update.scale_down.policies
    );
}

#[test]
fn edit_args_test() {
    let args = parse(&[
        "edit",
        "api-hpa",
        "--clear-memory",
        "--no-scale-up-policies",
        "--scale-up-window",
        "60",
        "--scale-up-select",
        "min",
        "--alias",
        "",
    ]);

    let Command::Edit(edit) = args.command else {
        panic!("expected edit command");
    };
    assert_eq!("api-hpa", edit.name);

    let update = edit.changes.to_update();
    assert_eq!(None, update.cpu);
    assert_eq!(Some(MetricUpdate::Clear), update.memory);
    assert_eq!(
        RulesUpdate {
            select_policy: Some(SelectPolicy::Min),
            stabilization_window_seconds: Some(60),
            policies: Some(Vec::new()),
        },
        update.scale_up
    );
    assert_eq!(Some(""), update.alias.as_deref());
}

#[test]
fn empty_edit_args_test() {
    let Command::Edit(edit) = parse(&["edit", "api-hpa"]).command else {
        panic!("expected edit command");
    };

    assert!(edit.changes.to_update().is_empty());
}

#[test]
fn edit_from_yaml_args_test() {
    let Command::Edit(edit) = parse(&["edit", "api-hpa", "--from-yaml", "api-hpa.yaml", "--dry-run"]).command else {
        panic!("expected edit command");
    };

    assert_eq!(Some(PathBuf::from("api-hpa.yaml")), edit.from_yaml);
    assert!(edit.dry_run);
    assert!(edit.changes.to_update().is_empty());
}

#[rstest]
#[case(&["edit", "x", "--cpu-utilization", "80", "--cpu-average", "250m"])]
#[case(&["edit", "x", "--memory-average", "1Gi", "--clear-memory"])]
#[case(&["edit", "x", "--scale-up-policy", "Pods:1:60", "--no-scale-up-policies"])]
#[case(&["edit", "x", "--scale-down-policy", "Nodes:1:60"])]
#[case(&["edit", "x", "--scale-down-select", "Avg"])]
#[case(&["create", "--kind", "daemonset", "--workload", "web"])]
#[case(&["delete"])]
fn invalid_args_test(#[case] args: &[&str]) {
    assert!(Args::try_parse_from(std::iter::once("hpa4n").chain(args.iter().copied())).is_err());
}
