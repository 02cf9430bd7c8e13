use rstest::rstest;

use super::*;

#[rstest]
#[case("deployment", WorkloadKind::Deployment)]
#[case("Deployment", WorkloadKind::Deployment)]
#[case("deploy", WorkloadKind::Deployment)]
#[case("statefulsets", WorkloadKind::StatefulSet)]
#[case("STS", WorkloadKind::StatefulSet)]
fn parse_workload_kind_test(#[case] input: &str, #[case] expected: WorkloadKind) {
    assert_eq!(Ok(expected), input.parse::<WorkloadKind>());
}

#[test]
fn unsupported_workload_kind_test() {
    assert!("daemonset".parse::<WorkloadKind>().is_err());
    assert_eq!("StatefulSet", WorkloadKind::StatefulSet.to_string());
}
