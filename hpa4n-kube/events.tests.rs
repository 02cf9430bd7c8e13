use k8s_openapi::api::core::v1::Event;

use super::*;

fn event(yaml: &str) -> Event {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn event_selector_test() {
    assert_eq!(
        "involvedObject.kind=HorizontalPodAutoscaler,involvedObject.name=web",
        event_selector("web")
    );
}

#[test]
fn event_row_from_core_event_test() {
    let row = EventRow::from(&event(
        r#"
metadata:
  name: web.17a
  namespace: shop
involvedObject:
  kind: HorizontalPodAutoscaler
  name: web
type: Normal
reason: SuccessfulRescale
message: "New size: 3; reason: cpu resource utilization above target\n"
count: 4
source:
  component: horizontal-pod-autoscaler
lastTimestamp: "2026-10-01T10:00:00Z"
"#,
    ));

    assert_eq!("Normal", row.event_type);
    assert_eq!("SuccessfulRescale", row.reason);
    assert_eq!("horizontal-pod-autoscaler", row.from);
    assert_eq!("New size: 3; reason: cpu resource utilization above target", row.message);
    assert_eq!(4, row.count);
    assert_eq!(Some("2026-10-01T10:00:00Z".parse().unwrap()), row.last_seen);
}

#[test]
fn event_row_fallbacks_test() {
    let row = EventRow::from(&event(
        r#"
metadata:
  name: web.17b
  creationTimestamp: "2026-10-01T09:00:00Z"
involvedObject:
  kind: HorizontalPodAutoscaler
  name: web
type: Warning
reason: FailedGetResourceMetric
reportingComponent: kube-controller-manager
eventTime: "2026-10-01T11:00:00.000000Z"
"#,
    ));

    assert_eq!("kube-controller-manager", row.from);
    assert_eq!(1, row.count);
    assert_eq!(Some("2026-10-01T11:00:00Z".parse().unwrap()), row.last_seen);

    let row = EventRow::from(&event(
        r#"
metadata:
  name: web.17c
  creationTimestamp: "2026-10-01T09:00:00Z"
involvedObject:
  name: web
"#,
    ));
    assert_eq!(Some("2026-10-01T09:00:00Z".parse().unwrap()), row.last_seen);
    assert_eq!(None, EventRow { last_seen: None, ..row }.age());
}

#[test]
fn to_event_rows_sorts_newest_first_test() {
    let events = ["08", "10", "09"]
        .iter()
        .map(|hour| {
            event(&format!(
                "metadata:\n  name: e{hour}\ninvolvedObject:\n  name: web\nreason: R{hour}\nlastTimestamp: \"2026-10-01T{hour}:00:00Z\"\n"
            ))
        })
        .collect::<Vec<_>>();

    let reasons = to_event_rows(&events).into_iter().map(|r| r.reason).collect::<Vec<_>>();
    assert_eq!(vec!["R10", "R09", "R08"], reasons);
}
