use hpa4n_kube::parse_manifests;

use super::*;

const HPA: &str = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
spec:
  scaleTargetRef:
    kind: Deployment
    name: web
  maxReplicas: 4
"#;

#[test]
fn select_manifest_test() {
    let hpa = select_manifest(parse_manifests(HPA).unwrap(), "web").unwrap();
    assert_eq!(4, hpa.spec.unwrap().max_replicas);
}

#[test]
fn select_manifest_without_name_test() {
    let mut items = parse_manifests(HPA).unwrap();
    items[0].metadata.name = None;

    assert!(select_manifest(items, "web").is_ok());
}

#[test]
fn select_manifest_errors_test() {
    let error = select_manifest(parse_manifests(HPA).unwrap(), "api").unwrap_err();
    assert_eq!("manifest describes 'web' instead of 'api'", error.to_string());

    let error = select_manifest(Vec::new(), "web").unwrap_err();
    assert_eq!(
        "expected exactly one horizontalpodautoscaler in the manifest, found 0",
        error.to_string()
    );

    let twice = format!("{HPA}---{HPA}");
    assert!(select_manifest(parse_manifests(&twice).unwrap(), "web").is_err());
}
