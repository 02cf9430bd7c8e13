use super::*;

const HPA_WEB: &str = r#"
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
fn multi_document_test() {
    let content = format!(
        "{HPA_WEB}---\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\n---\n{}",
        HPA_WEB.replace("name: web", "name: api")
    );

    let manifests = parse_manifests(&content).unwrap();
    let names = manifests
        .iter()
        .map(|hpa| hpa.metadata.name.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(vec!["web", "api"], names);
}

#[test]
fn list_is_flattened_test() {
    let content = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: autoscaling/v2
    kind: HorizontalPodAutoscaler
    metadata:
      name: first
    spec:
      scaleTargetRef:
        kind: Deployment
        name: first
      maxReplicas: 2
  - apiVersion: v1
    kind: ConfigMap
    metadata:
      name: ignored
---
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscalerList
items:
  - metadata:
      name: second
    spec:
      scaleTargetRef:
        kind: StatefulSet
        name: second
      maxReplicas: 3
"#;

    let manifests = parse_manifests(content).unwrap();
    assert_eq!(2, manifests.len());
    assert_eq!(Some("second"), manifests[1].metadata.name.as_deref());
    assert_eq!(3, manifests[1].spec.as_ref().unwrap().max_replicas);
}

#[test]
fn empty_and_invalid_documents_test() {
    assert!(parse_manifests("").unwrap().is_empty());
    assert!(parse_manifests("---\n---\n").unwrap().is_empty());

    let invalid = "apiVersion: autoscaling/v2\nkind: HorizontalPodAutoscaler\nspec:\n  maxReplicas: many\n";
    assert!(matches!(parse_manifests(invalid), Err(SourceError::ParseError(_))));
}

#[tokio::test]
async fn missing_file_test() {
    let result = load_manifests(Path::new("/nonexistent/hpa4n/manifests.yaml")).await;
    assert!(matches!(result, Err(SourceError::IoError(_))));
}

#[test]
fn manifest_to_patch_test() {
    let content = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  labels:
    app: web
  managedFields:
    - manager: kube-controller-manager
      operation: Update
spec:
  scaleTargetRef:
    kind: Deployment
    name: web
  maxReplicas: 7
status:
  currentReplicas: 2
  desiredReplicas: 2
"#;

    let hpa = parse_manifests(content).unwrap().remove(0);
    let patch = manifest_to_patch(&hpa).unwrap();

    assert_eq!("web", patch["metadata"]["labels"]["app"]);
    assert_eq!(7, patch["spec"]["maxReplicas"]);
    assert_eq!("HorizontalPodAutoscaler", patch["kind"]);
    assert!(patch.get("status").is_none());
    assert!(patch["metadata"].get("managedFields").is_none());
}
