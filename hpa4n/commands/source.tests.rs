use hpa4n_kube::parse_manifests;

use super::*;

const MANIFESTS: &str = r#"
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  namespace: shop
  labels:
    autoscaling.kubesphere.io/scale-target-kind: Deployment
    autoscaling.kubesphere.io/scale-target-name: web
spec:
  scaleTargetRef:
    kind: Deployment
    name: web
  maxReplicas: 4
---
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: db
  namespace: shop
  labels:
    autoscaling.kubesphere.io/scale-target-kind: StatefulSet
    autoscaling.kubesphere.io/scale-target-name: db
spec:
  scaleTargetRef:
    kind: StatefulSet
    name: db
  maxReplicas: 3
---
apiVersion: autoscaling/v2
kind: HorizontalPodAutoscaler
metadata:
  name: web
  namespace: blog
spec:
  scaleTargetRef:
    kind: Deployment
    name: web
  maxReplicas: 2
"#;

fn file_source(namespace: Option<&str>) -> Source {
    Source::File {
        path: PathBuf::from("hpas.yaml"),
        namespace: namespace.map(String::from),
        items: parse_manifests(MANIFESTS).unwrap(),
    }
}

fn names(items: &[HorizontalPodAutoscaler]) -> Vec<String> {
    items
        .iter()
        .map(|hpa| {
            format!(
                "{}/{}",
                hpa.metadata.namespace.as_deref().unwrap_or_default(),
                hpa.metadata.name.as_deref().unwrap_or_default()
            )
        })
        .collect()
}

#[tokio::test]
async fn list_from_file_test() {
    let source = file_source(Some("shop"));

    assert_eq!(vec!["shop/web", "shop/db"], names(&source.list(false, None).await.unwrap()));
    assert_eq!(3, source.list(true, None).await.unwrap().len());
    assert_eq!(3, file_source(None).list(false, None).await.unwrap().len());
}

#[tokio::test]
async fn list_from_file_with_selector_test() {
    let source = file_source(None);

    let items = source
        .list(false, Some("autoscaling.kubesphere.io/scale-target-kind=StatefulSet"))
        .await
        .unwrap();
    assert_eq!(vec!["shop/db"], names(&items));

    let items = source
        .list(
            false,
            Some("autoscaling.kubesphere.io/scale-target-kind=Deployment,autoscaling.kubesphere.io/scale-target-name=web"),
        )
        .await
        .unwrap();
    assert_eq!(vec!["shop/web"], names(&items));
}

#[tokio::test]
async fn get_from_file_test() {
    let hpa = file_source(Some("blog")).get("web").await.unwrap();
    assert_eq!(2, hpa.spec.unwrap().max_replicas);

    let error = file_source(Some("blog")).get("db").await.unwrap_err();
    assert_eq!("horizontalpodautoscaler 'db' not found in 'hpas.yaml'", error.to_string());
}

#[tokio::test]
async fn file_source_has_no_events_test() {
    assert_eq!(None, file_source(None).events("web").await.unwrap());
}

#[test]
fn file_source_has_no_cluster_test() {
    assert!(file_source(None).cluster().is_err());
}
