use hpa4n_metrics::TargetType;
use std::path::PathBuf;

use super::*;

fn temp_config_path(test_name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{APP_NAME}-{test_name}-{}", std::process::id()))
        .join("config.yaml")
}

#[tokio::test]
async fn missing_file_is_created_test() {
    let path = temp_config_path("missing");
    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;

    let config = Config::load_or_create_at(&path).await.unwrap();
    assert_eq!(Config::default(), config);
    assert!(path.exists());

    let loaded = Config::load(&path).await.unwrap();
    assert_eq!(config, loaded);

    tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
}

#[tokio::test]
async fn invalid_file_falls_back_to_defaults_test() {
    let path = temp_config_path("invalid");
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(&path, "wide: [not, a, bool]").await.unwrap();

    let config = Config::load_or_create_at(&path).await.unwrap();
    assert_eq!(Config::default(), config);
    assert_eq!(
        "wide: [not, a, bool]",
        tokio::fs::read_to_string(&path).await.unwrap()
    );

    tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
}

#[tokio::test]
async fn saved_config_is_loaded_test() {
    let path = temp_config_path("saved");
    let mut config = Config {
        wide: true,
        ..Default::default()
    };
    config.defaults.max_replicas = 8;
    config.defaults.cpu_target_type = TargetType::AverageValue;

    config.save(&path).await.unwrap();
    assert_eq!(config, Config::load(&path).await.unwrap());

    tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
}

#[test]
fn default_path_test() {
    assert!(Config::default_path().ends_with(".hpa4n/config.yaml") || Config::default_path() == PathBuf::from("config.yaml"));
}
