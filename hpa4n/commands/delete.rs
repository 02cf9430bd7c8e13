use anyhow::Result;
use hpa4n_kube::HpaClient;

/// Deletes horizontal pod autoscalers, stops on the first failure.
pub async fn run(client: &HpaClient, names: &[String]) -> Result<()> {
    for name in names {
        client.delete(name).await?;
        tracing::info!("Deleted autoscaler '{}' in '{}'", name, client.namespace());
        println!("horizontalpodautoscaler/{name} deleted");
    }

    Ok(())
}
