use anyhow::{Result, bail};
use hpa4n_config::Config;
use hpa4n_kube::{HpaClient, HpaSession, load_manifests, manifest_to_patch};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::serde_json::Value;
use std::path::Path;

use crate::cli::EditArgs;
use crate::commands::Source;

#[cfg(test)]
#[path = "./edit.tests.rs"]
mod edit_tests;

/// Applies changes to the horizontal pod autoscaler.\
/// **Note** that with `--file` the edited manifest is printed instead of being sent to the cluster.
pub async fn run(source: &Source, config: &Config, args: &EditArgs) -> Result<()> {
    if let Some(path) = &args.from_yaml {
        if !args.changes.to_update().is_empty() {
            bail!("--from-yaml cannot be combined with other changes");
        }

        return replace_from_yaml(source.cluster()?, args, path).await;
    }

    let hpa = source.get(&args.name).await?;

    let mut session = HpaSession::for_edit(&hpa, &config.defaults);
    session.update(args.changes.to_update());
    if !session.is_modified() {
        println!("horizontalpodautoscaler/{} unchanged", args.name);
        return Ok(());
    }

    session.validate()?;

    match source {
        Source::Cluster(client) => send_patch(client, args, &session.to_patch()).await?,
        Source::File { .. } => print!("{}", serde_yaml::to_string(&session.to_edited())?),
    }

    Ok(())
}

async fn replace_from_yaml(client: &HpaClient, args: &EditArgs, path: &Path) -> Result<()> {
    let hpa = select_manifest(load_manifests(path).await?, &args.name)?;
    tracing::debug!("Replacing autoscaler '{}' with '{}'", args.name, path.display());
    send_patch(client, args, &manifest_to_patch(&hpa)?).await
}

async fn send_patch(client: &HpaClient, args: &EditArgs, patch: &Value) -> Result<()> {
    let patched = client.patch(&args.name, patch, args.dry_run).await?;
    if args.dry_run {
        print!("{}", serde_yaml::to_string(&patched)?);
    } else {
        tracing::info!("Edited autoscaler '{}'", args.name);
        println!("horizontalpodautoscaler/{} edited", args.name);
    }

    Ok(())
}

/// Returns the only autoscaler from the edited manifests, it must be the one named `name`.
fn select_manifest(mut items: Vec<HorizontalPodAutoscaler>, name: &str) -> Result<HorizontalPodAutoscaler> {
    if items.len() != 1 {
        bail!("expected exactly one horizontalpodautoscaler in the manifest, found {}", items.len());
    }

    let hpa = items.remove(0);
    if let Some(manifest_name) = hpa.metadata.name.as_deref().filter(|n| *n != name) {
        bail!("manifest describes '{}' instead of '{}'", manifest_name, name);
    }

    Ok(hpa)
}
