use anyhow::Result;
use hpa4n_config::Config;
use hpa4n_kube::{HpaClient, HpaSession, WorkloadRef};

use crate::cli::CreateArgs;

/// Creates horizontal pod autoscaler for the workload.
pub async fn run(client: &HpaClient, config: &Config, args: &CreateArgs) -> Result<()> {
    let workload = WorkloadRef::fetch(client.get_client(), client.namespace(), args.kind, &args.workload).await?;

    let mut session = HpaSession::for_create(&workload, &config.defaults);
    session.update(args.to_update());
    session.validate()?;

    let name = session.form().name.clone();
    let created = client.create(&session.to_manifest(), args.dry_run).await?;

    if args.dry_run {
        print!("{}", serde_yaml::to_string(&created)?);
        return Ok(());
    }

    workload.annotate_related_hpa(client.get_client(), &name).await?;
    tracing::info!("Created autoscaler '{}' for {} '{}'", name, workload.kind, workload.name);
    println!("horizontalpodautoscaler/{name} created");

    Ok(())
}
