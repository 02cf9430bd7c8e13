use clap::{Parser, Subcommand};
use hpa4n_kube::{MetricUpdate, RulesUpdate, SCALE_TARGET_KIND_LABEL, SCALE_TARGET_NAME_LABEL, SessionUpdate, WorkloadKind};
use hpa4n_metrics::{BehaviorPolicy, MetricValue, SelectPolicy, TargetType};
use std::path::PathBuf;

#[cfg(test)]
#[path = "./cli.tests.rs"]
mod cli_tests;

/// hpa4n manages CPU and memory based horizontal pod autoscalers of Kubernetes workloads.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the kubeconfig file (defaults to $HOME/.kube/config).
    #[arg(long, env = "KUBECONFIG", global = true)]
    pub kube_config: Option<String>,

    /// Context to use from the kubeconfig file.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Namespace to work in (defaults to the namespace of the kube context).
    #[arg(long, short, global = true)]
    pub namespace: Option<String>,

    /// List autoscalers across all namespaces.
    #[arg(long, short = 'A', global = true)]
    pub all_namespaces: bool,

    /// Read autoscalers from a YAML file instead of the cluster.
    #[arg(long, short, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Path to the configuration file (defaults to $HOME/.hpa4n/config.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List horizontal pod autoscalers.
    List(ListArgs),

    /// Show details of a horizontal pod autoscaler.
    Describe {
        /// Name of the horizontal pod autoscaler.
        name: String,
    },

    /// Create horizontal pod autoscaler for a workload.
    Create(CreateArgs),

    /// Change metrics, replicas or scaling behavior of a horizontal pod autoscaler.
    Edit(EditArgs),

    /// Delete horizontal pod autoscalers.
    Delete {
        /// Names of the horizontal pod autoscalers.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Show additional columns.
    #[arg(long)]
    pub wide: bool,

    /// Show only autoscalers of this workload kind.
    #[arg(long, value_name = "KIND")]
    pub kind: Option<WorkloadKind>,

    /// Show only autoscalers of this workload.
    #[arg(long, value_name = "NAME")]
    pub workload: Option<String>,
}

impl ListArgs {
    /// Returns label selector for the scale target filter.
    pub fn label_selector(&self) -> Option<String> {
        let kind = self.kind.map(|k| format!("{SCALE_TARGET_KIND_LABEL}={k}"));
        let workload = self.workload.as_ref().map(|w| format!("{SCALE_TARGET_NAME_LABEL}={w}"));
        let selector = kind.into_iter().chain(workload).collect::<Vec<_>>();

        if selector.is_empty() {
            None
        } else {
            Some(selector.join(","))
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Kind of the workload to scale: deployment or statefulset.
    #[arg(long, value_name = "KIND")]
    pub kind: WorkloadKind,

    /// Name of the workload to scale.
    #[arg(long, value_name = "NAME")]
    pub workload: String,

    /// Name of the autoscaler (defaults to the workload name).
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub changes: ChangeArgs,

    /// Validate on the server and print the result without persisting it.
    #[arg(long)]
    pub dry_run: bool,
}

impl CreateArgs {
    /// Returns session update built from the command line.
    pub fn to_update(&self) -> SessionUpdate {
        SessionUpdate {
            name: self.name.clone(),
            ..self.changes.to_update()
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Name of the horizontal pod autoscaler.
    pub name: String,

    #[command(flatten)]
    pub changes: ChangeArgs,

    /// Replace the autoscaler with the manifest read from this YAML file.
    #[arg(long, value_name = "PATH")]
    pub from_yaml: Option<PathBuf>,

    /// Validate on the server and print the result without persisting it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Values shared by the `create` and `edit` commands.
#[derive(clap::Args, Debug, Default)]
pub struct ChangeArgs {
    /// Minimum number of replicas.
    #[arg(long = "min", value_name = "REPLICAS")]
    pub min_replicas: Option<i32>,

    /// Maximum number of replicas.
    #[arg(long = "max", value_name = "REPLICAS")]
    pub max_replicas: Option<i32>,

    #[command(flatten)]
    pub metrics: MetricArgs,

    #[command(flatten)]
    pub behavior: BehaviorArgs,

    /// Display name stored in the autoscaler annotations, empty value removes it.
    #[arg(long)]
    pub alias: Option<String>,

    /// Description stored in the autoscaler annotations, empty value removes it.
    #[arg(long)]
    pub description: Option<String>,
}

impl ChangeArgs {
    /// Returns session update built from the command line.
    pub fn to_update(&self) -> SessionUpdate {
        SessionUpdate {
            name: None,
            min_replicas: self.min_replicas,
            max_replicas: self.max_replicas,
            cpu: self.metrics.cpu(),
            memory: self.metrics.memory(),
            scale_up: self.behavior.scale_up(),
            scale_down: self.behavior.scale_down(),
            alias: self.alias.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct MetricArgs {
    /// Target average CPU utilization in percent of the requested CPU.
    #[arg(long, value_name = "PERCENT", conflicts_with_all = ["cpu_average", "clear_cpu"])]
    pub cpu_utilization: Option<f64>,

    /// Target average CPU usage per pod, e.g. 250m or 0.5.
    #[arg(long, value_name = "QUANTITY", conflicts_with = "clear_cpu")]
    pub cpu_average: Option<String>,

    /// Remove the CPU metric.
    #[arg(long)]
    pub clear_cpu: bool,

    /// Target average memory utilization in percent of the requested memory.
    #[arg(long, value_name = "PERCENT", conflicts_with_all = ["memory_average", "clear_memory"])]
    pub memory_utilization: Option<f64>,

    /// Target average memory usage per pod, e.g. 512Mi or 1Gi.
    #[arg(long, value_name = "QUANTITY", conflicts_with = "clear_memory")]
    pub memory_average: Option<String>,

    /// Remove the memory metric.
    #[arg(long)]
    pub clear_memory: bool,
}

impl MetricArgs {
    /// Returns change of the CPU metric.
    pub fn cpu(&self) -> Option<MetricUpdate> {
        metric_update(self.cpu_utilization, self.cpu_average.as_deref(), self.clear_cpu)
    }

    /// Returns change of the memory metric.
    pub fn memory(&self) -> Option<MetricUpdate> {
        metric_update(self.memory_utilization, self.memory_average.as_deref(), self.clear_memory)
    }
}

fn metric_update(utilization: Option<f64>, average: Option<&str>, clear: bool) -> Option<MetricUpdate> {
    if clear {
        return Some(MetricUpdate::Clear);
    }

    if let Some(utilization) = utilization {
        return Some(MetricUpdate::Set(TargetType::Utilization, utilization.into()));
    }

    average.map(|average| MetricUpdate::Set(TargetType::AverageValue, MetricValue::from(average.trim())))
}

#[derive(clap::Args, Debug, Default)]
pub struct BehaviorArgs {
    /// Scale-up policy, replaces all current ones (repeatable).
    #[arg(long = "scale-up-policy", value_name = "TYPE:VALUE:PERIOD", conflicts_with = "no_scale_up_policies")]
    pub scale_up_policies: Vec<BehaviorPolicy>,

    /// Remove all scale-up policies.
    #[arg(long)]
    pub no_scale_up_policies: bool,

    /// Scale-up stabilization window in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub scale_up_window: Option<i32>,

    /// Scale-up policy selection: Max, Min or Disabled.
    #[arg(long, value_name = "SELECT")]
    pub scale_up_select: Option<SelectPolicy>,

    /// Scale-down policy, replaces all current ones (repeatable).
    #[arg(long = "scale-down-policy", value_name = "TYPE:VALUE:PERIOD", conflicts_with = "no_scale_down_policies")]
    pub scale_down_policies: Vec<BehaviorPolicy>,

    /// Remove all scale-down policies.
    #[arg(long)]
    pub no_scale_down_policies: bool,

    /// Scale-down stabilization window in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub scale_down_window: Option<i32>,

    /// Scale-down policy selection: Max, Min or Disabled.
    #[arg(long, value_name = "SELECT")]
    pub scale_down_select: Option<SelectPolicy>,
}

impl BehaviorArgs {
    /// Returns change of the scale-up rules.
    pub fn scale_up(&self) -> RulesUpdate {
        rules_update(
            &self.scale_up_policies,
            self.no_scale_up_policies,
            self.scale_up_window,
            self.scale_up_select,
        )
    }

    /// Returns change of the scale-down rules.
    pub fn scale_down(&self) -> RulesUpdate {
        rules_update(
            &self.scale_down_policies,
            self.no_scale_down_policies,
            self.scale_down_window,
            self.scale_down_select,
        )
    }
}

fn rules_update(
    policies: &[BehaviorPolicy],
    no_policies: bool,
    window: Option<i32>,
    select_policy: Option<SelectPolicy>,
) -> RulesUpdate {
    let policies = if no_policies {
        Some(Vec::new())
    } else if policies.is_empty() {
        None
    } else {
        Some(policies.to_vec())
    };

    RulesUpdate {
        select_policy,
        stabilization_window_seconds: window,
        policies,
    }
}
