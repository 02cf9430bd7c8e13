use hpa4n_metrics::{FormBehavior, FormMetrics, ResourceName, TargetType};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "./defaults.tests.rs"]
mod defaults_tests;

/// Initial values for a newly created horizontal pod autoscaler.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDefaults {
    #[serde(default = "default_replicas")]
    pub min_replicas: i32,

    #[serde(default = "default_replicas")]
    pub max_replicas: i32,

    #[serde(default = "default_cpu_target_type")]
    pub cpu_target_type: TargetType,

    #[serde(default = "default_memory_target_type")]
    pub memory_target_type: TargetType,

    #[serde(default)]
    pub behavior: FormBehavior,
}

fn default_replicas() -> i32 {
    1
}

fn default_cpu_target_type() -> TargetType {
    ResourceName::Cpu.default_target_type()
}

fn default_memory_target_type() -> TargetType {
    ResourceName::Memory.default_target_type()
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            min_replicas: default_replicas(),
            max_replicas: default_replicas(),
            cpu_target_type: default_cpu_target_type(),
            memory_target_type: default_memory_target_type(),
            behavior: FormBehavior::default(),
        }
    }
}

impl SessionDefaults {
    /// Returns empty form metrics with the configured target types.
    pub fn form_metrics(&self) -> FormMetrics {
        FormMetrics::new(self.cpu_target_type, self.memory_target_type)
    }
}
