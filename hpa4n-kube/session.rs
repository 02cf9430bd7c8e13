use hpa4n_config::SessionDefaults;
use hpa4n_metrics::{
    BehaviorError, BehaviorPolicy, FormBehavior, FormMetric, FormMetrics, MetricValue, MetricsError, ResourceName,
    ScalingDirection, SelectPolicy, TargetType, behavior_to_spec, form_metrics_to_spec, spec_to_behavior,
    spec_to_form_metrics, target_metrics, validate_behavior, validate_form_metrics,
};
use k8s_openapi::api::autoscaling::v2::{
    CrossVersionObjectReference, HPAScalingRules, HorizontalPodAutoscaler, HorizontalPodAutoscalerSpec, MetricSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use k8s_openapi::serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::WorkloadRef;
use crate::workload::APPS_API_VERSION;

#[cfg(test)]
#[path = "./session.tests.rs"]
mod session_tests;

pub const ALIAS_ANNOTATION: &str = "kubesphere.io/alias-name";
pub const DESCRIPTION_ANNOTATION: &str = "kubesphere.io/description";
pub const SCALE_TARGET_KIND_LABEL: &str = "autoscaling.kubesphere.io/scale-target-kind";
pub const SCALE_TARGET_NAME_LABEL: &str = "autoscaling.kubesphere.io/scale-target-name";

/// Possible errors from validating autoscaler session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Autoscaler name is empty.
    #[error("autoscaler name is required")]
    NameRequired,

    /// Minimum replicas is lower than 1.
    #[error("minimum replicas must be at least 1")]
    MinReplicasTooLow,

    /// Maximum replicas is lower than minimum replicas.
    #[error("maximum replicas must not be lower than minimum replicas")]
    MaxReplicasBelowMin,

    /// Metrics are not valid.
    #[error("{0}")]
    Metrics(#[from] MetricsError),

    /// Scaling behavior is not valid.
    #[error("{0}")]
    Behavior(#[from] BehaviorError),
}

/// Workload scaled by the autoscaler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleTarget {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: Option<String>,
}

impl From<&WorkloadRef> for ScaleTarget {
    fn from(workload: &WorkloadRef) -> Self {
        Self {
            api_version: APPS_API_VERSION.to_owned(),
            kind: workload.kind.as_str().to_owned(),
            name: workload.name.clone(),
            uid: Some(workload.uid.clone()),
        }
    }
}

impl ScaleTarget {
    fn from_hpa(hpa: &HorizontalPodAutoscaler) -> Self {
        let target = hpa.spec.as_ref().map(|s| &s.scale_target_ref);
        let kind = target.map(|t| t.kind.clone()).unwrap_or_default();
        let name = target.map(|t| t.name.clone()).unwrap_or_default();
        let uid = hpa
            .metadata
            .owner_references
            .iter()
            .flatten()
            .find(|o| o.kind == kind && o.name == name)
            .map(|o| o.uid.clone());

        Self {
            api_version: target
                .and_then(|t| t.api_version.clone())
                .unwrap_or_else(|| APPS_API_VERSION.to_owned()),
            kind,
            name,
            uid,
        }
    }

    fn to_reference(&self) -> CrossVersionObjectReference {
        CrossVersionObjectReference {
            api_version: Some(self.api_version.clone()),
            kind: self.kind.clone(),
            name: self.name.clone(),
        }
    }

    fn to_owner_reference(&self) -> Option<OwnerReference> {
        self.uid.as_ref().map(|uid| OwnerReference {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            uid: uid.clone(),
            controller: Some(true),
            block_owner_deletion: Some(true),
        })
    }
}

/// Editable state of a single autoscaler.
#[derive(Debug, Clone, PartialEq)]
pub struct HpaForm {
    pub name: String,
    pub namespace: String,
    pub target: ScaleTarget,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub metrics: FormMetrics,
    pub behavior: FormBehavior,
    pub alias: Option<String>,
    pub description: Option<String>,
}

/// New value for one form metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricUpdate {
    Set(TargetType, MetricValue),
    Clear,
}

/// Partial update of the scaling rules for one direction.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RulesUpdate {
    pub select_policy: Option<SelectPolicy>,
    pub stabilization_window_seconds: Option<i32>,

    /// Replaces all current policies when set.
    pub policies: Option<Vec<BehaviorPolicy>>,
}

/// Partial update of the autoscaler session, `None` fields are left untouched.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SessionUpdate {
    pub name: Option<String>,
    pub min_replicas: Option<i32>,
    pub max_replicas: Option<i32>,
    pub cpu: Option<MetricUpdate>,
    pub memory: Option<MetricUpdate>,
    pub scale_up: RulesUpdate,
    pub scale_down: RulesUpdate,
    pub alias: Option<String>,
    pub description: Option<String>,
}

impl SessionUpdate {
    /// Returns `true` if the update does not change anything.
    pub fn is_empty(&self) -> bool {
        self == &SessionUpdate::default()
    }
}

/// Owned state of one create or edit operation.
#[derive(Debug, Clone)]
pub struct HpaSession {
    form: HpaForm,
    snapshot: HpaForm,
    source: Option<HorizontalPodAutoscaler>,
}

impl HpaSession {
    /// Creates session for a new autoscaler of the specified workload.
    pub fn for_create(workload: &WorkloadRef, defaults: &SessionDefaults) -> Self {
        let form = HpaForm {
            name: workload.name.clone(),
            namespace: workload.namespace.clone(),
            target: ScaleTarget::from(workload),
            min_replicas: defaults.min_replicas,
            max_replicas: defaults.max_replicas,
            metrics: defaults.form_metrics(),
            behavior: defaults.behavior.clone(),
            alias: None,
            description: None,
        };

        Self::new(form, None)
    }

    /// Creates session for editing existing autoscaler.\
    /// **Note** that metrics missing in the autoscaler get target types from `defaults`.
    pub fn for_edit(hpa: &HorizontalPodAutoscaler, defaults: &SessionDefaults) -> Self {
        let spec = hpa.spec.as_ref();
        let mut metrics = spec_to_form_metrics(spec.and_then(|s| s.metrics.as_deref()).unwrap_or_default());
        apply_default_type(&mut metrics.cpu, defaults.cpu_target_type);
        apply_default_type(&mut metrics.memory, defaults.memory_target_type);

        let behavior = match spec.and_then(|s| s.behavior.as_ref()) {
            Some(behavior) => spec_to_behavior(Some(behavior)),
            None => defaults.behavior.clone(),
        };

        let annotations = hpa.metadata.annotations.as_ref();
        let form = HpaForm {
            name: hpa.metadata.name.clone().unwrap_or_default(),
            namespace: hpa.metadata.namespace.clone().unwrap_or_default(),
            target: ScaleTarget::from_hpa(hpa),
            min_replicas: spec.and_then(|s| s.min_replicas).unwrap_or(1),
            max_replicas: spec.map(|s| s.max_replicas).unwrap_or(defaults.max_replicas),
            metrics,
            behavior,
            alias: annotations.and_then(|a| a.get(ALIAS_ANNOTATION)).cloned(),
            description: annotations.and_then(|a| a.get(DESCRIPTION_ANNOTATION)).cloned(),
        };

        Self::new(form, Some(hpa.clone()))
    }

    fn new(form: HpaForm, source: Option<HorizontalPodAutoscaler>) -> Self {
        Self {
            snapshot: form.clone(),
            form,
            source,
        }
    }

    /// Returns current session state.
    pub fn form(&self) -> &HpaForm {
        &self.form
    }

    /// Returns `true` if the session state differs from the state at construction.
    pub fn is_modified(&self) -> bool {
        self.form != self.snapshot
    }

    /// Applies partial changes to the session.\
    /// **Note** that supplied policies replace the current ones entirely.
    pub fn update(&mut self, update: SessionUpdate) {
        let form = &mut self.form;

        if let Some(name) = update.name {
            form.name = name;
        }

        if let Some(min_replicas) = update.min_replicas {
            form.min_replicas = min_replicas;
        }

        if let Some(max_replicas) = update.max_replicas {
            form.max_replicas = max_replicas;
        }

        apply_metric_update(&mut form.metrics, ResourceName::Cpu, update.cpu);
        apply_metric_update(&mut form.metrics, ResourceName::Memory, update.memory);
        apply_rules_update(&mut form.behavior, ScalingDirection::Up, update.scale_up);
        apply_rules_update(&mut form.behavior, ScalingDirection::Down, update.scale_down);

        if let Some(alias) = update.alias {
            form.alias = Some(alias).filter(|a| !a.is_empty());
        }

        if let Some(description) = update.description {
            form.description = Some(description).filter(|d| !d.is_empty());
        }
    }

    /// Restores the state captured when the session was created.
    pub fn reset(&mut self) {
        self.form = self.snapshot.clone();
    }

    /// Validates the session state.
    pub fn validate(&self) -> Result<(), SessionError> {
        let form = &self.form;
        if form.name.trim().is_empty() {
            return Err(SessionError::NameRequired);
        }

        if form.min_replicas < 1 {
            return Err(SessionError::MinReplicasTooLow);
        }

        if form.max_replicas < form.min_replicas {
            return Err(SessionError::MaxReplicasBelowMin);
        }

        validate_form_metrics(&form.metrics)?;
        validate_behavior(&form.behavior)?;

        Ok(())
    }

    /// Builds the horizontal pod autoscaler to create.
    pub fn to_manifest(&self) -> HorizontalPodAutoscaler {
        let form = &self.form;
        let labels = BTreeMap::from([
            (SCALE_TARGET_KIND_LABEL.to_owned(), form.target.kind.clone()),
            (SCALE_TARGET_NAME_LABEL.to_owned(), form.target.name.clone()),
        ]);

        let annotations = [
            (ALIAS_ANNOTATION, form.alias.as_ref()),
            (DESCRIPTION_ANNOTATION, form.description.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_owned(), v.clone())))
        .collect::<BTreeMap<_, _>>();

        HorizontalPodAutoscaler {
            metadata: ObjectMeta {
                name: Some(form.name.clone()),
                namespace: Some(form.namespace.clone()),
                labels: Some(labels),
                annotations: Some(annotations).filter(|a| !a.is_empty()),
                owner_references: form.target.to_owner_reference().map(|o| vec![o]),
                ..Default::default()
            },
            spec: Some(HorizontalPodAutoscalerSpec {
                scale_target_ref: form.target.to_reference(),
                min_replicas: Some(form.min_replicas),
                max_replicas: form.max_replicas,
                metrics: Some(self.metrics_to_spec()),
                behavior: Some(behavior_to_spec(&form.behavior)),
            }),
            status: None,
        }
    }

    /// Returns the edited autoscaler with session changes applied on top of it.\
    /// **Note** that everything the session does not manage is kept, sessions for a new autoscaler
    /// return [`HpaSession::to_manifest`].
    pub fn to_edited(&self) -> HorizontalPodAutoscaler {
        let Some(source) = &self.source else {
            return self.to_manifest();
        };

        let form = &self.form;
        let mut hpa = source.clone();

        let mut annotations = hpa.metadata.annotations.take().unwrap_or_default();
        for (key, value) in [
            (ALIAS_ANNOTATION, form.alias.as_ref()),
            (DESCRIPTION_ANNOTATION, form.description.as_ref()),
        ] {
            match value {
                Some(value) => annotations.insert(key.to_owned(), value.clone()),
                None => annotations.remove(key),
            };
        }
        hpa.metadata.annotations = Some(annotations).filter(|a| !a.is_empty());

        let spec = hpa.spec.get_or_insert_with(|| HorizontalPodAutoscalerSpec {
            scale_target_ref: form.target.to_reference(),
            ..Default::default()
        });
        spec.min_replicas = Some(form.min_replicas);
        spec.max_replicas = form.max_replicas;
        spec.metrics = Some(self.metrics_to_spec());
        spec.behavior = Some(behavior_to_spec(&form.behavior));

        hpa
    }

    /// Builds JSON merge patch that replaces metrics, behavior and replica bounds of the autoscaler.\
    /// **Note** that `null` values remove cleared policies, windows and annotations.
    pub fn to_patch(&self) -> Value {
        let form = &self.form;
        json!({
            "metadata": {
                "annotations": {
                    ALIAS_ANNOTATION: form.alias,
                    DESCRIPTION_ANNOTATION: form.description,
                }
            },
            "spec": {
                "minReplicas": form.min_replicas,
                "maxReplicas": form.max_replicas,
                "metrics": self.metrics_to_spec(),
                "behavior": behavior_patch(&form.behavior),
            }
        })
    }

    /// Returns form metrics followed by the edited autoscaler metrics that the form does not manage.
    fn metrics_to_spec(&self) -> Vec<MetricSpec> {
        let mut metrics = form_metrics_to_spec(&self.form.metrics);
        let foreign = self
            .source
            .iter()
            .flat_map(target_metrics)
            .filter(|metric| !is_form_metric(metric))
            .cloned();
        metrics.extend(foreign);
        metrics
    }
}

fn is_form_metric(metric: &MetricSpec) -> bool {
    metric.type_ == "Resource"
        && metric
            .resource
            .as_ref()
            .is_some_and(|r| r.name == ResourceName::Cpu.as_str() || r.name == ResourceName::Memory.as_str())
}

fn apply_default_type(metric: &mut FormMetric, target_type: TargetType) {
    if !metric.is_set() {
        metric.target_type = target_type;
    }
}

fn apply_metric_update(metrics: &mut FormMetrics, name: ResourceName, update: Option<MetricUpdate>) {
    match update {
        Some(MetricUpdate::Set(target_type, value)) => metrics.get_mut(name).set(target_type, value),
        Some(MetricUpdate::Clear) => metrics.get_mut(name).clear(),
        None => (),
    }
}

fn apply_rules_update(behavior: &mut FormBehavior, direction: ScalingDirection, update: RulesUpdate) {
    let rules = behavior.rules_mut(direction);

    if let Some(select_policy) = update.select_policy {
        rules.select_policy = select_policy;
    }

    if let Some(window) = update.stabilization_window_seconds {
        rules.stabilization_window_seconds = Some(window);
    }

    if let Some(policies) = update.policies {
        rules.set_policies(policies);
    }
}

fn behavior_patch(behavior: &FormBehavior) -> Value {
    let spec = behavior_to_spec(behavior);
    let rules = |rules: Option<&HPAScalingRules>| {
        json!({
            "selectPolicy": rules.and_then(|r| r.select_policy.as_ref()),
            "stabilizationWindowSeconds": rules.and_then(|r| r.stabilization_window_seconds),
            "policies": rules.and_then(|r| r.policies.as_ref()),
        })
    };

    json!({
        "scaleUp": rules(spec.scale_up.as_ref()),
        "scaleDown": rules(spec.scale_down.as_ref()),
    })
}
