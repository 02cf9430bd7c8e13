use k8s_openapi::api::autoscaling::v2::{HPAScalingPolicy, HPAScalingRules, HorizontalPodAutoscalerBehavior};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[cfg(test)]
#[path = "./behavior.tests.rs"]
mod behavior_tests;

const MAX_STABILIZATION_WINDOW_SECONDS: i32 = 3_600;
const MAX_PERIOD_SECONDS: i32 = 1_800;
const DEFAULT_SCALE_DOWN_WINDOW_SECONDS: i32 = 300;

/// Possible errors from validating scaling behavior.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BehaviorError {
    /// Stabilization window is not in the `[0, 3600]` range.
    #[error("{0} stabilization window must be between 0 and 3600 seconds")]
    StabilizationWindowOutOfRange(ScalingDirection),

    /// Policy value is not positive.
    #[error("{0} policy value must be greater than 0")]
    PolicyValueNotPositive(ScalingDirection),

    /// Policy period is not in the `(0, 1800]` range.
    #[error("{0} policy period must be between 1 and 1800 seconds")]
    PolicyPeriodOutOfRange(ScalingDirection),

    /// Policy cannot be parsed from its `TYPE:VALUE:PERIOD` form.
    #[error("invalid policy '{0}', expected TYPE:VALUE:PERIOD, e.g. Percent:100:15")]
    InvalidPolicy(String),

    /// Policy selection is not one of `Max`, `Min` or `Disabled`.
    #[error("invalid select policy '{0}', expected Max, Min or Disabled")]
    InvalidSelectPolicy(String),
}

/// Scaling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingDirection {
    Up,
    Down,
}

impl Display for ScalingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingDirection::Up => f.write_str("scale-up"),
            ScalingDirection::Down => f.write_str("scale-down"),
        }
    }
}

/// Which policy wins when more than one policy is defined.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectPolicy {
    #[default]
    Max,
    Min,
    Disabled,
}

impl SelectPolicy {
    /// Returns policy selection name as used by the kubernetes API.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectPolicy::Max => "Max",
            SelectPolicy::Min => "Min",
            SelectPolicy::Disabled => "Disabled",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Max" => Some(SelectPolicy::Max),
            "Min" => Some(SelectPolicy::Min),
            "Disabled" => Some(SelectPolicy::Disabled),
            _ => None,
        }
    }
}

impl FromStr for SelectPolicy {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(SelectPolicy::Max),
            "min" => Ok(SelectPolicy::Min),
            "disabled" => Ok(SelectPolicy::Disabled),
            _ => Err(BehaviorError::InvalidSelectPolicy(s.to_owned())),
        }
    }
}

/// Unit of the policy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyType {
    Pods,
    Percent,
}

impl PolicyType {
    /// Returns policy type name as used by the kubernetes API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Pods => "Pods",
            PolicyType::Percent => "Percent",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Pods" => Some(PolicyType::Pods),
            "Percent" => Some(PolicyType::Percent),
            _ => None,
        }
    }
}

/// Single rate-limiting rule for one scaling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorPolicy {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    pub value: i32,
    pub period_seconds: i32,
}

impl BehaviorPolicy {
    /// Creates new [`BehaviorPolicy`] instance.
    pub fn new(policy_type: PolicyType, value: i32, period_seconds: i32) -> Self {
        Self {
            policy_type,
            value,
            period_seconds,
        }
    }
}

impl Display for BehaviorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.policy_type {
            PolicyType::Pods => f.write_fmt(format_args!("{} pods / {}s", self.value, self.period_seconds)),
            PolicyType::Percent => f.write_fmt(format_args!("{}% / {}s", self.value, self.period_seconds)),
        }
    }
}

impl FromStr for BehaviorPolicy {
    type Err = BehaviorError;

    /// Parses policy from the `TYPE:VALUE:PERIOD` form, e.g. `Pods:4:60`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BehaviorError::InvalidPolicy(s.to_owned());
        let mut parts = s.split(':').map(str::trim);

        let policy_type = parts
            .next()
            .and_then(|p| match p.to_ascii_lowercase().as_str() {
                "pods" => Some(PolicyType::Pods),
                "percent" => Some(PolicyType::Percent),
                _ => None,
            })
            .ok_or_else(invalid)?;
        let value = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(invalid)?;
        let period_seconds = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(invalid)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(BehaviorPolicy::new(policy_type, value, period_seconds))
    }
}

/// Scaling rules for one direction as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormScalingRules {
    #[serde(default)]
    pub select_policy: SelectPolicy,

    #[serde(default)]
    pub stabilization_window_seconds: Option<i32>,

    #[serde(default)]
    pub policies: Vec<BehaviorPolicy>,
}

impl FormScalingRules {
    /// Returns unrestricted scale-up rules.
    pub fn scale_up_default() -> Self {
        Self {
            select_policy: SelectPolicy::Max,
            stabilization_window_seconds: Some(0),
            policies: Vec::new(),
        }
    }

    /// Returns conservative scale-down rules: 5 minutes window, at most 100% of pods every 15 seconds.
    pub fn scale_down_default() -> Self {
        Self {
            select_policy: SelectPolicy::Max,
            stabilization_window_seconds: Some(DEFAULT_SCALE_DOWN_WINDOW_SECONDS),
            policies: vec![BehaviorPolicy::new(PolicyType::Percent, 100, 15)],
        }
    }

    /// Replaces all policies with the provided ones.
    pub fn set_policies(&mut self, policies: Vec<BehaviorPolicy>) {
        self.policies = policies;
    }
}

/// Scale-up and scale-down rules as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBehavior {
    #[serde(default = "FormScalingRules::scale_up_default")]
    pub scale_up: FormScalingRules,

    #[serde(default = "FormScalingRules::scale_down_default")]
    pub scale_down: FormScalingRules,
}

impl Default for FormBehavior {
    fn default() -> Self {
        Self {
            scale_up: FormScalingRules::scale_up_default(),
            scale_down: FormScalingRules::scale_down_default(),
        }
    }
}

impl FormBehavior {
    /// Returns rules for the specified direction.
    pub fn rules(&self, direction: ScalingDirection) -> &FormScalingRules {
        match direction {
            ScalingDirection::Up => &self.scale_up,
            ScalingDirection::Down => &self.scale_down,
        }
    }

    /// Returns mutable rules for the specified direction.
    pub fn rules_mut(&mut self, direction: ScalingDirection) -> &mut FormScalingRules {
        match direction {
            ScalingDirection::Up => &mut self.scale_up,
            ScalingDirection::Down => &mut self.scale_down,
        }
    }
}

/// Converts form behavior to the kubernetes `spec.behavior` object.
pub fn behavior_to_spec(behavior: &FormBehavior) -> HorizontalPodAutoscalerBehavior {
    HorizontalPodAutoscalerBehavior {
        scale_up: Some(rules_to_spec(&behavior.scale_up)),
        scale_down: Some(rules_to_spec(&behavior.scale_down)),
    }
}

/// Converts kubernetes `spec.behavior` object to form behavior.\
/// **Note** that missing directions get the default rules.
pub fn spec_to_behavior(behavior: Option<&HorizontalPodAutoscalerBehavior>) -> FormBehavior {
    let scale_up = behavior.and_then(|b| b.scale_up.as_ref());
    let scale_down = behavior.and_then(|b| b.scale_down.as_ref());

    FormBehavior {
        scale_up: scale_up.map_or_else(FormScalingRules::scale_up_default, rules_from_spec),
        scale_down: scale_down.map_or_else(FormScalingRules::scale_down_default, rules_from_spec),
    }
}

/// Validates scaling behavior against the kubernetes API limits.
pub fn validate_behavior(behavior: &FormBehavior) -> Result<(), BehaviorError> {
    validate_rules(&behavior.scale_up, ScalingDirection::Up)?;
    validate_rules(&behavior.scale_down, ScalingDirection::Down)
}

fn validate_rules(rules: &FormScalingRules, direction: ScalingDirection) -> Result<(), BehaviorError> {
    if rules
        .stabilization_window_seconds
        .is_some_and(|w| !(0..=MAX_STABILIZATION_WINDOW_SECONDS).contains(&w))
    {
        return Err(BehaviorError::StabilizationWindowOutOfRange(direction));
    }

    for policy in &rules.policies {
        if policy.value <= 0 {
            return Err(BehaviorError::PolicyValueNotPositive(direction));
        }

        if !(1..=MAX_PERIOD_SECONDS).contains(&policy.period_seconds) {
            return Err(BehaviorError::PolicyPeriodOutOfRange(direction));
        }
    }

    Ok(())
}

fn rules_to_spec(rules: &FormScalingRules) -> HPAScalingRules {
    let policies = if rules.policies.is_empty() {
        None
    } else {
        Some(
            rules
                .policies
                .iter()
                .map(|policy| HPAScalingPolicy {
                    type_: policy.policy_type.as_str().to_owned(),
                    value: policy.value,
                    period_seconds: policy.period_seconds,
                })
                .collect(),
        )
    };

    HPAScalingRules {
        select_policy: Some(rules.select_policy.as_str().to_owned()),
        stabilization_window_seconds: rules.stabilization_window_seconds,
        policies,
        ..Default::default()
    }
}

fn rules_from_spec(rules: &HPAScalingRules) -> FormScalingRules {
    let policies = rules
        .policies
        .iter()
        .flatten()
        .filter_map(|policy| match PolicyType::from_name(&policy.type_) {
            Some(policy_type) => Some(BehaviorPolicy::new(policy_type, policy.value, policy.period_seconds)),
            None => {
                tracing::warn!("Skipping unsupported scaling policy type '{}'", policy.type_);
                None
            },
        })
        .collect();

    FormScalingRules {
        select_policy: rules
            .select_policy
            .as_deref()
            .and_then(SelectPolicy::from_name)
            .unwrap_or_default(),
        stabilization_window_seconds: rules.stabilization_window_seconds,
        policies,
    }
}
