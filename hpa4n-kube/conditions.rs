use k8s_openapi::api::autoscaling::v2::{HorizontalPodAutoscaler, HorizontalPodAutoscalerCondition};
use std::fmt::Display;

#[cfg(test)]
#[path = "./conditions.tests.rs"]
mod conditions_tests;

pub const ABLE_TO_SCALE: &str = "AbleToScale";
pub const SCALING_ACTIVE: &str = "ScalingActive";
pub const SCALING_LIMITED: &str = "ScalingLimited";

/// State of a single autoscaler condition.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConditionState {
    pub status: Option<bool>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl ConditionState {
    fn from(condition: &HorizontalPodAutoscalerCondition) -> Self {
        let status = match condition.status.as_str() {
            "True" => Some(true),
            "False" => Some(false),
            _ => None,
        };

        Self {
            status,
            reason: condition.reason.clone(),
            message: condition.message.clone(),
        }
    }

    /// Returns condition status as used by the kubernetes API.
    pub fn status_str(&self) -> &'static str {
        match self.status {
            Some(true) => "True",
            Some(false) => "False",
            None => "Unknown",
        }
    }

    fn short_status(&self) -> char {
        match self.status {
            Some(true) => 'T',
            Some(false) => 'F',
            None => '?',
        }
    }
}

/// Summary of the standard horizontal pod autoscaler conditions.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConditionSummary {
    pub able_to_scale: ConditionState,
    pub scaling_active: ConditionState,
    pub scaling_limited: ConditionState,
}

impl ConditionSummary {
    /// Builds [`ConditionSummary`] from the autoscaler status, missing conditions are unknown.
    pub fn from(hpa: &HorizontalPodAutoscaler) -> Self {
        let mut summary = ConditionSummary::default();
        let conditions = hpa.status.as_ref().and_then(|s| s.conditions.as_deref()).unwrap_or_default();

        for condition in conditions {
            match condition.type_.as_str() {
                ABLE_TO_SCALE => summary.able_to_scale = ConditionState::from(condition),
                SCALING_ACTIVE => summary.scaling_active = ConditionState::from(condition),
                SCALING_LIMITED => summary.scaling_limited = ConditionState::from(condition),
                _ => (),
            }
        }

        summary
    }

    /// Returns conditions together with their names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConditionState)> {
        [
            (ABLE_TO_SCALE, &self.able_to_scale),
            (SCALING_ACTIVE, &self.scaling_active),
            (SCALING_LIMITED, &self.scaling_limited),
        ]
        .into_iter()
    }
}

impl Display for ConditionSummary {
    /// Writes compact form, e.g. `A:T S:T L:F`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "A:{} S:{} L:{}",
            self.able_to_scale.short_status(),
            self.scaling_active.short_status(),
            self.scaling_limited.short_status()
        )
    }
}
