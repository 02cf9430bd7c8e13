use anyhow::Result;
use hpa4n_common::{add_padding, render_table};
use hpa4n_kube::{DESCRIPTION_ANNOTATION, EventRow, HpaRow};
use hpa4n_metrics::{
    EMPTY_VALUE, FormScalingRules, ResourceName, ScalingDirection, find_target_metric, spec_to_behavior,
    target_metrics,
};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;

use crate::commands::Source;

#[cfg(test)]
#[path = "./describe.tests.rs"]
mod describe_tests;

const LABEL_WIDTH: usize = 14;

/// Prints details of the horizontal pod autoscaler.
pub async fn run(source: &Source, name: &str) -> Result<()> {
    let hpa = source.get(name).await?;
    let events = source.events(name).await?;
    print!("{}", render_description(&hpa, events.as_deref()));
    Ok(())
}

/// Renders human-readable description of the horizontal pod autoscaler.\
/// **Note** that the events section is omitted when `events` is `None`.
pub fn render_description(hpa: &HorizontalPodAutoscaler, events: Option<&[EventRow]>) -> String {
    let row = HpaRow::from(hpa);
    let mut lines = vec![field("Name:", &row.name), field("Namespace:", &row.namespace)];

    if let Some(alias) = &row.alias {
        lines.push(field("Alias:", alias));
    }

    if let Some(description) = hpa
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(DESCRIPTION_ANNOTATION))
    {
        lines.push(field("Description:", description));
    }

    lines.push(field("Target:", &row.target));
    lines.push(field(
        "Replicas:",
        &format!(
            "{} (current {}, desired {})",
            row.replica_bounds(),
            row.current_replicas,
            row.desired_replicas
        ),
    ));
    lines.push(field("Age:", row.age.as_deref().unwrap_or(EMPTY_VALUE)));

    lines.push("Metrics:".to_owned());
    let targets = target_metrics(hpa);
    for (name, target, current) in [
        (ResourceName::Cpu, &row.cpu_target, &row.cpu_current),
        (ResourceName::Memory, &row.memory_target, &row.memory_current),
    ] {
        let text = match find_target_metric(targets, name) {
            Some(source) => format!("{} {} (current {})", source.target.type_, target, current),
            None => EMPTY_VALUE.to_owned(),
        };
        lines.push(nested_field(&format!("{name}:"), &text));
    }

    lines.push("Behavior:".to_owned());
    let behavior = hpa.spec.as_ref().and_then(|s| s.behavior.as_ref());
    let form = spec_to_behavior(behavior);
    for direction in [ScalingDirection::Up, ScalingDirection::Down] {
        let is_set = behavior.is_some_and(|b| match direction {
            ScalingDirection::Up => b.scale_up.is_some(),
            ScalingDirection::Down => b.scale_down.is_some(),
        });
        let text = if is_set {
            describe_rules(form.rules(direction))
        } else {
            "cluster defaults".to_owned()
        };
        lines.push(nested_field(&format!("{direction}:"), &text));
    }

    lines.push("Conditions:".to_owned());
    let conditions = row
        .conditions
        .iter()
        .map(|(name, state)| {
            vec![
                name.to_owned(),
                state.status_str().to_owned(),
                state.reason.clone().unwrap_or_default(),
                state.message.clone().unwrap_or_default(),
            ]
        })
        .collect::<Vec<_>>();
    let table = render_table(&["TYPE", "STATUS", "REASON", "MESSAGE"], &conditions, 2);
    lines.extend(table.lines().map(|line| format!("  {line}")));

    if let Some(events) = events {
        lines.push("Events:".to_owned());
        if events.is_empty() {
            lines.push("  <none>".to_owned());
        } else {
            let events = events
                .iter()
                .map(|event| {
                    let age = event.age().unwrap_or_else(|| EMPTY_VALUE.to_owned());
                    vec![
                        event.event_type.clone(),
                        event.reason.clone(),
                        if event.count > 1 { format!("{age} (x{})", event.count) } else { age },
                        event.from.clone(),
                        event.message.clone(),
                    ]
                })
                .collect::<Vec<_>>();
            let table = render_table(&["TYPE", "REASON", "AGE", "FROM", "MESSAGE"], &events, 2);
            lines.extend(table.lines().map(|line| format!("  {line}")));
        }
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}

fn describe_rules(rules: &FormScalingRules) -> String {
    let window = rules
        .stabilization_window_seconds
        .map_or_else(|| EMPTY_VALUE.to_owned(), |w| format!("{w}s"));
    let policies = if rules.policies.is_empty() {
        "none".to_owned()
    } else {
        rules.policies.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    };

    format!(
        "select {}, window {}, policies {}",
        rules.select_policy.as_str(),
        window,
        policies
    )
}

fn field(label: &str, value: &str) -> String {
    format!("{}{}", add_padding(label, LABEL_WIDTH), value)
}

fn nested_field(label: &str, value: &str) -> String {
    format!("  {}{}", add_padding(label, LABEL_WIDTH - 2), value)
}
