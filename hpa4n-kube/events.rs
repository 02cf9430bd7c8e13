use k8s_openapi::api::core::v1::Event;
use k8s_openapi::jiff::Timestamp;

use crate::utils::format_age;

#[cfg(test)]
#[path = "./events.tests.rs"]
mod events_tests;

/// Returns field selector that matches events of the named horizontal pod autoscaler.
pub fn event_selector(name: &str) -> String {
    format!("involvedObject.kind=HorizontalPodAutoscaler,involvedObject.name={name}")
}

/// Kubernetes event reported for the horizontal pod autoscaler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub event_type: String,
    pub reason: String,
    pub from: String,
    pub message: String,
    pub count: i32,
    pub last_seen: Option<Timestamp>,
}

impl EventRow {
    /// Returns time elapsed since the event was last seen.
    pub fn age(&self) -> Option<String> {
        self.last_seen.as_ref().map(format_age)
    }
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let last_seen = event
            .last_timestamp
            .as_ref()
            .map(|t| t.0)
            .or_else(|| event.event_time.as_ref().map(|t| t.0))
            .or_else(|| event.metadata.creation_timestamp.as_ref().map(|t| t.0));

        Self {
            event_type: event.type_.clone().unwrap_or_default(),
            reason: event.reason.clone().unwrap_or_default(),
            from: event
                .source
                .as_ref()
                .and_then(|s| s.component.clone())
                .or_else(|| event.reporting_component.clone())
                .unwrap_or_default(),
            message: event.message.clone().unwrap_or_default().trim().to_owned(),
            count: event.count.unwrap_or(1),
            last_seen,
        }
    }
}

/// Converts events to rows, most recently seen first.
pub fn to_event_rows(events: &[Event]) -> Vec<EventRow> {
    let mut rows = events.iter().map(EventRow::from).collect::<Vec<_>>();
    rows.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
    rows
}
