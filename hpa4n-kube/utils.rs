use k8s_openapi::jiff::Timestamp;

#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Formats elapsed time since `time` to a human-readable string, e.g. `3d04h`.
pub fn format_age(time: &Timestamp) -> String {
    format_elapsed(Timestamp::now().duration_since(*time).as_secs())
}

/// Formats number of seconds to a human-readable string.
pub fn format_elapsed(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let secs = total_secs % 60;

    if days > 0 {
        format!("{days}d{hours:0>2}h")
    } else if hours > 0 {
        format!("{hours}h{minutes:0>2}m")
    } else if minutes > 0 {
        format!("{minutes}m{secs:0>2}s")
    } else {
        format!("{secs}s")
    }
}
