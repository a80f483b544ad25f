//! Rendering of gateway outcomes

use serde::Serialize;
use track_and_trace_gateway::{GatewayError, TrackingResult};

/// Pretty JSON for stdout.
pub fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// The status page progress list as plain text, one line per entry.
pub fn timeline(result: &TrackingResult) -> String {
    let mut lines = vec![
        format!("B/L: {}", result.bl),
        format!("ETA: {}", result.arrival.as_deref().unwrap_or("-")),
    ];
    if let Some(vessel) = &result.vessel {
        lines.push(format!("Vessel: {vessel}"));
    }
    lines.extend(result.milestones().into_iter().map(|step| {
        let marker = if step.done { "[x]" } else { "[>]" };
        format!(
            "{marker} {}: {}",
            step.stage.label(),
            step.value.as_deref().unwrap_or("-")
        )
    }));
    lines.join("\n")
}

/// Log a gateway error at the level its kind deserves.
pub fn log_error(err: &GatewayError) {
    if err.is_expected() {
        tracing::warn!("{err}");
    } else {
        tracing::error!("{err}");
    }
}
