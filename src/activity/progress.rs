//! Progress interpretation for live-activity state mappings.
//!
//! The dynamic state is free-form key/value; two optional keys carry a
//! numeric progress signal. `"progress"` holds a fraction in `[0, 1]`,
//! `"percent"` a percentage with an optional trailing `%`. A value that
//! fails to parse counts as absent and falls through to the next rule.

use std::collections::HashMap;

/// Normalized progress for one render pass. Recomputed on every
/// create/update, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressInfo {
    /// Progress in `[0, 100]`.
    pub percent: u8,
    /// True when no usable numeric signal was found in the state.
    pub indeterminate: bool,
}

/// Interprets a state mapping into a bounded progress value.
///
/// `"progress"` wins over `"percent"` when both parse.
pub fn interpret(state: &HashMap<String, String>) -> ProgressInfo {
    if let Some(value) = state.get("progress").and_then(|raw| parse_number(raw)) {
        return ProgressInfo {
            percent: to_percent(value * 100.0),
            indeterminate: false,
        };
    }

    if let Some(raw) = state.get("percent") {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_suffix('%').unwrap_or(trimmed);
        if let Some(value) = parse_number(stripped) {
            return ProgressInfo {
                percent: to_percent(value),
                indeterminate: false,
            };
        }
    }

    ProgressInfo {
        percent: 0,
        indeterminate: true,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "NaN" and "inf" parse as f64 but carry no usable progress
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
