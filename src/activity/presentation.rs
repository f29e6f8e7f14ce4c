//! Display formatting for the platform surface.
//!
//! Turns the record's static fields plus a [`ProgressInfo`] into the title
//! and body text handed to the platform adapter. Icon and color selection
//! stay with the adapter.

use crate::activity::progress::ProgressInfo;
use crate::models::LiveActivityRecord;

/// Title used when the record carries no usable title.
const FALLBACK_TITLE: &str = "Live Activity";

/// Rendered display payload. Together with the record itself this is the
/// only rendering input the platform adapter receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    pub title: String,
    pub text: String,
    pub percent: u8,
    pub indeterminate: bool,
}

/// Renders the display content for one create/update/end pass.
pub fn render(record: &LiveActivityRecord, progress: ProgressInfo) -> DisplayContent {
    let title = non_blank(&record.title).unwrap_or(FALLBACK_TITLE).to_string();

    // First usable description of the task itself; may be empty.
    let task_info = [
        record.task_name.as_str(),
        record.text.as_str(),
        record.task_type.as_str(),
    ]
    .into_iter()
    .find_map(non_blank)
    .unwrap_or("");

    let text = if progress.indeterminate {
        if task_info.is_empty() {
            record.text.clone()
        } else {
            task_info.to_string()
        }
    } else if task_info.is_empty() {
        format!("{}%", progress.percent)
    } else {
        format!("{} · {}%", task_info, progress.percent)
    };

    DisplayContent {
        title,
        text,
        percent: progress.percent,
        indeterminate: progress.indeterminate,
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
