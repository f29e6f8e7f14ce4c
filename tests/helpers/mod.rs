// Shared fixtures for the integration suites
#![allow(dead_code)]

pub mod mock_platform;

use std::collections::HashMap;

use tauri_plugin_live_activity::{
    ActivityContent, CreateLiveActivityRequest, TaskQueueContent, UpdateLiveActivityRequest,
    TASK_QUEUE_KIND,
};

pub fn state_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// A well-formed task-queue creation request with the given id and state.
pub fn create_request(id: &str, state: &[(&str, &str)]) -> CreateLiveActivityRequest {
    CreateLiveActivityRequest {
        activity_content_v: 1,
        activity_content: ActivityContent {
            kind: TASK_QUEUE_KIND.to_string(),
            data: Some(TaskQueueContent {
                id: id.to_string(),
                title: "Download assets".to_string(),
                text: "fetching".to_string(),
                task_name: "Sync".to_string(),
                task_type: "network".to_string(),
                task_icon: "icon.png".to_string(),
                state: state_map(state),
            }),
        },
    }
}

pub fn update_request(entries: &[(&str, &str)]) -> UpdateLiveActivityRequest {
    UpdateLiveActivityRequest {
        state: Some(state_map(entries)),
    }
}
