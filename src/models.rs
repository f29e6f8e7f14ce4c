// Wire models for the live-activity commands
// Shared between the command layer and the lifecycle coordinator

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one content kind `create` accepts; anything else is skipped.
pub const TASK_QUEUE_KIND: &str = "TaskQueue";

/// Static attributes plus the initial dynamic state for a task-queue
/// activity. Every field is optional on the wire; absent fields land blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskQueueContent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "taskName")]
    pub task_name: String,
    #[serde(default, rename = "taskType")]
    pub task_type: String,
    #[serde(default, rename = "taskIcon")]
    pub task_icon: String,
    #[serde(default)]
    pub state: HashMap<String, String>,
}

/// Activity content as submitted by the caller. The kind is matched at
/// runtime so an unrecognized kind deserializes fine and is skipped instead
/// of failing the whole command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<TaskQueueContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLiveActivityRequest {
    /// Content schema version; logged for diagnostics, not interpreted.
    pub activity_content_v: u32,
    pub activity_content: ActivityContent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLiveActivityRequest {
    /// Replacement for the record's entire state mapping. Omitting it keeps
    /// the existing state unchanged; this is not a per-key merge.
    #[serde(default)]
    pub state: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveLiveActivityRequest {
    /// Optional final state to render one last time before the activity is
    /// taken down (e.g. a completion marker).
    #[serde(default)]
    pub final_state: Option<HashMap<String, String>>,
    /// How the platform should dismiss the surfaced activity. Defaults to
    /// immediate removal.
    #[serde(default)]
    pub dismissal: Option<DismissalPolicy>,
}

/// How the platform takes the surfaced activity down after `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DismissalPolicy {
    /// Remove the surface as soon as the end call lands.
    #[default]
    Immediate,
    /// Let the OS decide when to clear it.
    SystemDefault,
    /// Keep the final content visible until the deadline passes.
    After { deadline: DateTime<Utc> },
}

/// The single live-instance descriptor. Owned exclusively by the lifecycle
/// coordinator; destroyed when `remove` completes.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveActivityRecord {
    pub id: String,
    pub title: String,
    pub text: String,
    pub task_name: String,
    pub task_type: String,
    /// Opaque icon reference, forwarded to the platform untouched.
    pub task_icon: String,
    /// Dynamic state; replaced wholesale by `update`.
    pub state: HashMap<String, String>,
}

impl LiveActivityRecord {
    pub fn from_content(content: TaskQueueContent) -> Self {
        Self {
            id: content.id,
            title: content.title,
            text: content.text,
            task_name: content.task_name,
            task_type: content.task_type,
            task_icon: content.task_icon,
            state: content.state,
        }
    }

    /// Best-effort reconstruction for an adopted platform handle. The
    /// platform only retains the handle id, so static fields start blank.
    pub fn adopted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            text: String::new(),
            task_name: String::new(),
            task_type: String::new(),
            task_icon: String::new(),
            state: HashMap::new(),
        }
    }
}
