// Platform boundary for the live-activity surface
//
// The coordinator never talks to an OS notification API directly; rendering
// goes through `ActivityPlatform` and permission checks through
// `CapabilityGate`. Desktop ships a terminal-notification implementation
// (`crate::desktop`); tests inject recording mocks.

use async_trait::async_trait;

use crate::activity::presentation::DisplayContent;
use crate::models::{DismissalPolicy, LiveActivityRecord};

/// Opaque reference to the OS-level activity object. Platform activities can
/// outlive the hosting process, so the handle may be re-listed and adopted
/// after a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformHandle {
    /// Platform-assigned identifier.
    pub id: String,
}

impl PlatformHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Failure reported by a platform call.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The OS surface that materializes, refreshes and tears down the activity.
///
/// Calls may suspend; none of them are retried. The coordinator guarantees
/// `update_content` and `end` are only called with a handle previously
/// returned by `request` or `list_existing`.
#[async_trait]
pub trait ActivityPlatform: Send + Sync {
    /// Materializes a new activity and returns its handle.
    async fn request(
        &self,
        record: &LiveActivityRecord,
        display: &DisplayContent,
    ) -> Result<PlatformHandle, PlatformError>;

    /// Pushes updated display content to an existing activity.
    async fn update_content(
        &self,
        handle: &PlatformHandle,
        display: &DisplayContent,
    ) -> Result<(), PlatformError>;

    /// Takes the activity down, optionally rendering a final display first.
    async fn end(
        &self,
        handle: &PlatformHandle,
        final_display: Option<&DisplayContent>,
        dismissal: DismissalPolicy,
    ) -> Result<(), PlatformError>;

    /// Snapshot of the activities the platform still surfaces. Used to adopt
    /// an activity that outlived the hosting process.
    fn list_existing(&self) -> Vec<PlatformHandle>;
}

/// Permission boundary for the platform surface. Consulted only when
/// creating the activity.
pub trait CapabilityGate: Send + Sync {
    fn has_capability(&self) -> bool;

    /// Fire-and-forget permission request; never awaited.
    fn request_capability(&self);
}
