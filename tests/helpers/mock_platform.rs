// Recording mocks of the platform boundary and the capability gate

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tauri_plugin_live_activity::activity::platform::{
    ActivityPlatform, CapabilityGate, PlatformError, PlatformHandle,
};
use tauri_plugin_live_activity::activity::presentation::DisplayContent;
use tauri_plugin_live_activity::{DismissalPolicy, LiveActivityRecord};
use tokio::sync::Notify;

/// One recorded `end` call.
#[derive(Debug, Clone)]
pub struct EndCall {
    pub handle: PlatformHandle,
    pub final_display: Option<DisplayContent>,
    pub dismissal: DismissalPolicy,
}

#[derive(Default)]
struct Recorded {
    requests: Vec<(LiveActivityRecord, DisplayContent)>,
    updates: Vec<(PlatformHandle, DisplayContent)>,
    ends: Vec<EndCall>,
}

/// Scriptable platform: records every call, can reject the next request,
/// can gate `end` so a test can interleave operations while the end call is
/// in flight, and reports a configurable set of pre-existing handles.
#[derive(Default)]
pub struct MockPlatform {
    recorded: Mutex<Recorded>,
    existing: Mutex<Vec<PlatformHandle>>,
    reject_request: AtomicBool,
    gate_end: AtomicBool,
    end_started: Notify,
    end_release: Notify,
}

impl MockPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_existing(ids: &[&str]) -> Arc<Self> {
        let mock = Self::default();
        *mock.existing.lock().unwrap() = ids.iter().map(|id| PlatformHandle::new(*id)).collect();
        Arc::new(mock)
    }

    pub fn set_existing(&self, ids: &[&str]) {
        *self.existing.lock().unwrap() = ids.iter().map(|id| PlatformHandle::new(*id)).collect();
    }

    pub fn reject_next_request(&self) {
        self.reject_request.store(true, Ordering::SeqCst);
    }

    /// Makes `end` block until [`release_end`](Self::release_end).
    pub fn hold_end_calls(&self) {
        self.gate_end.store(true, Ordering::SeqCst);
    }

    pub async fn wait_for_end_started(&self) {
        self.end_started.notified().await;
    }

    pub fn release_end(&self) {
        self.end_release.notify_one();
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<(LiveActivityRecord, DisplayContent)> {
        self.recorded.lock().unwrap().requests.last().cloned()
    }

    pub fn update_count(&self) -> usize {
        self.recorded.lock().unwrap().updates.len()
    }

    pub fn last_update(&self) -> Option<(PlatformHandle, DisplayContent)> {
        self.recorded.lock().unwrap().updates.last().cloned()
    }

    pub fn ends(&self) -> Vec<EndCall> {
        self.recorded.lock().unwrap().ends.clone()
    }
}

#[async_trait]
impl ActivityPlatform for MockPlatform {
    async fn request(
        &self,
        record: &LiveActivityRecord,
        display: &DisplayContent,
    ) -> Result<PlatformHandle, PlatformError> {
        if self.reject_request.swap(false, Ordering::SeqCst) {
            return Err(PlatformError::new("request rejected by test"));
        }
        self.recorded
            .lock()
            .unwrap()
            .requests
            .push((record.clone(), display.clone()));
        Ok(PlatformHandle::new(record.id.clone()))
    }

    async fn update_content(
        &self,
        handle: &PlatformHandle,
        display: &DisplayContent,
    ) -> Result<(), PlatformError> {
        self.recorded
            .lock()
            .unwrap()
            .updates
            .push((handle.clone(), display.clone()));
        Ok(())
    }

    async fn end(
        &self,
        handle: &PlatformHandle,
        final_display: Option<&DisplayContent>,
        dismissal: DismissalPolicy,
    ) -> Result<(), PlatformError> {
        if self.gate_end.load(Ordering::SeqCst) {
            self.end_started.notify_one();
            self.end_release.notified().await;
        }
        self.recorded.lock().unwrap().ends.push(EndCall {
            handle: handle.clone(),
            final_display: final_display.cloned(),
            dismissal,
        });
        Ok(())
    }

    fn list_existing(&self) -> Vec<PlatformHandle> {
        self.existing.lock().unwrap().clone()
    }
}

/// Capability gate with a scriptable grant state; counts requests.
pub struct MockGate {
    granted: AtomicBool,
    requests: AtomicUsize,
}

impl MockGate {
    pub fn granted() -> Arc<Self> {
        Arc::new(Self {
            granted: AtomicBool::new(true),
            requests: AtomicUsize::new(0),
        })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self {
            granted: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl CapabilityGate for MockGate {
    fn has_capability(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request_capability(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}
