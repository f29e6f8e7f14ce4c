// Lifecycle coordination for the single live activity
//
// Owns the only (record, handle) pair in the system and the phase machine
// guarding it. Platform calls may suspend; every guard check and phase
// transition happens synchronously under the slot lock, and the lock is
// released before any await. `remove` flips the phase to Ending before the
// suspending end call goes out, which is what keeps a racing `update` from
// reviving a terminating activity.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::activity::platform::{ActivityPlatform, CapabilityGate, PlatformHandle};
use crate::activity::presentation::render;
use crate::activity::progress;
use crate::error::{Error, Result};
use crate::models::{
    CreateLiveActivityRequest, LiveActivityRecord, RemoveLiveActivityRequest,
    UpdateLiveActivityRequest, TASK_QUEUE_KIND,
};

/// Where the coordinator sits between create and remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// No record, no handle.
    #[default]
    Idle,
    /// Record and handle present; updates permitted.
    Active,
    /// Termination in flight; updates rejected until the end call settles.
    Ending,
}

/// Why an operation was absorbed as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `create` while an activity already exists.
    AlreadyActive,
    /// `update`/`remove` with nothing present and nothing recoverable.
    NoActiveInstance,
    /// Operation arrived while the end call was in flight.
    EndingInProgress,
    /// `create` without the platform permission; a capability request was
    /// fired as a side effect.
    CapabilityDenied,
    /// `create` with an unrecognized content kind or a missing payload.
    UnsupportedContent,
}

/// What an operation did. No-ops are not caller-visible failures; the
/// command layer discards this while tests assert on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

/// The single owned (phase, record, handle) triple.
#[derive(Debug, Default)]
struct Slot {
    phase: LifecyclePhase,
    record: Option<LiveActivityRecord>,
    handle: Option<PlatformHandle>,
}

/// Single-instance state machine over the live activity.
///
/// Callers are expected to invoke operations from one logical execution
/// context (the command layer); the interior mutex exists because managed
/// Tauri state must be `Send + Sync`, and it is never held across an await.
pub struct LiveActivityCoordinator {
    slot: Mutex<Slot>,
    platform: Arc<dyn ActivityPlatform>,
    capability: Arc<dyn CapabilityGate>,
}

impl LiveActivityCoordinator {
    /// Builds a coordinator and eagerly adopts a platform activity left over
    /// from a previous process, if the platform reports exactly one.
    pub fn new(platform: Arc<dyn ActivityPlatform>, capability: Arc<dyn CapabilityGate>) -> Self {
        let coordinator = Self {
            slot: Mutex::new(Slot::default()),
            platform,
            capability,
        };
        {
            let mut slot = coordinator.slot.lock().unwrap();
            coordinator.adopt_existing(&mut slot);
        }
        coordinator
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.slot.lock().unwrap().phase
    }

    /// Snapshot of the current record, if any.
    pub fn current_record(&self) -> Option<LiveActivityRecord> {
        self.slot.lock().unwrap().record.clone()
    }

    /// Creates and surfaces the activity.
    ///
    /// A second create while one is up is a no-op, not an error. Without the
    /// platform capability this fires a capability request and skips; an
    /// unsupported content kind or missing payload skips silently. Platform
    /// rejection is the one caller-visible failure, and it leaves the
    /// coordinator idle with nothing retained.
    pub async fn create(&self, request: CreateLiveActivityRequest) -> Result<Outcome> {
        {
            let slot = self.slot.lock().unwrap();
            if slot.phase != LifecyclePhase::Idle {
                info!("live activity already exists; skipping create");
                return Ok(Outcome::Skipped(SkipReason::AlreadyActive));
            }
        }

        if !self.capability.has_capability() {
            warn!("platform capability not granted; requesting it");
            self.capability.request_capability();
            return Ok(Outcome::Skipped(SkipReason::CapabilityDenied));
        }

        let content = request.activity_content;
        if content.kind != TASK_QUEUE_KIND {
            info!(kind = %content.kind, "unsupported live activity content kind; skipping create");
            return Ok(Outcome::Skipped(SkipReason::UnsupportedContent));
        }
        let Some(data) = content.data else {
            info!("missing live activity data payload; skipping create");
            return Ok(Outcome::Skipped(SkipReason::UnsupportedContent));
        };

        debug!(
            version = request.activity_content_v,
            "processing live activity creation request"
        );

        let record = LiveActivityRecord::from_content(data);
        let display = render(&record, progress::interpret(&record.state));
        let id = record.id.clone();

        let handle = self
            .platform
            .request(&record, &display)
            .await
            .map_err(Error::PlatformRejected)?;

        let mut slot = self.slot.lock().unwrap();
        slot.record = Some(record);
        slot.handle = Some(handle);
        slot.phase = LifecyclePhase::Active;
        info!(%id, "live activity created");
        Ok(Outcome::Applied)
    }

    /// Replaces the activity's dynamic state and refreshes the surface.
    ///
    /// Skips while the activity is ending. When idle, first tries to adopt
    /// an activity the platform still surfaces; with nothing recoverable the
    /// call is a no-op. A payload without a state mapping keeps the existing
    /// state and just re-renders it.
    pub async fn update(&self, request: UpdateLiveActivityRequest) -> Outcome {
        let (handle, display) = {
            let mut slot = self.slot.lock().unwrap();
            if slot.phase == LifecyclePhase::Ending {
                debug!("live activity is ending; skipping update");
                return Outcome::Skipped(SkipReason::EndingInProgress);
            }
            if slot.record.is_none() {
                self.adopt_existing(&mut slot);
            }
            let Some(record) = slot.record.as_mut() else {
                info!("no live activity to update");
                return Outcome::Skipped(SkipReason::NoActiveInstance);
            };

            if let Some(state) = request.state {
                // whole-mapping replacement, not a per-key merge
                record.state = state;
            }
            let display = render(record, progress::interpret(&record.state));

            let Some(handle) = slot.handle.clone() else {
                warn!("live activity record has no platform handle; skipping update");
                return Outcome::Skipped(SkipReason::NoActiveInstance);
            };
            (handle, display)
        };

        match self.platform.update_content(&handle, &display).await {
            Ok(()) => debug!("live activity updated"),
            Err(err) => warn!(%err, "platform rejected live activity update"),
        }
        Outcome::Applied
    }

    /// Ends the activity and clears the surface.
    ///
    /// The phase flips to `Ending` before the suspending end call is issued;
    /// an update arriving in that window observes `Ending` and no-ops. Once
    /// the call settles the record and handle are cleared and the
    /// coordinator returns to idle.
    pub async fn remove(&self, request: Option<RemoveLiveActivityRequest>) -> Outcome {
        let request = request.unwrap_or_default();
        let dismissal = request.dismissal.unwrap_or_default();

        let (handle, final_display) = {
            let mut slot = self.slot.lock().unwrap();
            if slot.phase == LifecyclePhase::Ending {
                debug!("live activity is already ending; skipping remove");
                return Outcome::Skipped(SkipReason::EndingInProgress);
            }
            if slot.handle.is_none() {
                self.adopt_existing(&mut slot);
            }
            let Some(handle) = slot.handle.clone() else {
                info!("no live activity to end");
                return Outcome::Skipped(SkipReason::NoActiveInstance);
            };

            // Optional final frame, rendered from the surviving record with
            // the caller's final state standing in for the stored mapping.
            let final_display = request.final_state.map(|final_state| {
                let mut record = slot
                    .record
                    .clone()
                    .unwrap_or_else(|| LiveActivityRecord::adopted(handle.id.clone()));
                record.state = final_state;
                render(&record, progress::interpret(&record.state))
            });

            slot.phase = LifecyclePhase::Ending;
            (handle, final_display)
        };

        if let Err(err) = self
            .platform
            .end(&handle, final_display.as_ref(), dismissal)
            .await
        {
            warn!(%err, "platform rejected live activity end");
        }

        let mut slot = self.slot.lock().unwrap();
        slot.record = None;
        slot.handle = None;
        slot.phase = LifecyclePhase::Idle;
        info!("live activity ended");
        Outcome::Applied
    }

    /// Recovery: reattach to a platform-side activity that outlived the
    /// process. Adopts only when the platform reports exactly one handle.
    fn adopt_existing(&self, slot: &mut Slot) {
        let mut existing = self.platform.list_existing();
        if existing.len() > 1 {
            warn!(
                count = existing.len(),
                "multiple existing live activities reported; refusing to adopt"
            );
            return;
        }
        let Some(handle) = existing.pop() else {
            return;
        };

        info!(id = %handle.id, "recovered existing live activity");
        slot.record = Some(LiveActivityRecord::adopted(handle.id.clone()));
        slot.handle = Some(handle);
        slot.phase = LifecyclePhase::Active;
    }
}
