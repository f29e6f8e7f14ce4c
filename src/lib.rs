//! Single persistent, OS-surfaced "live activity": one progress indicator
//! for one long-running background task, kept in sync with
//! application-supplied state updates across process restarts.
//!
//! One activity exists at a time. `create` is idempotent while an activity
//! is up, `update` replaces the dynamic state wholesale, and `remove` tears
//! the surface down. After a restart the coordinator re-adopts a surviving
//! platform activity instead of creating a second one.

use std::sync::Arc;

use tauri::{
    plugin::{Builder, TauriPlugin},
    AppHandle, Manager, Runtime,
};

pub mod activity;
pub mod desktop;

mod commands;
mod error;
mod models;

pub use error::{Error, Result};
pub use models::*;

use activity::coordinator::LiveActivityCoordinator;
use activity::platform::{ActivityPlatform, CapabilityGate};
use desktop::{DesktopCapabilityGate, TerminalNotificationPlatform};

/// Access to the live-activity APIs.
pub struct LiveActivity<R: Runtime> {
    _app: AppHandle<R>,
    coordinator: LiveActivityCoordinator,
}

impl<R: Runtime> LiveActivity<R> {
    pub async fn create_live_activity(&self, payload: CreateLiveActivityRequest) -> Result<()> {
        self.coordinator.create(payload).await.map(|_| ())
    }

    pub async fn update_live_activity(&self, payload: UpdateLiveActivityRequest) -> Result<()> {
        // benign no-ops and post-create platform failures are absorbed
        let _ = self.coordinator.update(payload).await;
        Ok(())
    }

    pub async fn remove_live_activity(
        &self,
        payload: Option<RemoveLiveActivityRequest>,
    ) -> Result<()> {
        let _ = self.coordinator.remove(payload).await;
        Ok(())
    }

    /// The underlying coordinator, for callers that want phase or record
    /// snapshots.
    pub fn coordinator(&self) -> &LiveActivityCoordinator {
        &self.coordinator
    }
}

pub trait LiveActivityExt<R: Runtime> {
    fn live_activity(&self) -> &LiveActivity<R>;
}

impl<R: Runtime, T: Manager<R>> LiveActivityExt<R> for T {
    fn live_activity(&self) -> &LiveActivity<R> {
        self.state::<LiveActivity<R>>().inner()
    }
}

/// Initializes the plugin with the stock desktop platform and capability
/// gate.
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    init_with_platform(
        Arc::new(TerminalNotificationPlatform::new()),
        Arc::new(DesktopCapabilityGate),
    )
}

/// Initializes the plugin with a custom platform and capability gate, for
/// embedders that bring their own notification backend.
pub fn init_with_platform<R: Runtime>(
    platform: Arc<dyn ActivityPlatform>,
    capability: Arc<dyn CapabilityGate>,
) -> TauriPlugin<R> {
    Builder::new("live-activity")
        .invoke_handler(tauri::generate_handler![
            commands::create_live_activity,
            commands::update_live_activity,
            commands::remove_live_activity
        ])
        .setup(move |app, _api| {
            let coordinator = LiveActivityCoordinator::new(platform, capability);
            app.manage(LiveActivity {
                _app: app.clone(),
                coordinator,
            });
            Ok(())
        })
        .build()
}
