use tauri::{command, AppHandle, Runtime};

use crate::error::Result;
use crate::models::{
    CreateLiveActivityRequest, RemoveLiveActivityRequest, UpdateLiveActivityRequest,
};
use crate::LiveActivityExt;

#[command]
pub(crate) async fn create_live_activity<R: Runtime>(
    app: AppHandle<R>,
    payload: CreateLiveActivityRequest,
) -> Result<()> {
    app.live_activity().create_live_activity(payload).await
}

#[command]
pub(crate) async fn update_live_activity<R: Runtime>(
    app: AppHandle<R>,
    payload: UpdateLiveActivityRequest,
) -> Result<()> {
    app.live_activity().update_live_activity(payload).await
}

#[command]
pub(crate) async fn remove_live_activity<R: Runtime>(
    app: AppHandle<R>,
    payload: Option<RemoveLiveActivityRequest>,
) -> Result<()> {
    app.live_activity().remove_live_activity(payload).await
}
