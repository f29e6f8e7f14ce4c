//! Desktop implementation of the platform boundary.
//!
//! Desktop has no ActivityKit-style surface, so the activity is rendered as
//! terminal desktop notifications (BEL, OSC 9, OSC 777) — one emission per
//! create/update and a final one on end. Emitted notifications are not
//! enumerable afterwards, so `list_existing` always reports none and
//! recovery never adopts on desktop.

use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::activity::platform::{ActivityPlatform, CapabilityGate, PlatformError, PlatformHandle};
use crate::activity::presentation::DisplayContent;
use crate::models::{DismissalPolicy, LiveActivityRecord};

/// Terminal-notification backed platform.
///
/// Tracks the tag of the one surfaced notification so a stale handle from a
/// previous surface cannot refresh the current one.
#[derive(Default)]
pub struct TerminalNotificationPlatform {
    current_tag: Mutex<Option<String>>,
}

impl TerminalNotificationPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one notification frame to the controlling terminal.
    fn emit(&self, display: &DisplayContent) -> Result<()> {
        let mut stdout = io::stdout();

        // BEL - universal terminal bell
        stdout
            .write_all(b"\x07")
            .context("failed to ring terminal bell")?;

        // OSC 9 - iTerm2 notification, body only
        let osc9 = format!("\x1b]9;{}\x07", escape_osc(&display.text));
        stdout
            .write_all(osc9.as_bytes())
            .context("failed to emit OSC 9 notification")?;

        // OSC 777 - Konsole/VTE notification with title and body
        let osc777 = format!(
            "\x1b]777;notify;{};{}\x07",
            escape_osc(&display.title),
            escape_osc(&display.text)
        );
        stdout
            .write_all(osc777.as_bytes())
            .context("failed to emit OSC 777 notification")?;

        stdout.flush().context("failed to flush notification output")
    }
}

/// Strips characters that would terminate or corrupt an OSC sequence.
fn escape_osc(value: &str) -> String {
    value
        .replace('\x07', "")
        .replace('\x1b', "")
        .replace('\n', " ")
        .replace('\r', "")
}

#[async_trait]
impl ActivityPlatform for TerminalNotificationPlatform {
    async fn request(
        &self,
        record: &LiveActivityRecord,
        display: &DisplayContent,
    ) -> Result<PlatformHandle, PlatformError> {
        self.emit(display)
            .map_err(|err| PlatformError::new(err.to_string()))?;
        *self.current_tag.lock().unwrap() = Some(record.id.clone());
        debug!(id = %record.id, "terminal notification surfaced");
        Ok(PlatformHandle::new(record.id.clone()))
    }

    async fn update_content(
        &self,
        handle: &PlatformHandle,
        display: &DisplayContent,
    ) -> Result<(), PlatformError> {
        {
            let tag = self.current_tag.lock().unwrap();
            if tag.as_deref() != Some(handle.id.as_str()) {
                return Err(PlatformError::new(format!(
                    "no surfaced notification with tag {}",
                    handle.id
                )));
            }
        }
        self.emit(display)
            .map_err(|err| PlatformError::new(err.to_string()))?;
        let percent = display.percent;
        debug!(id = %handle.id, percent, "terminal notification refreshed");
        Ok(())
    }

    async fn end(
        &self,
        handle: &PlatformHandle,
        final_display: Option<&DisplayContent>,
        dismissal: DismissalPolicy,
    ) -> Result<(), PlatformError> {
        if let Some(display) = final_display {
            self.emit(display)
                .map_err(|err| PlatformError::new(err.to_string()))?;
        }
        if let DismissalPolicy::After { deadline } = dismissal {
            // terminal notifications cannot be scheduled away
            debug!(%deadline, "dismissal deadline not supported for terminal notifications");
        }
        self.current_tag.lock().unwrap().take();
        debug!(id = %handle.id, "terminal notification ended");
        Ok(())
    }

    fn list_existing(&self) -> Vec<PlatformHandle> {
        // nothing survives the process; emitted notifications are one-shot
        Vec::new()
    }
}

/// Desktop capability gate. Terminal notifications need no OS permission, so
/// the capability is always granted and requests are no-ops.
pub struct DesktopCapabilityGate;

impl CapabilityGate for DesktopCapabilityGate {
    fn has_capability(&self) -> bool {
        true
    }

    fn request_capability(&self) {}
}
