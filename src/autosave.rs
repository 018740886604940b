//! Debounced auto-save.
//!
//! Journal text is persisted on a quiet-window debounce: every edit re-arms
//! the timer, so only the last edit within the window triggers a write. The
//! helper owns at most one pending save; arming a new one drops the old, and
//! [`AutoSave::flush`] runs the pending save immediately instead of waiting
//! out the window.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default quiet window before a pending save fires.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(2);

type PendingSave = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A single-slot debouncer for save futures.
///
/// The armed save lives in a slot shared with the timer task; whichever side
/// takes it first (timer expiry or [`AutoSave::flush`]) runs it, so the save
/// executes at most once per arming.
pub struct AutoSave {
    delay: Duration,
    slot: Arc<Mutex<Option<PendingSave>>>,
    timer: Option<JoinHandle<()>>,
}

impl AutoSave {
    /// Creates a debouncer with the given quiet window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    /// Arms (or re-arms) the pending save. Any previously armed save that
    /// has not fired yet is discarded first, so at most one save is pending.
    pub fn trigger<F>(&mut self, save: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        *self.slot.lock().unwrap() = Some(Box::pin(save));

        let slot = Arc::clone(&self.slot);
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let save = slot.lock().unwrap().take();
            if let Some(save) = save {
                save.await;
            }
        }));
        debug!(delay_ms = self.delay.as_millis() as u64, "Auto-save armed");
    }

    /// Runs the pending save immediately and stops the timer. Does nothing
    /// when no save is armed (or the timer already fired).
    pub async fn flush(&mut self) {
        self.stop_timer();
        let save = self.slot.lock().unwrap().take();
        if let Some(save) = save {
            debug!("Auto-save flushed");
            save.await;
        }
    }

    /// Discards the pending save, if any.
    pub fn cancel(&mut self) {
        self.stop_timer();
        if self.slot.lock().unwrap().take().is_some() {
            debug!("Auto-save cancelled");
        }
    }

    /// True while a save is armed and has not fired.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for AutoSave {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}
