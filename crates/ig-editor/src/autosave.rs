//! Debounced auto-save.
//!
//! Each `schedule` call takes a new ticket and spawns a timer task. When a
//! timer fires it saves only if its ticket is still the latest one, so a
//! burst of edits inside the quiet period produces a single save. The
//! template name and document are read at fire time, not at schedule time.

use crate::persistence::{TemplatePersistence, lock_store};
use crate::host::TemplateStorage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct AutoSave<S: ?Sized> {
    persistence: TemplatePersistence<S>,
    delay: Duration,
    ticket: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<S: TemplateStorage + ?Sized + 'static> AutoSave<S> {
    pub fn new(persistence: TemplatePersistence<S>, delay: Duration) -> Self {
        Self {
            persistence,
            delay,
            ticket: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Restart the quiet-period timer. Outside a tokio runtime this only
    /// invalidates any pending timer.
    pub fn schedule(&self) {
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("auto-save skipped: no async runtime");
            return;
        };
        log::debug!("auto-save scheduled in {:?} (ticket {ticket})", self.delay);

        let persistence = self.persistence.clone();
        let latest = Arc::clone(&self.ticket);
        let delay = self.delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != ticket {
                return;
            }
            save_bound_template(&persistence).await;
        });
        let superseded = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(superseded) = superseded {
            superseded.abort();
        }
    }

    /// Drop any pending timer without saving.
    pub fn cancel(&self) {
        self.ticket.fetch_add(1, Ordering::SeqCst);
    }

    /// Cancel the timer and save right away if a template is bound.
    pub async fn flush(&self) {
        self.cancel();
        save_bound_template(&self.persistence).await;
    }

    /// Wait for the most recently scheduled timer to finish.
    pub async fn idle(&self) {
        let handle = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle
            && let Err(err) = handle.await
            && !err.is_cancelled()
        {
            log::error!("auto-save task failed: {err}");
        }
    }
}

async fn save_bound_template<S: TemplateStorage + ?Sized>(persistence: &TemplatePersistence<S>) {
    let name = {
        let store = lock_store(persistence.store());
        match (store.current_template(), store.working_directory()) {
            (Some(name), Some(_)) => name.to_string(),
            _ => return,
        }
    };
    match persistence.save_template(&name).await {
        Ok(_) => log::info!("auto-saved template `{name}`"),
        Err(err) => log::error!("auto-save of `{name}` failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostResult;
    use crate::store::EditorStore;
    use async_trait::async_trait;
    use ig_core::TemplateInfo;

    struct NoStorage;

    #[async_trait]
    impl TemplateStorage for NoStorage {
        async fn save(&self, _: &str, _: &str, _: String) -> HostResult<String> {
            Ok(String::new())
        }

        async fn load(&self, _: &str) -> HostResult<String> {
            Ok(String::new())
        }

        async fn list(&self, _: &str) -> HostResult<Vec<TemplateInfo>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _: &str) -> HostResult<()> {
            Ok(())
        }
    }

    fn autosave() -> AutoSave<NoStorage> {
        let store = Arc::new(Mutex::new(EditorStore::default()));
        let persistence = TemplatePersistence::new(store, Arc::new(NoStorage));
        AutoSave::new(persistence, Duration::from_millis(1500))
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_aborts_the_superseded_timer() {
        let autosave = autosave();
        autosave.schedule();
        let first = autosave
            .pending
            .lock()
            .unwrap()
            .as_ref()
            .map(JoinHandle::abort_handle)
            .unwrap();

        autosave.schedule();
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(first.is_finished());

        autosave.idle().await;
        assert!(autosave.pending.lock().unwrap().is_none());
    }
}
