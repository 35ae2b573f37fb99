//! Template persistence adapter.
//!
//! Bridges the shared store and a `TemplateStorage` collaborator. The store
//! lock is only held to snapshot or apply state, never across an await.

use crate::host::{HostError, TemplateStorage};
use crate::store::EditorStore;
use ig_core::template::timestamp_now;
use ig_core::{CoreError, TemplatePayload};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub type SharedStore = Arc<Mutex<EditorStore>>;

/// Lock the store, recovering from a poisoned mutex. Store operations are
/// total, so a panicking holder cannot leave it half-updated.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, EditorStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no working directory is open")]
    NoWorkingDirectory,
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PersistResult<T> = Result<T, PersistError>;

pub struct TemplatePersistence<S: ?Sized> {
    store: SharedStore,
    storage: Arc<S>,
}

impl<S: ?Sized> Clone for TemplatePersistence<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: TemplateStorage + ?Sized> TemplatePersistence<S> {
    pub fn new(store: SharedStore, storage: Arc<S>) -> Self {
        Self { store, storage }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Refresh the store's template list. Failures leave an empty list.
    pub async fn fetch_templates(&self) {
        let Some(dir) = self.working_directory() else {
            return;
        };
        let templates = match self.storage.list(&dir).await {
            Ok(templates) => templates,
            Err(err) => {
                log::warn!("failed to list templates in {dir}: {err}");
                Vec::new()
            }
        };
        lock_store(&self.store).set_templates(templates);
    }

    /// Save the current document under `name`, then refresh the list.
    /// Returns the storage path.
    pub async fn save_template(&self, name: &str) -> PersistResult<String> {
        let result = self.try_save(name).await;
        match &result {
            Ok(path) => {
                log::debug!("saved template `{name}` to {path}");
                self.fetch_templates().await;
            }
            Err(err) => log::error!("failed to save template `{name}`: {err}"),
        }
        result
    }

    async fn try_save(&self, name: &str) -> PersistResult<String> {
        let (dir, data) = {
            let store = lock_store(&self.store);
            let dir = store
                .working_directory()
                .map(|wd| wd.path.clone())
                .ok_or(PersistError::NoWorkingDirectory)?;
            let payload = TemplatePayload::from_document(name, store.document(), timestamp_now());
            (dir, payload.encode()?)
        };
        Ok(self.storage.save(&dir, name, data).await?)
    }

    /// Replace the document with the template at `path` and bind its name
    /// for auto-save.
    pub async fn load_template(&self, path: &str) -> PersistResult<()> {
        let result = self.try_load(path).await;
        if let Err(err) = &result {
            log::error!("failed to load template {path}: {err}");
        }
        result
    }

    async fn try_load(&self, path: &str) -> PersistResult<()> {
        let json = self.storage.load(path).await?;
        let payload = TemplatePayload::decode(&json)?;
        lock_store(&self.store).load_payload(payload);
        Ok(())
    }

    pub async fn delete_template(&self, path: &str) -> PersistResult<()> {
        match self.storage.delete(path).await {
            Ok(()) => {
                self.fetch_templates().await;
                Ok(())
            }
            Err(err) => {
                log::error!("failed to delete template {path}: {err}");
                Err(err.into())
            }
        }
    }

    fn working_directory(&self) -> Option<String> {
        lock_store(&self.store)
            .working_directory()
            .map(|wd| wd.path.clone())
    }
}
