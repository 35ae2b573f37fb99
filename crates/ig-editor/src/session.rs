//! Session coordinator.
//!
//! A `Session` owns the shared store, the host, the template persistence
//! adapter with its auto-save timer, and the revision channel presentation
//! layers subscribe to. All state changes go through `dispatch`.

use crate::actions::EditorAction;
use crate::autosave::AutoSave;
use crate::config::EditorConfig;
use crate::gallery::{AppPhase, ImageFile};
use crate::generation::{CpuInfo, GenerateResult, GenerationProgress};
use crate::host::{ArtifactGenerator, Host, HostResult};
use crate::persistence::{PersistResult, SharedStore, TemplatePersistence, lock_store};
use crate::store::{DocRevision, EditorStore};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

/// Used when the host cannot list fonts or lists none.
pub const FALLBACK_FONTS: [&str; 8] = [
    "Inter",
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Georgia",
    "Monaco",
    "SF Pro",
    "Roboto",
];

pub struct Session<H: Host> {
    store: SharedStore,
    host: Arc<H>,
    persistence: TemplatePersistence<H>,
    autosave: AutoSave<H>,
    revisions: watch::Sender<DocRevision>,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, config: EditorConfig) -> Self {
        let delay = config.autosave_delay();
        let store: SharedStore = Arc::new(Mutex::new(EditorStore::new(config)));
        let host = Arc::new(host);
        let persistence = TemplatePersistence::new(Arc::clone(&store), Arc::clone(&host));
        let autosave = AutoSave::new(persistence.clone(), delay);
        let (revisions, _) = watch::channel(DocRevision::default());
        Self {
            store,
            host,
            persistence,
            autosave,
            revisions,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Run `f` against a read-only view of the store.
    pub fn read<R>(&self, f: impl FnOnce(&EditorStore) -> R) -> R {
        f(&lock_store(&self.store))
    }

    /// Receive the document revision after every change.
    pub fn subscribe(&self) -> watch::Receiver<DocRevision> {
        self.revisions.subscribe()
    }

    /// Apply one action. When it changed the document while a template is
    /// bound, the auto-save timer restarts.
    ///
    /// Call from within a tokio runtime for auto-save to run.
    pub fn dispatch(&self, action: EditorAction) {
        let before = {
            let mut store = lock_store(&self.store);
            let before = store.revision();
            store.apply(action);
            before
        };
        self.commit(before);
    }

    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = EditorAction>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Publish the revision if it moved past `before`, and restart the
    /// auto-save timer when a template is bound.
    fn commit(&self, before: DocRevision) {
        let (after, bound) = {
            let store = lock_store(&self.store);
            let bound = store.current_template().is_some() && store.working_directory().is_some();
            (store.revision(), bound)
        };
        if after == before {
            return;
        }
        self.revisions.send_replace(after);
        if bound {
            self.autosave.schedule();
        }
    }

    // ─── Directory and gallery ───────────────────────────────────────────

    /// Open `path` as the working directory: list its images (all
    /// selected), enter the gallery, and refresh the template list.
    pub async fn open_directory(&self, path: &str, name: &str) -> HostResult<usize> {
        let entries = self.host.list_images(path).await.inspect_err(|err| {
            log::error!("failed to list images in {path}: {err}");
        })?;
        let images: Vec<ImageFile> = entries
            .into_iter()
            .map(|entry| ImageFile {
                thumbnail_url: self.host.display_url(&entry.path),
                path: entry.path,
                name: entry.name,
            })
            .collect();
        let count = images.len();
        {
            let mut store = lock_store(&self.store);
            store.set_working_directory(path, name);
            store.set_all_images(images);
            store.set_phase(AppPhase::Gallery);
        }
        log::info!("opened {path} with {count} images");
        self.persistence.fetch_templates().await;
        Ok(count)
    }

    /// Installed font families, or `FALLBACK_FONTS`.
    pub async fn load_fonts(&self) -> Vec<String> {
        match self.host.system_fonts().await {
            Ok(fonts) if !fonts.is_empty() => fonts,
            Ok(_) => FALLBACK_FONTS.iter().map(|f| f.to_string()).collect(),
            Err(err) => {
                log::warn!("failed to load system fonts: {err}");
                FALLBACK_FONTS.iter().map(|f| f.to_string()).collect()
            }
        }
    }

    pub fn cpu_info(&self) -> CpuInfo {
        self.host.cpu_info()
    }

    // ─── Templates ───────────────────────────────────────────────────────

    pub async fn fetch_templates(&self) {
        self.persistence.fetch_templates().await;
    }

    pub async fn save_template(&self, name: &str) -> PersistResult<String> {
        self.persistence.save_template(name).await
    }

    /// Load a template and bind it for auto-save. The load itself does not
    /// schedule a save.
    pub async fn load_template(&self, path: &str) -> PersistResult<()> {
        self.persistence.load_template(path).await?;
        let revision = lock_store(&self.store).revision();
        self.revisions.send_replace(revision);
        Ok(())
    }

    pub async fn delete_template(&self, path: &str) -> PersistResult<()> {
        self.persistence.delete_template(path).await
    }

    /// Wait for a pending auto-save to complete.
    pub async fn autosave_idle(&self) {
        self.autosave.idle().await;
    }

    /// Save a bound template now instead of waiting for the timer.
    pub async fn flush_autosave(&self) {
        self.autosave.flush().await;
    }

    // ─── Generation ──────────────────────────────────────────────────────

    /// Build the request and hand it to `generator`. Failures are reported
    /// in the result, never returned as errors.
    pub async fn generate<G: ArtifactGenerator + ?Sized>(
        &self,
        generator: &G,
        parallelism: usize,
        progress: mpsc::UnboundedSender<GenerationProgress>,
    ) -> GenerateResult {
        let (before, built) = {
            let mut store = lock_store(&self.store);
            let before = store.revision();
            (before, store.generate_request(parallelism))
        };
        self.commit(before);
        let request = match built {
            Ok(request) => request,
            Err(reason) => {
                log::warn!("generation not started: {reason}");
                return GenerateResult::failure(reason);
            }
        };
        log::info!(
            "generating {} artifacts with parallelism {}",
            request.selected_images.len(),
            request.parallelism
        );
        match generator.generate(request, progress).await {
            Ok(result) => result,
            Err(err) => {
                log::error!("generation failed: {err}");
                GenerateResult::failure(err.to_string())
            }
        }
    }
}
