//! Host collaborator traits.
//!
//! The editor never touches the filesystem or a renderer directly. A host
//! (desktop shell, CLI, test double) provides image enumeration, template
//! storage, fonts, CPU information and batch generation through these
//! traits.

use crate::generation::{CpuInfo, GenerateRequest, GenerateResult, GenerationProgress};
use async_trait::async_trait;
use ig_core::TemplateInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Failure reported by a host collaborator.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Other(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// An image file as enumerated by the host, before a display url exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: String,
    pub name: String,
}

/// Image enumeration and display-url resolution.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Image files of `directory`, in display order.
    async fn list_images(&self, directory: &str) -> HostResult<Vec<ImageEntry>>;

    /// A url the presentation layer can render for `path`.
    fn display_url(&self, path: &str) -> String;

    /// Installed font families.
    async fn system_fonts(&self) -> HostResult<Vec<String>>;

    fn cpu_info(&self) -> CpuInfo;
}

/// Opaque template blob storage.
#[async_trait]
pub trait TemplateStorage: Send + Sync {
    /// Store `data` under `name` in `working_directory`; returns the storage path.
    async fn save(&self, working_directory: &str, name: &str, data: String) -> HostResult<String>;

    async fn load(&self, path: &str) -> HostResult<String>;

    /// Templates of `working_directory`, newest first.
    async fn list(&self, working_directory: &str) -> HostResult<Vec<TemplateInfo>>;

    async fn delete(&self, path: &str) -> HostResult<()>;
}

/// External batch renderer.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    async fn generate(
        &self,
        request: GenerateRequest,
        progress: UnboundedSender<GenerationProgress>,
    ) -> HostResult<GenerateResult>;
}

/// Everything a session needs from its host.
pub trait Host: MediaSource + TemplateStorage + 'static {}

impl<T: MediaSource + TemplateStorage + 'static> Host for T {}
