//! Filesystem-backed host.
//!
//! Images are the regular files of the working directory with a known
//! image extension. Templates live next to them in
//! `.infographics-templates/<name>.json`.

use async_trait::async_trait;
use ig_core::TemplateInfo;
use ig_editor::{CpuInfo, HostError, HostResult, ImageEntry, MediaSource, TemplateStorage};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const TEMPLATES_DIR: &str = ".infographics-templates";

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

#[derive(Debug, Default, Clone, Copy)]
pub struct FsHost;

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Keep alphanumerics, `-`, `_` and spaces.
pub fn safe_name(name: &str) -> HostResult<String> {
    let safe: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    if safe.is_empty() {
        return Err(HostError::InvalidInput(format!(
            "template name `{name}` has no usable characters"
        )));
    }
    Ok(safe)
}

pub fn template_path(working_directory: &str, name: &str) -> HostResult<PathBuf> {
    Ok(Path::new(working_directory)
        .join(TEMPLATES_DIR)
        .join(format!("{}.json", safe_name(name)?)))
}

fn not_found(path: &str) -> impl FnOnce(std::io::Error) -> HostError + '_ {
    move |err| match err.kind() {
        ErrorKind::NotFound => HostError::NotFound(path.to_string()),
        _ => HostError::Io(err),
    }
}

/// The listing only needs these two fields of a payload.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateHeader {
    name: Option<String>,
    #[serde(default)]
    created_at: String,
}

#[async_trait]
impl MediaSource for FsHost {
    async fn list_images(&self, directory: &str) -> HostResult<Vec<ImageEntry>> {
        let mut dir = tokio::fs::read_dir(directory)
            .await
            .map_err(not_found(directory))?;
        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !is_image(&path) {
                continue;
            }
            entries.push(ImageEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: path.to_string_lossy().into_owned(),
            });
        }
        entries.sort_by_key(|e| e.name.to_lowercase());
        Ok(entries)
    }

    fn display_url(&self, path: &str) -> String {
        format!("file://{path}")
    }

    async fn system_fonts(&self) -> HostResult<Vec<String>> {
        Err(HostError::Other(
            "font enumeration is not available from the command line".into(),
        ))
    }

    fn cpu_info(&self) -> CpuInfo {
        let logical = std::thread::available_parallelism().map_or(1, |n| n.get());
        CpuInfo::new(logical, logical)
    }
}

#[async_trait]
impl TemplateStorage for FsHost {
    async fn save(&self, working_directory: &str, name: &str, data: String) -> HostResult<String> {
        let path = template_path(working_directory, name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> HostResult<String> {
        tokio::fs::read_to_string(path).await.map_err(not_found(path))
    }

    async fn list(&self, working_directory: &str) -> HostResult<Vec<TemplateInfo>> {
        let root = Path::new(working_directory).join(TEMPLATES_DIR);
        let mut dir = match tokio::fs::read_dir(&root).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut templates = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let header = match tokio::fs::read_to_string(&path).await {
                Ok(json) => serde_json::from_str::<TemplateHeader>(&json).ok(),
                Err(_) => None,
            };
            let Some(header) = header else {
                log::warn!("skipping unreadable template {}", path.display());
                continue;
            };
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            templates.push(TemplateInfo {
                name: header.name.unwrap_or(stem),
                path: path.to_string_lossy().into_owned(),
                created_at: header.created_at,
            });
        }
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(templates)
    }

    async fn delete(&self, path: &str) -> HostResult<()> {
        tokio::fs::remove_file(path).await.map_err(not_found(path))
    }
}
