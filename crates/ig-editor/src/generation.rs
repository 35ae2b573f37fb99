//! Batch generation wire types and request assembly.
//!
//! The editor owns none of the rendering. It bundles the document, the
//! table and the ordered selected images into a `GenerateRequest` and hands
//! it to an `ArtifactGenerator`.

use crate::store::EditorStore;
use ig_core::{CanvasObject, Color, TableData};
use serde::{Deserialize, Serialize};

/// Frame settings as the renderer needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSettings {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedImage {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub working_directory: String,
    pub frame: FrameSettings,
    pub objects: Vec<CanvasObject>,
    pub table_data: TableData,
    /// Selected images in listing order.
    pub selected_images: Vec<SelectedImage>,
    /// Output subdirectory, when editing a named template.
    pub template_name: Option<String>,
    pub parallelism: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub success: bool,
    #[serde(default, alias = "generated_files")]
    pub generated_files: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl GenerateResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            generated_files: Vec::new(),
            errors: vec![reason.into()],
        }
    }
}

/// Out-of-band progress of a running batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationProgress {
    pub current: usize,
    pub total: usize,
    #[serde(alias = "current_file")]
    pub current_file: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    #[serde(alias = "logical_cores")]
    pub logical_cores: usize,
    #[serde(alias = "physical_cores")]
    pub physical_cores: usize,
    pub recommended: usize,
}

impl CpuInfo {
    /// Half the logical cores, at least one.
    pub fn new(logical_cores: usize, physical_cores: usize) -> Self {
        Self {
            logical_cores,
            physical_cores,
            recommended: (logical_cores / 2).max(1),
        }
    }
}

/// Why a generation request could not be built.
pub const NO_WORKING_DIRECTORY: &str = "No working directory is open";
pub const NO_SELECTED_IMAGES: &str = "No images are selected";

impl EditorStore {
    /// Assemble the request for the current document and selection.
    ///
    /// Runs `initialize_table_data` first so every row and column has a
    /// value. Fails with a human-readable reason when there is nothing to
    /// generate.
    pub fn generate_request(&mut self, parallelism: usize) -> Result<GenerateRequest, String> {
        let Some(working_directory) = self.working_directory().map(|wd| wd.path.clone()) else {
            return Err(NO_WORKING_DIRECTORY.to_string());
        };
        if self.images().selected_count() == 0 {
            return Err(NO_SELECTED_IMAGES.to_string());
        }

        self.initialize_table_data();

        let frame = self.frame();
        Ok(GenerateRequest {
            working_directory,
            frame: FrameSettings {
                width: frame.width,
                height: frame.height,
                background_color: frame.background_color,
            },
            objects: self.objects().to_vec(),
            table_data: self.table_data().clone(),
            selected_images: self
                .images()
                .selected_images()
                .map(|img| SelectedImage {
                    path: img.path.clone(),
                    name: img.name.clone(),
                })
                .collect(),
            template_name: self.current_template().map(str::to_string),
            parallelism: parallelism.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::ImageFile;
    use pretty_assertions::assert_eq;

    fn image(path: &str) -> ImageFile {
        ImageFile {
            path: path.into(),
            name: path.rsplit('/').next().unwrap_or(path).into(),
            thumbnail_url: path.into(),
        }
    }

    #[test]
    fn recommended_parallelism_is_half_of_logical() {
        assert_eq!(CpuInfo::new(8, 4).recommended, 4);
        assert_eq!(CpuInfo::new(1, 1).recommended, 1);
        assert_eq!(CpuInfo::new(0, 0).recommended, 1);
    }

    #[test]
    fn request_requires_directory_and_images() {
        let mut store = EditorStore::default();
        assert_eq!(store.generate_request(2).unwrap_err(), NO_WORKING_DIRECTORY);
        store.set_working_directory("/in", "in");
        assert_eq!(store.generate_request(2).unwrap_err(), NO_SELECTED_IMAGES);
    }

    #[test]
    fn request_initializes_table_and_keeps_listing_order() {
        let mut store = EditorStore::default();
        store.set_working_directory("/in", "in");
        store.set_all_images(vec![image("/in/a.png"), image("/in/b.png")]);
        store.deselect_all_images();
        store.toggle_image_selection("/in/b.png");
        store.toggle_image_selection("/in/a.png");
        store.proceed_to_editor();
        store.add_text(None);

        let request = store.generate_request(4).unwrap();
        let names: Vec<_> = request.selected_images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(request.table_data["/in/b.png"]["TEXT-1"], "New Text");
        assert_eq!(request.objects.len(), 2);
        assert_eq!(request.template_name, None);
    }

    #[test]
    fn result_accepts_snake_case_fields() {
        let result: GenerateResult = serde_json::from_str(
            r#"{"success":true,"generated_files":["/out/a.png"],"errors":[]}"#,
        )
        .unwrap();
        assert_eq!(result.generated_files, vec!["/out/a.png"]);
        let progress: GenerationProgress =
            serde_json::from_str(r#"{"current":1,"total":3,"current_file":"a.png"}"#).unwrap();
        assert_eq!(progress.current_file, "a.png");
    }
}
