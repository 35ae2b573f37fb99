//! Reducer-style editor actions.
//!
//! Every state change a presentation layer can request is one
//! `EditorAction` variant, applied through `EditorStore::apply`. Actions
//! are plain data (serde-tagged by `action`) so a UI bridge can post them
//! as JSON.

use crate::gallery::{AppPhase, EditorTab, ImageFile};
use crate::store::{EditorStore, HorizontalAlignment, VerticalAlignment};
use ig_core::{AspectRatio, FramePatch, ObjectId, ObjectPatch};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditorAction {
    // ── Phase / images ──
    SetPhase { phase: AppPhase },
    SetActiveTab { tab: EditorTab },
    SetWorkingDirectory { path: String, name: String },
    ClearWorkingDirectory,
    SetAllImages { images: Vec<ImageFile> },
    ToggleImageSelection { path: String },
    SelectAllImages,
    DeselectAllImages,
    ProceedToEditor,
    OpenGalleryForReplacement,
    CloseGalleryOverlay,
    ReplaceHeroImage { src: String, original_path: String },

    // ── Frame ──
    SetFrame { patch: FramePatch },
    ApplyAspectRatio { ratio: AspectRatio },

    // ── Objects ──
    AddText {
        #[serde(default)]
        partial: Option<ObjectPatch>,
    },
    AddImage {
        src: String,
        #[serde(default)]
        name: Option<String>,
    },
    SetBackground {
        src: String,
        #[serde(default)]
        original_path: Option<String>,
    },
    UpdateObject { id: ObjectId, patch: ObjectPatch },
    DeleteObject { id: ObjectId },
    DeleteSelected,
    DuplicateObject { id: ObjectId },

    // ── Selection ──
    SelectObject { id: Option<ObjectId> },
    SelectMultiple { ids: Vec<ObjectId> },
    ToggleObjectSelection { id: ObjectId },
    SelectFrame,
    ClearSelection,

    // ── Layer order ──
    ReorderObjects { from: usize, to: usize },
    MoveToFront { id: ObjectId },
    MoveToBack { id: ObjectId },

    // ── Alignment ──
    AlignHorizontal { alignment: HorizontalAlignment },
    AlignVertical { alignment: VerticalAlignment },

    // ── Viewport ──
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    FitToView { width: f64, height: f64 },

    // ── Table ──
    InitializeTableData,
    SetTableTextValue { image_path: String, key: String, value: String },
    SetTableTextColumn { key: String, block: String },
    PruneTableData,

    // ── Document ──
    ResetEditor,
    ClearCurrentTemplate,
}

impl EditorStore {
    /// Apply one action. Like every store operation this is total.
    pub fn apply(&mut self, action: EditorAction) {
        log::trace!("apply {action:?}");
        match action {
            EditorAction::SetPhase { phase } => self.set_phase(phase),
            EditorAction::SetActiveTab { tab } => self.set_active_tab(tab),
            EditorAction::SetWorkingDirectory { path, name } => {
                self.set_working_directory(path, name)
            }
            EditorAction::ClearWorkingDirectory => self.clear_working_directory(),
            EditorAction::SetAllImages { images } => self.set_all_images(images),
            EditorAction::ToggleImageSelection { path } => self.toggle_image_selection(&path),
            EditorAction::SelectAllImages => self.select_all_images(),
            EditorAction::DeselectAllImages => self.deselect_all_images(),
            EditorAction::ProceedToEditor => self.proceed_to_editor(),
            EditorAction::OpenGalleryForReplacement => self.open_gallery_for_replacement(),
            EditorAction::CloseGalleryOverlay => self.close_gallery_overlay(),
            EditorAction::ReplaceHeroImage { src, original_path } => {
                self.replace_hero_image(src, original_path)
            }

            EditorAction::SetFrame { patch } => self.set_frame(patch),
            EditorAction::ApplyAspectRatio { ratio } => self.apply_aspect_ratio(ratio),

            EditorAction::AddText { partial } => {
                self.add_text(partial);
            }
            EditorAction::AddImage { src, name } => {
                self.add_image(src, name.as_deref());
            }
            EditorAction::SetBackground { src, original_path } => {
                self.set_background(src, original_path);
            }
            EditorAction::UpdateObject { id, patch } => self.update_object(id, patch),
            EditorAction::DeleteObject { id } => self.delete_object(id),
            EditorAction::DeleteSelected => self.delete_selected(),
            EditorAction::DuplicateObject { id } => {
                self.duplicate_object(id);
            }

            EditorAction::SelectObject { id } => self.select_object(id),
            EditorAction::SelectMultiple { ids } => self.select_multiple(ids),
            EditorAction::ToggleObjectSelection { id } => self.toggle_object_selection(id),
            EditorAction::SelectFrame => self.select_frame(),
            EditorAction::ClearSelection => self.clear_selection(),

            EditorAction::ReorderObjects { from, to } => self.reorder_objects(from, to),
            EditorAction::MoveToFront { id } => self.move_to_front(id),
            EditorAction::MoveToBack { id } => self.move_to_back(id),

            EditorAction::AlignHorizontal { alignment } => self.align_horizontal(alignment),
            EditorAction::AlignVertical { alignment } => self.align_vertical(alignment),

            EditorAction::SetZoom { zoom } => self.set_zoom(zoom),
            EditorAction::ZoomIn => self.zoom_in(),
            EditorAction::ZoomOut => self.zoom_out(),
            EditorAction::FitToView { width, height } => self.fit_to_view(width, height),

            EditorAction::InitializeTableData => self.initialize_table_data(),
            EditorAction::SetTableTextValue {
                image_path,
                key,
                value,
            } => self.set_table_text_value(&image_path, &key, value),
            EditorAction::SetTableTextColumn { key, block } => {
                self.set_table_text_column(&key, &block)
            }
            EditorAction::PruneTableData => {
                self.prune_table_data();
            }

            EditorAction::ResetEditor => self.reset_editor(),
            EditorAction::ClearCurrentTemplate => self.clear_current_template(),
        }
    }
}
