//! The mutation engine.
//!
//! `EditorStore` is the single authoritative state container of an
//! editing session. Every operation runs to completion synchronously and
//! is total: a missing id, a hero delete, or an out-of-range index is a
//! no-op, never an error.
//!
//! Each mutation that actually changes the frame, the layer list, or the
//! table bumps the matching counter in `DocRevision`. Observers (auto-save,
//! presentation layers) compare revisions instead of diffing documents.

use crate::config::EditorConfig;
use crate::gallery::{AppPhase, EditorTab, GalleryMode, ImageFile, ImageSet, WorkingDirectory};
use crate::selection::Selection;
use crate::viewport::Viewport;
use ig_core::geometry::round_px;
use ig_core::model::*;
use ig_core::{ObjectId, TemplateInfo, TemplatePayload};
use serde::{Deserialize, Serialize};

/// Display name given to the hero layer.
pub const HERO_NAME: &str = "Main image";
pub const BACKGROUND_NAME: &str = "Background";

// ─── Revisions ───────────────────────────────────────────────────────────

/// Change counters for the three persisted parts of the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocRevision {
    pub frame: u64,
    pub objects: u64,
    pub table: u64,
}

// ─── Alignment ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

// ─── Store ───────────────────────────────────────────────────────────────

/// Editing-session state: the document plus everything around it that
/// drives the derived views (selection, zoom, image set, templates).
pub struct EditorStore {
    config: EditorConfig,
    pub(crate) doc: Document,
    phase: AppPhase,
    active_tab: EditorTab,
    gallery_mode: GalleryMode,
    gallery_overlay_open: bool,
    working_directory: Option<WorkingDirectory>,
    pub(crate) images: ImageSet,
    selection: Selection,
    viewport: Viewport,
    templates: Vec<TemplateInfo>,
    current_template: Option<String>,
    pub(crate) revision: DocRevision,
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorStore {
    /// Create a store with a default 1080×1080 white frame and no layers.
    pub fn new(config: EditorConfig) -> Self {
        let viewport = Viewport::new(&config);
        Self {
            config,
            doc: Document::new(),
            phase: AppPhase::default(),
            active_tab: EditorTab::default(),
            gallery_mode: GalleryMode::default(),
            gallery_overlay_open: false,
            working_directory: None,
            images: ImageSet::default(),
            selection: Selection::default(),
            viewport,
            templates: Vec::new(),
            current_template: None,
            revision: DocRevision::default(),
        }
    }

    // ─── Read-only views ─────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn frame(&self) -> &Frame {
        &self.doc.frame
    }

    pub fn objects(&self) -> &[CanvasObject] {
        &self.doc.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.doc.get(id)
    }

    pub fn table_data(&self) -> &TableData {
        &self.doc.table_data
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Objects currently selected, in selection order.
    pub fn selected_objects(&self) -> impl Iterator<Item = &CanvasObject> {
        self.selection.ids().iter().filter_map(|id| self.doc.get(*id))
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn active_tab(&self) -> EditorTab {
        self.active_tab
    }

    pub fn gallery_mode(&self) -> GalleryMode {
        self.gallery_mode
    }

    pub fn is_gallery_overlay_open(&self) -> bool {
        self.gallery_overlay_open
    }

    pub fn working_directory(&self) -> Option<&WorkingDirectory> {
        self.working_directory.as_ref()
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn templates(&self) -> &[TemplateInfo] {
        &self.templates
    }

    /// Name of the template bound for auto-save, if any.
    pub fn current_template(&self) -> Option<&str> {
        self.current_template.as_deref()
    }

    pub fn revision(&self) -> DocRevision {
        self.revision
    }

    // ─── Revision bookkeeping ────────────────────────────────────────────

    fn frame_changed(&mut self) {
        self.revision.frame += 1;
    }

    fn objects_changed(&mut self) {
        self.revision.objects += 1;
    }

    pub(crate) fn table_changed(&mut self) {
        self.revision.table += 1;
    }

    // ─── Phase and working directory ─────────────────────────────────────

    pub fn set_phase(&mut self, phase: AppPhase) {
        self.phase = phase;
    }

    pub fn set_active_tab(&mut self, tab: EditorTab) {
        self.active_tab = tab;
    }

    pub fn open_gallery_for_replacement(&mut self) {
        self.gallery_mode = GalleryMode::Replace;
        self.gallery_overlay_open = true;
    }

    pub fn close_gallery_overlay(&mut self) {
        self.gallery_overlay_open = false;
    }

    pub fn set_working_directory(&mut self, path: impl Into<String>, name: impl Into<String>) {
        self.working_directory = Some(WorkingDirectory {
            path: path.into(),
            name: name.into(),
        });
    }

    /// Forget the working directory along with its images and selection.
    pub fn clear_working_directory(&mut self) {
        self.working_directory = None;
        self.images.clear();
    }

    // ─── Image set ───────────────────────────────────────────────────────

    /// Replace the image listing; every image starts out selected.
    pub fn set_all_images(&mut self, images: Vec<ImageFile>) {
        self.images.set_all(images);
    }

    pub fn toggle_image_selection(&mut self, path: &str) {
        self.images.toggle(path);
    }

    pub fn select_all_images(&mut self) {
        self.images.select_all();
    }

    pub fn deselect_all_images(&mut self) {
        self.images.deselect_all();
    }

    /// Enter the editor with the first selected image (listing order) as
    /// the hero. With nothing selected the phase still advances, heroless.
    pub fn proceed_to_editor(&mut self) {
        if let Some(first) = self.images.first_selected().cloned() {
            self.doc.objects.retain(|o| !o.is_hero());
            let hero = CanvasObject::new(
                ObjectId::fresh(),
                ObjectKind::Hero {
                    src: first.thumbnail_url,
                    original_path: first.path,
                },
                HERO_NAME,
                self.full_frame(),
            );
            self.doc.objects.insert(0, hero);
            self.objects_changed();
        }
        self.phase = AppPhase::Editor;
    }

    /// Point the existing hero at a different source image.
    pub fn replace_hero_image(&mut self, src: impl Into<String>, original_path: impl Into<String>) {
        let patch = ObjectPatch {
            src: Some(src.into()),
            original_path: Some(original_path.into()),
            ..ObjectPatch::default()
        };
        let Some(hero) = self.doc.objects.iter_mut().find(|o| o.is_hero()) else {
            return;
        };
        if hero.apply_patch(patch) {
            self.objects_changed();
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Shallow-merge into the frame. Dimensions are not validated and the
    /// aspect-ratio tag is left as is.
    pub fn set_frame(&mut self, patch: FramePatch) {
        if self.doc.frame.apply_patch(patch) {
            self.frame_changed();
        }
    }

    /// Select a named preset together with its dimensions.
    pub fn apply_aspect_ratio(&mut self, ratio: AspectRatio) {
        let (width, height) = match ratio.preset_size() {
            Some((w, h)) => (Some(w), Some(h)),
            None => (None, None),
        };
        self.set_frame(FramePatch {
            aspect_ratio: Some(ratio),
            width,
            height,
            background_color: None,
        });
    }

    fn full_frame(&self) -> (f64, f64, f64, f64) {
        (
            0.0,
            0.0,
            f64::from(self.doc.frame.width),
            f64::from(self.doc.frame.height),
        )
    }

    // ─── Objects ─────────────────────────────────────────────────────────

    /// Append a text layer and select it.
    ///
    /// The key and name are numbered by the count of existing text layers
    /// (`TEXT-<n>`, `Text <n>`); `partial` may override either, and any
    /// other field. An empty key in `partial` counts as absent.
    pub fn add_text(&mut self, partial: Option<ObjectPatch>) -> ObjectId {
        let id = ObjectId::fresh();
        let key_number = self.doc.count(ObjectType::Text) + 1;
        let mut text = CanvasObject::new(
            id,
            ObjectKind::Text(TextBlock {
                key: format!("TEXT-{key_number}"),
                ..TextBlock::default()
            }),
            format!("Text {key_number}"),
            (100.0, 100.0, 200.0, 50.0),
        );
        if let Some(mut partial) = partial {
            if partial.key.as_deref() == Some("") {
                partial.key = None;
            }
            text.apply_patch(partial);
        }
        self.doc.objects.push(text);
        self.objects_changed();
        self.selection = Selection::single(id);
        id
    }

    /// Append an auxiliary image layer at (100, 100), 200×200, and select it.
    pub fn add_image(&mut self, src: impl Into<String>, name: Option<&str>) -> ObjectId {
        let id = ObjectId::fresh();
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Image {}", self.doc.count(ObjectType::Image) + 1),
        };
        self.doc.objects.push(CanvasObject::new(
            id,
            ObjectKind::Image { src: src.into() },
            name,
            (100.0, 100.0, 200.0, 200.0),
        ));
        self.objects_changed();
        self.selection = Selection::single(id);
        id
    }

    /// Replace any background with a locked, full-frame one at the bottom.
    pub fn set_background(&mut self, src: impl Into<String>, original_path: Option<String>) -> ObjectId {
        self.doc
            .objects
            .retain(|o| o.object_type() != ObjectType::Background);
        let id = ObjectId::fresh();
        let mut bg = CanvasObject::new(
            id,
            ObjectKind::Background {
                src: src.into(),
                scale_mode: ScaleMode::Fill,
                original_path,
            },
            BACKGROUND_NAME,
            self.full_frame(),
        );
        bg.locked = true;
        self.doc.objects.insert(0, bg);
        self.objects_changed();
        id
    }

    pub fn update_object(&mut self, id: ObjectId, patch: ObjectPatch) {
        let Some(obj) = self.doc.get_mut(id) else {
            return;
        };
        if obj.apply_patch(patch) {
            self.objects_changed();
        }
    }

    /// Remove an object. The hero is undeletable.
    pub fn delete_object(&mut self, id: ObjectId) {
        let Some(index) = self.doc.index_of(id) else {
            return;
        };
        if self.doc.objects[index].is_hero() {
            log::debug!("refusing to delete hero {id}");
            return;
        }
        self.doc.objects.remove(index);
        self.objects_changed();
        self.selection.remove(id);
    }

    /// Delete every selected object (the hero survives).
    pub fn delete_selected(&mut self) {
        let ids: Vec<ObjectId> = self.selection.ids().to_vec();
        for id in ids {
            self.delete_object(id);
        }
    }

    /// Clone an object, offset by the duplicate offset, named `"<name> copy"`,
    /// and select the clone.
    ///
    /// A text clone gets key `TEXT-<n+1>` where `n` counts the text layers
    /// before insertion; that key may already be taken.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        let source = self.doc.get(id)?;
        let new_id = ObjectId::fresh();
        let offset = self.config.duplicate_offset;
        let mut duplicate = CanvasObject {
            id: new_id,
            x: source.x + offset,
            y: source.y + offset,
            name: format!("{} copy", source.name),
            ..source.clone()
        };
        let text_count = self.doc.count(ObjectType::Text);
        if let Some(text) = duplicate.as_text_mut() {
            text.key = format!("TEXT-{}", text_count + 1);
        }
        self.doc.objects.push(duplicate);
        self.objects_changed();
        self.selection = Selection::single(new_id);
        Some(new_id)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select_object(&mut self, id: Option<ObjectId>) {
        self.selection = match id {
            Some(id) => Selection::single(id),
            None => Selection::default(),
        };
    }

    pub fn select_multiple(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.selection = Selection::from_ids(ids);
    }

    pub fn toggle_object_selection(&mut self, id: ObjectId) {
        self.selection.toggle(id);
    }

    pub fn select_frame(&mut self) {
        self.selection = Selection::Frame;
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    // ─── Layer order ─────────────────────────────────────────────────────

    /// Remove the layer at `from` and reinsert it at `to` (clamped to the
    /// end). An out-of-range `from` is a no-op.
    pub fn reorder_objects(&mut self, from: usize, to: usize) {
        if from >= self.doc.objects.len() {
            return;
        }
        let obj = self.doc.objects.remove(from);
        let to = to.min(self.doc.objects.len());
        self.doc.objects.insert(to, obj);
        if from != to {
            self.objects_changed();
        }
    }

    pub fn move_to_front(&mut self, id: ObjectId) {
        match self.doc.index_of(id) {
            Some(index) if index + 1 < self.doc.objects.len() => {
                let obj = self.doc.objects.remove(index);
                self.doc.objects.push(obj);
                self.objects_changed();
            }
            _ => {}
        }
    }

    pub fn move_to_back(&mut self, id: ObjectId) {
        match self.doc.index_of(id) {
            Some(index) if index > 0 => {
                let obj = self.doc.objects.remove(index);
                self.doc.objects.insert(0, obj);
                self.objects_changed();
            }
            _ => {}
        }
    }

    // ─── Alignment ───────────────────────────────────────────────────────

    /// Align every selected, unlocked object to the frame horizontally.
    pub fn align_horizontal(&mut self, alignment: HorizontalAlignment) {
        let frame_width = f64::from(self.doc.frame.width);
        self.align_selected(|obj| {
            let x = match alignment {
                HorizontalAlignment::Left => 0.0,
                HorizontalAlignment::Center => (frame_width - obj.width) / 2.0,
                HorizontalAlignment::Right => frame_width - obj.width,
            };
            ObjectPatch {
                x: Some(round_px(x)),
                ..ObjectPatch::default()
            }
        });
    }

    /// Align every selected, unlocked object to the frame vertically.
    pub fn align_vertical(&mut self, alignment: VerticalAlignment) {
        let frame_height = f64::from(self.doc.frame.height);
        self.align_selected(|obj| {
            let y = match alignment {
                VerticalAlignment::Top => 0.0,
                VerticalAlignment::Middle => (frame_height - obj.height) / 2.0,
                VerticalAlignment::Bottom => frame_height - obj.height,
            };
            ObjectPatch {
                y: Some(round_px(y)),
                ..ObjectPatch::default()
            }
        });
    }

    fn align_selected(&mut self, target: impl Fn(&CanvasObject) -> ObjectPatch) {
        let mut changed = false;
        for id in self.selection.ids() {
            let Some(obj) = self.doc.objects.iter_mut().find(|o| o.id == *id) else {
                continue;
            };
            if obj.locked {
                continue;
            }
            let patch = target(obj);
            changed |= obj.apply_patch(patch);
        }
        if changed {
            self.objects_changed();
        }
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn fit_to_view(&mut self, container_width: f64, container_height: f64) {
        self.viewport
            .fit_to_view(&self.doc.frame, container_width, container_height);
    }

    // ─── Whole-document operations ───────────────────────────────────────

    /// Back to the default frame, no layers, no selection, zoom 1.
    pub fn reset_editor(&mut self) {
        if self.doc.frame != Frame::default() {
            self.doc.frame = Frame::default();
            self.frame_changed();
        }
        if !self.doc.objects.is_empty() {
            self.doc.objects.clear();
            self.objects_changed();
        }
        self.selection = Selection::default();
        self.viewport.reset();
    }

    /// Replace the document wholesale with a loaded template and bind its
    /// name for auto-save.
    pub fn load_payload(&mut self, payload: TemplatePayload) {
        self.current_template = Some(payload.name.clone());
        self.doc = payload.into_document();
        self.selection = Selection::default();
        self.frame_changed();
        self.objects_changed();
        self.table_changed();
    }

    pub fn set_templates(&mut self, templates: Vec<TemplateInfo>) {
        self.templates = templates;
    }

    pub fn bind_template(&mut self, name: impl Into<String>) {
        self.current_template = Some(name.into());
    }

    /// Detach from the current template; future edits are not auto-saved.
    pub fn clear_current_template(&mut self) {
        self.current_template = None;
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(path: &str) -> ImageFile {
        ImageFile {
            path: path.into(),
            name: path.into(),
            thumbnail_url: format!("asset://{path}"),
        }
    }

    fn editor_with_hero() -> (EditorStore, ObjectId) {
        let mut store = EditorStore::default();
        store.set_all_images(vec![image("/p1"), image("/p2")]);
        store.proceed_to_editor();
        let hero = store.objects()[0].id;
        (store, hero)
    }

    fn keys(store: &EditorStore) -> Vec<String> {
        store
            .objects()
            .iter()
            .filter_map(|o| o.as_text().map(|t| t.key.clone()))
            .collect()
    }

    #[test]
    fn proceed_creates_full_frame_hero_at_bottom() {
        let (store, hero) = editor_with_hero();
        let obj = store.object(hero).unwrap();
        assert_eq!(store.phase(), AppPhase::Editor);
        assert_eq!((obj.x, obj.y, obj.width, obj.height), (0.0, 0.0, 1080.0, 1080.0));
        assert_eq!(
            obj.kind,
            ObjectKind::Hero {
                src: "asset:///p1".into(),
                original_path: "/p1".into(),
            }
        );
    }

    #[test]
    fn proceed_uses_listing_order_not_toggle_order() {
        let mut store = EditorStore::default();
        store.set_all_images(vec![image("/p1"), image("/p2"), image("/p3")]);
        store.deselect_all_images();
        store.toggle_image_selection("/p3");
        store.toggle_image_selection("/p2");
        store.proceed_to_editor();
        let hero = store.document().hero().unwrap();
        assert!(matches!(&hero.kind, ObjectKind::Hero { original_path, .. } if original_path == "/p2"));
    }

    #[test]
    fn proceed_replaces_existing_hero() {
        let (mut store, first) = editor_with_hero();
        store.add_text(None);
        store.proceed_to_editor();
        assert_eq!(store.document().count(ObjectType::Hero), 1);
        assert_ne!(store.objects()[0].id, first);
        assert!(store.objects()[0].is_hero());
    }

    #[test]
    fn proceed_without_selection_has_no_hero() {
        let mut store = EditorStore::default();
        store.proceed_to_editor();
        assert_eq!(store.phase(), AppPhase::Editor);
        assert!(store.document().hero().is_none());
    }

    #[test]
    fn add_text_numbers_by_existing_count() {
        let (mut store, _) = editor_with_hero();
        let a = store.add_text(None);
        let b = store.add_text(None);
        assert_eq!(keys(&store), vec!["TEXT-1", "TEXT-2"]);
        assert_eq!(store.object(b).unwrap().name, "Text 2");
        assert_eq!(store.selection().only(), Some(b));
        assert_ne!(a, b);
    }

    #[test]
    fn add_text_respects_overrides() {
        let mut store = EditorStore::default();
        store.add_text(Some(ObjectPatch {
            key: Some("PRICE".into()),
            content: Some("$9.99".into()),
            x: Some(40.0),
            ..ObjectPatch::default()
        }));
        store.add_text(Some(ObjectPatch {
            key: Some(String::new()),
            ..ObjectPatch::default()
        }));
        assert_eq!(keys(&store), vec!["PRICE", "TEXT-2"]);
        let first = &store.objects()[0];
        assert_eq!(first.x, 40.0);
        assert_eq!(first.as_text().unwrap().content, "$9.99");
    }

    #[test]
    fn add_image_defaults() {
        let mut store = EditorStore::default();
        let a = store.add_image("asset://icon.png", None);
        let b = store.add_image("asset://logo.png", Some("Logo"));
        let obj = store.object(a).unwrap();
        assert_eq!((obj.x, obj.y, obj.width, obj.height), (100.0, 100.0, 200.0, 200.0));
        assert_eq!(obj.name, "Image 1");
        assert_eq!(store.object(b).unwrap().name, "Logo");
        assert_eq!(store.selection().only(), Some(b));
    }

    #[test]
    fn set_background_replaces_and_sits_at_bottom() {
        let (mut store, _) = editor_with_hero();
        store.set_background("asset://bg1.png", None);
        let second = store.set_background("asset://bg2.png", Some("/bg2.png".into()));
        assert_eq!(store.document().count(ObjectType::Background), 1);
        let bg = &store.objects()[0];
        assert_eq!(bg.id, second);
        assert!(bg.locked);
        assert_eq!((bg.width, bg.height), (1080.0, 1080.0));
    }

    #[test]
    fn update_missing_object_is_noop() {
        let mut store = EditorStore::default();
        let before = store.revision();
        store.update_object(ObjectId::intern("nope"), ObjectPatch::position(1.0, 2.0));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn hero_cannot_be_deleted() {
        let (mut store, hero) = editor_with_hero();
        store.add_text(None);
        let before = store.objects().to_vec();
        store.delete_object(hero);
        assert_eq!(store.objects(), before.as_slice());
    }

    #[test]
    fn delete_drops_from_selection() {
        let (mut store, hero) = editor_with_hero();
        let text = store.add_text(None);
        store.select_multiple([hero, text]);
        store.delete_selected();
        assert_eq!(store.objects().len(), 1);
        assert_eq!(store.selection().ids(), &[hero]);
    }

    #[test]
    fn duplicate_offsets_and_renames() {
        let (mut store, _) = editor_with_hero();
        let id = store.add_image("asset://icon.png", None);
        let original = store.object(id).unwrap().clone();
        let copy_id = store.duplicate_object(id).unwrap();
        let copy = store.object(copy_id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!((copy.x, copy.y), (original.x + 20.0, original.y + 20.0));
        assert_eq!(copy.name, "Image 1 copy");
        assert_eq!(store.object(id).unwrap(), &original);
        assert_eq!(store.selection().only(), Some(copy_id));
    }

    #[test]
    fn duplicate_text_key_counts_layers_and_may_collide() {
        let mut store = EditorStore::default();
        let first = store.add_text(None);
        store.add_text(None);
        // Two text layers: the clone is keyed TEXT-3.
        store.duplicate_object(first);
        assert_eq!(keys(&store), vec!["TEXT-1", "TEXT-2", "TEXT-3"]);
        // After deleting TEXT-1, adding counts 2 layers and reissues TEXT-3.
        store.delete_object(first);
        store.add_text(None);
        assert_eq!(keys(&store), vec!["TEXT-2", "TEXT-3", "TEXT-3"]);
    }

    #[test]
    fn duplicate_missing_is_none() {
        let mut store = EditorStore::default();
        assert!(store.duplicate_object(ObjectId::intern("missing")).is_none());
    }

    #[test]
    fn reorder_and_z_order() {
        let mut store = EditorStore::default();
        let a = store.add_image("a", None);
        let b = store.add_image("b", None);
        let c = store.add_image("c", None);
        let order = |s: &EditorStore| s.objects().iter().map(|o| o.id).collect::<Vec<_>>();

        store.reorder_objects(0, 2);
        assert_eq!(order(&store), vec![b, c, a]);
        store.move_to_back(a);
        assert_eq!(order(&store), vec![a, b, c]);
        store.move_to_front(a);
        assert_eq!(order(&store), vec![b, c, a]);

        let before = store.revision();
        store.move_to_front(a);
        store.move_to_back(b);
        store.reorder_objects(9, 0);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn align_center_in_default_frame() {
        let mut store = EditorStore::default();
        let id = store.add_image("a", None);
        store.align_horizontal(HorizontalAlignment::Center);
        assert_eq!(store.object(id).unwrap().x, 440.0);
        store.align_vertical(VerticalAlignment::Bottom);
        assert_eq!(store.object(id).unwrap().y, 880.0);
    }

    #[test]
    fn align_rounds_and_skips_locked() {
        let mut store = EditorStore::default();
        let a = store.add_image("a", None);
        let b = store.add_image("b", None);
        store.update_object(
            a,
            ObjectPatch {
                width: Some(201.0),
                ..ObjectPatch::default()
            },
        );
        store.update_object(
            b,
            ObjectPatch {
                locked: Some(true),
                ..ObjectPatch::default()
            },
        );
        store.select_multiple([a, b]);
        store.align_horizontal(HorizontalAlignment::Center);
        assert_eq!(store.object(a).unwrap().x, 440.0);
        assert_eq!(store.object(b).unwrap().x, 100.0);
    }

    #[test]
    fn align_with_frame_selected_is_noop() {
        let mut store = EditorStore::default();
        let a = store.add_image("a", None);
        store.select_frame();
        store.align_horizontal(HorizontalAlignment::Right);
        assert_eq!(store.object(a).unwrap().x, 100.0);
    }

    #[test]
    fn replace_hero_updates_in_place() {
        let (mut store, hero) = editor_with_hero();
        store.replace_hero_image("asset:///p2", "/p2");
        let obj = store.object(hero).unwrap();
        assert_eq!(obj.kind.src(), Some("asset:///p2"));

        let mut empty = EditorStore::default();
        empty.replace_hero_image("x", "y");
        assert!(empty.objects().is_empty());
    }

    #[test]
    fn set_frame_leaves_preset_tag() {
        let mut store = EditorStore::default();
        store.set_frame(FramePatch {
            width: Some(1300),
            ..FramePatch::default()
        });
        assert_eq!(store.frame().aspect_ratio, AspectRatio::Square);
        store.apply_aspect_ratio(AspectRatio::Wide);
        assert_eq!((store.frame().width, store.frame().height), (1920, 1080));
    }

    #[test]
    fn reset_restores_defaults() {
        let (mut store, _) = editor_with_hero();
        store.set_zoom(2.0);
        store.apply_aspect_ratio(AspectRatio::Standard);
        store.reset_editor();
        assert_eq!(store.frame(), &Frame::default());
        assert!(store.objects().is_empty());
        assert!(store.selection().is_empty());
        assert_eq!(store.zoom(), 1.0);
    }

    #[test]
    fn selection_only_edits_leave_revision() {
        let (mut store, hero) = editor_with_hero();
        let before = store.revision();
        store.select_object(Some(hero));
        store.select_frame();
        store.clear_selection();
        store.zoom_in();
        assert_eq!(store.revision(), before);
    }
}
