//! Canvas interaction tool.
//!
//! The select tool translates `InputEvent`s into `EditorAction`s against a
//! read-only view of the store. It holds no selection of its own: the
//! store's selection is the single source of truth.
//!
//! | Event | Result |
//! |-------|--------|
//! | Pointer down on an object | select it (Shift toggles it in the selection) |
//! | Pointer down on empty frame | select the Frame |
//! | Drag end | commit the rounded top-left, unless the object is locked |
//! | Transform end | commit size (≥ minimum), top-left and rotation |
//! | Wheel | zoom by the wheel factor |
//! | Key | resolved through `ShortcutMap` |

use crate::actions::EditorAction;
use crate::input::InputEvent;
use crate::shortcuts::ShortcutMap;
use crate::store::EditorStore;
use ig_core::geometry::{Bounds, constrain_bound_box, from_drag_result, from_resize_result};
use ig_core::{CanvasObject, ObjectId, ObjectPatch, Point, Size};

/// Topmost visible object under `point`, honoring rotation.
pub fn hit_test(objects: &[CanvasObject], point: Point) -> Option<ObjectId> {
    objects
        .iter()
        .rev()
        .filter(|obj| obj.visible)
        .find(|obj| Bounds::of(obj).contains_rotated(point, obj.rotation))
        .map(|obj| obj.id)
}

#[derive(Debug, Default)]
pub struct SelectTool;

impl SelectTool {
    pub fn new() -> Self {
        Self
    }

    /// Bounding-box guard for the interactive transformer.
    pub fn bound_box(&self, store: &EditorStore, old: Bounds, proposed: Bounds) -> Bounds {
        constrain_bound_box(old, proposed, store.config().min_object_size)
    }

    /// Handle an input event, returning zero or more actions.
    pub fn handle(&mut self, event: &InputEvent, store: &EditorStore) -> Vec<EditorAction> {
        match event {
            InputEvent::PointerDown {
                position,
                modifiers,
            } => match hit_test(store.objects(), *position) {
                Some(id) if modifiers.shift => vec![EditorAction::ToggleObjectSelection { id }],
                Some(id) => vec![EditorAction::SelectObject { id: Some(id) }],
                None => vec![EditorAction::SelectFrame],
            },

            InputEvent::DragEnd { id, center } => {
                let Some(obj) = store.object(*id) else {
                    return Vec::new();
                };
                if obj.locked {
                    return Vec::new();
                }
                let top_left = from_drag_result(*center, obj.width, obj.height);
                vec![EditorAction::UpdateObject {
                    id: *id,
                    patch: ObjectPatch::position(top_left.x, top_left.y),
                }]
            }

            InputEvent::TransformEnd {
                id,
                scale,
                center,
                rotation,
            } => {
                let Some(obj) = store.object(*id) else {
                    return Vec::new();
                };
                let r = from_resize_result(
                    Size::new(obj.width, obj.height),
                    *scale,
                    *center,
                    *rotation,
                    store.config().min_object_size,
                );
                vec![EditorAction::UpdateObject {
                    id: *id,
                    patch: ObjectPatch {
                        x: Some(r.x),
                        y: Some(r.y),
                        width: Some(r.width),
                        height: Some(r.height),
                        rotation: Some(r.rotation),
                        ..ObjectPatch::default()
                    },
                }]
            }

            InputEvent::Wheel { delta_y } => {
                let factor = store.config().wheel_zoom_factor;
                let zoom = if *delta_y > 0.0 {
                    store.zoom() / factor
                } else {
                    store.zoom() * factor
                };
                vec![EditorAction::SetZoom { zoom }]
            }

            InputEvent::Key {
                key,
                modifiers,
                in_text_field,
            } => ShortcutMap::resolve(key, *modifiers, *in_text_field)
                .map(|shortcut| ShortcutMap::actions(shortcut, store))
                .unwrap_or_default(),

            InputEvent::Resize { size } => vec![EditorAction::FitToView {
                width: size.width,
                height: size.height,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use ig_core::Vec2;

    fn store_with_two_images() -> (EditorStore, ObjectId, ObjectId) {
        let mut store = EditorStore::default();
        let below = store.add_image("below", None);
        let above = store.add_image("above", None);
        store.update_object(above, ObjectPatch::position(150.0, 150.0));
        (store, below, above)
    }

    #[test]
    fn hit_prefers_topmost_visible() {
        let (mut store, below, above) = store_with_two_images();
        let overlap = Point::new(200.0, 200.0);
        assert_eq!(hit_test(store.objects(), overlap), Some(above));
        store.update_object(
            above,
            ObjectPatch {
                visible: Some(false),
                ..ObjectPatch::default()
            },
        );
        assert_eq!(hit_test(store.objects(), overlap), Some(below));
        assert_eq!(hit_test(store.objects(), Point::new(900.0, 900.0)), None);
    }

    #[test]
    fn pointer_down_selects_toggles_or_picks_frame() {
        let (store, _, above) = store_with_two_images();
        let mut tool = SelectTool::new();
        assert_eq!(
            tool.handle(&InputEvent::pointer_down(300.0, 300.0, Modifiers::NONE), &store),
            vec![EditorAction::SelectObject { id: Some(above) }]
        );
        assert_eq!(
            tool.handle(&InputEvent::pointer_down(300.0, 300.0, Modifiers::SHIFT), &store),
            vec![EditorAction::ToggleObjectSelection { id: above }]
        );
        assert_eq!(
            tool.handle(&InputEvent::pointer_down(1000.0, 10.0, Modifiers::NONE), &store),
            vec![EditorAction::SelectFrame]
        );
    }

    #[test]
    fn drag_end_commits_rounded_top_left() {
        let (store, below, _) = store_with_two_images();
        let mut tool = SelectTool::new();
        let actions = tool.handle(
            &InputEvent::DragEnd {
                id: below,
                center: Point::new(250.4, 300.6),
            },
            &store,
        );
        assert_eq!(
            actions,
            vec![EditorAction::UpdateObject {
                id: below,
                patch: ObjectPatch::position(150.0, 201.0),
            }]
        );
    }

    #[test]
    fn drag_end_ignores_locked() {
        let mut store = EditorStore::default();
        let bg = store.set_background("bg", None);
        let mut tool = SelectTool::new();
        let actions = tool.handle(
            &InputEvent::DragEnd {
                id: bg,
                center: Point::new(10.0, 10.0),
            },
            &store,
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn transform_end_applies_minimum_size() {
        let (mut store, below, _) = store_with_two_images();
        let mut tool = SelectTool::new();
        let actions = tool.handle(
            &InputEvent::TransformEnd {
                id: below,
                scale: Vec2::new(0.001, 2.0),
                center: Point::new(200.0, 200.0),
                rotation: 44.6,
            },
            &store,
        );
        for action in actions {
            store.apply(action);
        }
        let obj = store.object(below).unwrap();
        assert_eq!((obj.width, obj.height), (5.0, 400.0));
        assert_eq!((obj.x, obj.y), (198.0, 0.0));
        assert_eq!(obj.rotation, 45.0);
    }

    #[test]
    fn wheel_multiplies_or_divides() {
        let store = EditorStore::default();
        let mut tool = SelectTool::new();
        let zoom_of = |actions: Vec<EditorAction>| match actions.as_slice() {
            [EditorAction::SetZoom { zoom }] => *zoom,
            other => panic!("unexpected {other:?}"),
        };
        let up = zoom_of(tool.handle(&InputEvent::Wheel { delta_y: -3.0 }, &store));
        let down = zoom_of(tool.handle(&InputEvent::Wheel { delta_y: 3.0 }, &store));
        assert!((up - 1.08).abs() < 1e-12);
        assert!((down - 1.0 / 1.08).abs() < 1e-12);
    }

    #[test]
    fn bound_box_keeps_old_when_too_small() {
        let store = EditorStore::default();
        let tool = SelectTool::new();
        let old = Bounds::new(0.0, 0.0, 40.0, 40.0);
        let small = Bounds::new(0.0, 0.0, 4.9, 40.0);
        assert_eq!(tool.bound_box(&store, old, small), old);
    }

    #[test]
    fn delete_key_in_text_field_is_ignored() {
        let (store, _, _) = store_with_two_images();
        let mut tool = SelectTool::new();
        let typing = InputEvent::Key {
            key: "Backspace".into(),
            modifiers: Modifiers::NONE,
            in_text_field: true,
        };
        assert!(tool.handle(&typing, &store).is_empty());
        assert_eq!(
            tool.handle(&InputEvent::key("Backspace", Modifiers::NONE), &store),
            vec![EditorAction::DeleteSelected]
        );
    }
}
