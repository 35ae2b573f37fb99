//! Input abstraction layer.
//!
//! Normalizes canvas pointer, wheel and keyboard events into an
//! `InputEvent` consumed by the select tool and the shortcut map.
//! Pointer coordinates are in frame space (the presentation layer divides
//! out the zoom before building the event).

use ig_core::{ObjectId, Point, Size, Vec2};

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// ⌘ on macOS.
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CMD: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// The platform command modifier: ⌘ or Ctrl.
    pub fn cmd(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the canvas.
    PointerDown { position: Point, modifiers: Modifiers },

    /// A drag of `id` finished with its registration point at `center`.
    DragEnd { id: ObjectId, center: Point },

    /// An interactive transform of `id` finished. `scale` is relative to
    /// the object's stored size, `center` is the unchanged registration
    /// point.
    TransformEnd {
        id: ObjectId,
        scale: Vec2,
        center: Point,
        rotation: f64,
    },

    /// Wheel over the canvas; negative `delta_y` scrolls up.
    Wheel { delta_y: f64 },

    /// Key pressed. `in_text_field` is set while an input control has focus.
    Key {
        key: String,
        modifiers: Modifiers,
        in_text_field: bool,
    },

    /// The canvas container was resized.
    Resize { size: Size },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::PointerDown {
            position: Point::new(x, y),
            modifiers,
        }
    }

    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
            in_text_field: false,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { position, .. } => Some(*position),
            _ => None,
        }
    }
}
