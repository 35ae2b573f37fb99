//! Core document model for infographic templates.
//!
//! A document is a fixed-size `Frame` plus an ordered layer list of
//! `CanvasObject`s (index 0 = bottom-most), and the per-image `TableData`
//! consumed by batch generation. Objects are a closed tagged union:
//! every object carries the same base geometry, the `ObjectKind` carries
//! the variant-specific payload.

use crate::id::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            let v = hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?;
            Some(v as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (channel(self.r), channel(self.g), channel(self.b), channel(self.a));
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────

/// Aspect-ratio tag of the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "custom")]
    Custom,
}

impl AspectRatio {
    /// Named presets in display order.
    pub const PRESETS: [AspectRatio; 3] = [Self::Square, Self::Standard, Self::Wide];

    /// Fixed dimensions of a named preset; `None` for `Custom`.
    pub fn preset_size(self) -> Option<(u32, u32)> {
        match self {
            Self::Square => Some((1080, 1080)),
            Self::Standard => Some((1080, 810)),
            Self::Wide => Some((1920, 1080)),
            Self::Custom => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Standard => "4:3",
            Self::Wide => "16:9",
            Self::Custom => "custom",
        }
    }
}

/// The output canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub aspect_ratio: AspectRatio,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Square,
            width: 1080,
            height: 1080,
            background_color: Color::WHITE,
        }
    }
}

/// Partial frame update, shallow-merged by `Frame::apply_patch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl Frame {
    /// Merge every present field of `patch`. Returns `true` if any value changed.
    pub fn apply_patch(&mut self, patch: FramePatch) -> bool {
        let mut changed = false;
        merge(&mut self.aspect_ratio, patch.aspect_ratio, &mut changed);
        merge(&mut self.width, patch.width, &mut changed);
        merge(&mut self.height, patch.height, &mut changed);
        merge(&mut self.background_color, patch.background_color, &mut changed);
        changed
    }
}

// ─── Canvas objects ──────────────────────────────────────────────────────

/// How an image's natural size maps onto its target rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Cover the target, cropping the overflowing axis.
    #[default]
    Fill,
    /// Fit inside the target, preserving aspect ratio.
    Fit,
    /// Match the target exactly, ignoring aspect ratio.
    Stretch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Text payload: the table-column key, default content, and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextBlock {
    /// Stable table-column key (e.g. `TEXT-1`). Uniqueness is not enforced.
    pub key: String,
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub fill: Color,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub line_height: f64,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self {
            key: String::new(),
            content: "New Text".into(),
            font_family: "Inter, system-ui, sans-serif".into(),
            font_size: 32.0,
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            fill: Color::BLACK,
            align: TextAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_height: 1.2,
        }
    }
}

/// Variant-specific payload, discriminated by the `type` field on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ObjectKind {
    /// The mandatory primary image. Cannot be deleted, only replaced.
    Hero {
        src: String,
        /// Source-file identity used for replacement and regeneration.
        original_path: String,
    },
    Background {
        src: String,
        #[serde(default)]
        scale_mode: ScaleMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_path: Option<String>,
    },
    Text(TextBlock),
    /// Auxiliary image layer.
    Image { src: String },
}

/// Field-less discriminant of `ObjectKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Hero,
    Background,
    Text,
    Image,
}

impl ObjectKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Hero { .. } => ObjectType::Hero,
            Self::Background { .. } => ObjectType::Background,
            Self::Text(_) => ObjectType::Text,
            Self::Image { .. } => ObjectType::Image,
        }
    }

    /// Image source for every variant except text.
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Hero { src, .. } | Self::Background { src, .. } | Self::Image { src } => {
                Some(src.as_str())
            }
            Self::Text(_) => None,
        }
    }
}

/// A layer on the frame. Geometry is top-left anchored in frame space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise, around the object's center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Suppresses dragging and alignment.
    #[serde(default)]
    pub locked: bool,
    /// Suppresses rendering and excludes text layers from table columns.
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl CanvasObject {
    /// Build an unrotated, opaque, unlocked, visible object.
    pub fn new(
        id: ObjectId,
        kind: ObjectKind,
        name: impl Into<String>,
        (x, y, width, height): (f64, f64, f64, f64),
    ) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            locked: false,
            visible: true,
            name: name.into(),
            kind,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.kind, ObjectKind::Hero { .. })
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match &self.kind {
            ObjectKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextBlock> {
        match &mut self.kind {
            ObjectKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Shallow-merge `patch` into this object. Fields that don't belong to
    /// this object's variant are ignored. Returns `true` if any value changed.
    pub fn apply_patch(&mut self, patch: ObjectPatch) -> bool {
        let mut changed = false;
        merge(&mut self.x, patch.x, &mut changed);
        merge(&mut self.y, patch.y, &mut changed);
        merge(&mut self.width, patch.width, &mut changed);
        merge(&mut self.height, patch.height, &mut changed);
        merge(&mut self.rotation, patch.rotation, &mut changed);
        merge(&mut self.opacity, patch.opacity, &mut changed);
        merge(&mut self.locked, patch.locked, &mut changed);
        merge(&mut self.visible, patch.visible, &mut changed);
        merge(&mut self.name, patch.name, &mut changed);

        match &mut self.kind {
            ObjectKind::Hero { src, original_path } => {
                merge(src, patch.src, &mut changed);
                merge(original_path, patch.original_path, &mut changed);
            }
            ObjectKind::Background {
                src,
                scale_mode,
                original_path,
            } => {
                merge(src, patch.src, &mut changed);
                merge(scale_mode, patch.scale_mode, &mut changed);
                if let Some(path) = patch.original_path
                    && original_path.as_deref() != Some(path.as_str())
                {
                    *original_path = Some(path);
                    changed = true;
                }
            }
            ObjectKind::Image { src } => {
                merge(src, patch.src, &mut changed);
            }
            ObjectKind::Text(text) => {
                merge(&mut text.key, patch.key, &mut changed);
                merge(&mut text.content, patch.content, &mut changed);
                merge(&mut text.font_family, patch.font_family, &mut changed);
                merge(&mut text.font_size, patch.font_size, &mut changed);
                merge(&mut text.font_weight, patch.font_weight, &mut changed);
                merge(&mut text.font_style, patch.font_style, &mut changed);
                merge(&mut text.fill, patch.fill, &mut changed);
                merge(&mut text.align, patch.align, &mut changed);
                merge(&mut text.vertical_align, patch.vertical_align, &mut changed);
                merge(&mut text.line_height, patch.line_height, &mut changed);
            }
        }
        changed
    }
}

/// Partial object update. Every field is optional; base fields apply to all
/// variants, the rest only to the variants that carry them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub name: Option<String>,
    // image variants
    pub src: Option<String>,
    pub original_path: Option<String>,
    pub scale_mode: Option<ScaleMode>,
    // text
    pub key: Option<String>,
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub fill: Option<Color>,
    pub align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub line_height: Option<f64>,
}

impl ObjectPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn merge<T: PartialEq>(slot: &mut T, value: Option<T>, changed: &mut bool) {
    if let Some(value) = value
        && *slot != value
    {
        *slot = value;
        *changed = true;
    }
}

// ─── Table data ──────────────────────────────────────────────────────────

/// Per-image overrides: text-layer key → value.
pub type TableRow = BTreeMap<String, String>;

/// Image path → row of text overrides.
pub type TableData = BTreeMap<String, TableRow>;

// ─── Document ────────────────────────────────────────────────────────────

/// The persisted part of an editing session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub frame: Frame,
    /// Layer order: index 0 is bottom-most.
    pub objects: Vec<CanvasObject>,
    pub table_data: TableData,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn hero(&self) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.is_hero())
    }

    pub fn count(&self, ty: ObjectType) -> usize {
        self.objects.iter().filter(|o| o.object_type() == ty).count()
    }

    /// Visible text layers in layer order. These define the table columns.
    pub fn visible_text_layers(&self) -> impl Iterator<Item = (&CanvasObject, &TextBlock)> {
        self.objects
            .iter()
            .filter(|o| o.visible)
            .filter_map(|o| o.as_text().map(|t| (o, t)))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
