//! Geometry utilities.
//!
//! Stored object geometry is top-left anchored and unrotated at the
//! origin. The interactive surface rotates and scales every node around a
//! registration point at its center, so each drag or resize result has to
//! be mapped back. All stored coordinates produced here are rounded to
//! whole pixels to keep repeated edits from drifting.

use crate::model::{CanvasObject, ScaleMode};
use kurbo::{Affine, Point, Size, Vec2};

/// Smallest width or height an interactive resize may produce.
pub const MIN_OBJECT_SIZE: f64 = 5.0;

/// Round half up, the way the interactive surface reports whole pixels.
///
/// `f64::round` rounds half away from zero, which would shift negative
/// coordinates by a pixel relative to the positive side.
pub fn round_px(v: f64) -> f64 {
    (v + 0.5).floor()
}

// ─── Bounds ──────────────────────────────────────────────────────────────

/// Axis-aligned box in frame space, stored as origin + size so that
/// width and height survive round-trips exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn of(obj: &CanvasObject) -> Self {
        Self::new(obj.x, obj.y, obj.width, obj.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Hit test against this box rotated by `degrees` around its center.
    pub fn contains_rotated(&self, p: Point, degrees: f64) -> bool {
        if degrees == 0.0 {
            return self.contains(p);
        }
        let unrotate = Affine::rotate_about(-degrees.to_radians(), self.center());
        self.contains(unrotate * p)
    }
}

// ─── Interactive ↔ stored ────────────────────────────────────────────────

/// Center-anchored geometry for the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractiveGeometry {
    /// Node position: the registration point, in frame space.
    pub center: Point,
    /// Offset from the node's top-left corner to its registration point.
    pub offset: Vec2,
}

pub fn to_interactive_geometry(bounds: Bounds) -> InteractiveGeometry {
    let offset = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
    InteractiveGeometry {
        center: Point::new(bounds.x + offset.x, bounds.y + offset.y),
        offset,
    }
}

/// Map a dragged node's center back to a rounded stored top-left.
pub fn from_drag_result(center: Point, width: f64, height: f64) -> Point {
    Point::new(
        round_px(center.x - width / 2.0),
        round_px(center.y - height / 2.0),
    )
}

/// Stored geometry after an interactive resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeResult {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// Fold a transform (scale around an unchanged center, plus rotation)
/// back into stored geometry.
///
/// The new dimensions are floored at `min_size` before rounding, and the
/// top-left is derived from the offset of the *new* dimensions.
pub fn from_resize_result(
    base: Size,
    scale: Vec2,
    center: Point,
    rotation_degrees: f64,
    min_size: f64,
) -> ResizeResult {
    let width = round_px((base.width * scale.x).max(min_size));
    let height = round_px((base.height * scale.y).max(min_size));
    let offset = Vec2::new(width / 2.0, height / 2.0);
    ResizeResult {
        x: round_px(center.x - offset.x),
        y: round_px(center.y - offset.y),
        width,
        height,
        rotation: round_px(rotation_degrees),
    }
}

/// Bounding-box guard for the interactive transformer: a proposal below
/// `min_size` on either axis is rejected and the previous box is kept.
pub fn constrain_bound_box(old: Bounds, proposed: Bounds, min_size: f64) -> Bounds {
    if proposed.width < min_size || proposed.height < min_size {
        old
    } else {
        proposed
    }
}

// ─── Image placement ─────────────────────────────────────────────────────

/// Source crop and render size for drawing an image into a target box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Region of the source image to sample; `None` samples all of it.
    pub crop: Option<Bounds>,
    /// Size to render at, from the target's top-left.
    pub render: Size,
}

/// Compute how an image of `natural` size is drawn into `target`.
///
/// Ratio comparisons are strict `>`: a perfectly matching ratio takes the
/// height-fitting branch. Degenerate sizes (zero, negative or non-finite)
/// have no meaningful ratio and are stretched instead.
pub fn place_image(mode: ScaleMode, natural: Size, target: Size) -> ImagePlacement {
    let degenerate = |s: Size| !(s.width.is_finite() && s.height.is_finite())
        || s.width <= 0.0
        || s.height <= 0.0;
    if degenerate(natural) || degenerate(target) {
        return ImagePlacement {
            crop: None,
            render: Size::new(target.width.max(0.0), target.height.max(0.0)),
        };
    }

    let image_ratio = natural.width / natural.height;
    let target_ratio = target.width / target.height;

    match mode {
        ScaleMode::Fill => {
            let crop = if image_ratio > target_ratio {
                let crop_width = natural.height * target_ratio;
                Bounds::new(
                    (natural.width - crop_width) / 2.0,
                    0.0,
                    crop_width,
                    natural.height,
                )
            } else {
                let crop_height = natural.width / target_ratio;
                Bounds::new(
                    0.0,
                    (natural.height - crop_height) / 2.0,
                    natural.width,
                    crop_height,
                )
            };
            ImagePlacement {
                crop: Some(crop),
                render: target,
            }
        }
        ScaleMode::Fit => {
            let render = if image_ratio > target_ratio {
                Size::new(target.width, target.width / image_ratio)
            } else {
                Size::new(target.height * image_ratio, target.height)
            };
            ImagePlacement { crop: None, render }
        }
        ScaleMode::Stretch => ImagePlacement {
            crop: None,
            render: target,
        },
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_round_trip_is_identity() {
        for &(x, y, w, h) in &[
            (0.0, 0.0, 200.0, 50.0),
            (13.0, -7.0, 33.0, 17.0),
            (-250.0, 999.0, 5.0, 1080.0),
        ] {
            let g = to_interactive_geometry(Bounds::new(x, y, w, h));
            assert_eq!(from_drag_result(g.center, w, h), Point::new(x, y));
        }
    }

    #[test]
    fn drag_result_rounds_to_whole_pixels() {
        let p = from_drag_result(Point::new(150.4, 75.6), 100.0, 50.0);
        assert_eq!(p, Point::new(100.0, 51.0));
        // Half rounds up on both sides of zero.
        assert_eq!(round_px(-2.5), -2.0);
        assert_eq!(round_px(2.5), 3.0);
    }

    #[test]
    fn resize_keeps_center_and_recomputes_offset() {
        let r = from_resize_result(
            Size::new(200.0, 100.0),
            Vec2::new(1.5, 0.5),
            Point::new(200.0, 150.0),
            12.4,
            MIN_OBJECT_SIZE,
        );
        assert_eq!((r.width, r.height), (300.0, 50.0));
        assert_eq!((r.x, r.y), (50.0, 125.0));
        assert_eq!(r.rotation, 12.0);
    }

    #[test]
    fn resize_never_goes_below_minimum() {
        for scale in [0.0, -3.0, 0.001, 0.02] {
            let r = from_resize_result(
                Size::new(200.0, 100.0),
                Vec2::new(scale, scale),
                Point::new(0.0, 0.0),
                0.0,
                MIN_OBJECT_SIZE,
            );
            assert!(r.width >= 5.0 && r.height >= 5.0, "scale {scale}: {r:?}");
        }
    }

    #[test]
    fn bound_box_rejects_undersized_proposals() {
        let old = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let tiny = Bounds::new(0.0, 0.0, 4.0, 80.0);
        let ok = Bounds::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(constrain_bound_box(old, tiny, MIN_OBJECT_SIZE), old);
        assert_eq!(constrain_bound_box(old, ok, MIN_OBJECT_SIZE), ok);
    }

    #[test]
    fn fill_crops_wide_image_horizontally() {
        let p = place_image(
            ScaleMode::Fill,
            Size::new(2000.0, 1000.0),
            Size::new(500.0, 500.0),
        );
        assert_eq!(p.crop, Some(Bounds::new(500.0, 0.0, 1000.0, 1000.0)));
        assert_eq!(p.render, Size::new(500.0, 500.0));
    }

    #[test]
    fn fill_crops_tall_image_vertically() {
        let p = place_image(
            ScaleMode::Fill,
            Size::new(1000.0, 3000.0),
            Size::new(400.0, 200.0),
        );
        assert_eq!(p.crop, Some(Bounds::new(0.0, 1250.0, 1000.0, 500.0)));
    }

    #[test]
    fn matching_ratio_takes_height_branch() {
        let fit = place_image(ScaleMode::Fit, Size::new(100.0, 50.0), Size::new(400.0, 200.0));
        assert_eq!(fit.render, Size::new(400.0, 200.0));
        let fill = place_image(ScaleMode::Fill, Size::new(100.0, 50.0), Size::new(400.0, 200.0));
        assert_eq!(fill.crop, Some(Bounds::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn fit_letterboxes_inside_target() {
        let wide = place_image(ScaleMode::Fit, Size::new(1600.0, 800.0), Size::new(800.0, 800.0));
        assert_eq!(wide.render, Size::new(800.0, 400.0));
        let tall = place_image(ScaleMode::Fit, Size::new(900.0, 1800.0), Size::new(800.0, 800.0));
        assert_eq!(tall.render, Size::new(400.0, 800.0));
        assert!(tall.crop.is_none());
    }

    #[test]
    fn stretch_ignores_aspect() {
        let p = place_image(ScaleMode::Stretch, Size::new(10.0, 999.0), Size::new(300.0, 20.0));
        assert_eq!(p.render, Size::new(300.0, 20.0));
        assert!(p.crop.is_none());
    }

    #[test]
    fn fill_crop_stays_inside_source() {
        let naturals = [(1.0, 1.0), (4032.0, 3024.0), (17.0, 9000.0), (640.0, 480.0)];
        let targets = [(1080.0, 1080.0), (1920.0, 1080.0), (3.0, 700.0)];
        for &(nw, nh) in &naturals {
            for &(tw, th) in &targets {
                let p = place_image(ScaleMode::Fill, Size::new(nw, nh), Size::new(tw, th));
                let c = p.crop.unwrap();
                assert!(c.width <= nw + 1e-9 && c.height <= nh + 1e-9, "{c:?}");
                assert!(c.x >= 0.0 && c.y >= 0.0, "{c:?}");
            }
        }
    }

    #[test]
    fn degenerate_sizes_are_non_negative() {
        let p = place_image(ScaleMode::Fill, Size::new(0.0, 0.0), Size::new(100.0, -4.0));
        assert_eq!(p.render, Size::new(100.0, 0.0));
    }

    #[test]
    fn rotated_hit_test() {
        let b = Bounds::new(0.0, 0.0, 100.0, 10.0);
        // (50, 40) is outside the flat bar but inside it when turned upright.
        assert!(!b.contains_rotated(Point::new(50.0, 40.0), 0.0));
        assert!(b.contains_rotated(Point::new(50.0, 40.0), 90.0));
    }
}
