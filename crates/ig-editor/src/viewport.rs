//! Viewport controller: zoom clamping and fit-to-container.

use crate::config::EditorConfig;
use ig_core::Frame;

/// Zoom state of the canvas. 1.0 renders the frame at its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    min: f64,
    max: f64,
    step: f64,
    padding: f64,
}

impl Viewport {
    /// Unusable zoom bounds (non-finite, non-positive or inverted) fall
    /// back to the defaults so clamping stays total.
    pub fn new(config: &EditorConfig) -> Self {
        let (min, max) = if config.zoom_bounds_valid() {
            (config.zoom_min, config.zoom_max)
        } else {
            log::warn!(
                "ignoring zoom bounds {}..{}; using defaults",
                config.zoom_min,
                config.zoom_max
            );
            let defaults = EditorConfig::default();
            (defaults.zoom_min, defaults.zoom_max)
        };
        Self {
            zoom: 1.0,
            min,
            max,
            step: config.zoom_step,
            padding: config.fit_padding,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min, self.max);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.step);
    }

    /// Zoom so the frame fits the container minus padding, never above 100%.
    ///
    /// The fitted zoom may fall below the minimum zoom. Only a container
    /// no larger than the padding, which yields no positive scale, falls
    /// back to the minimum.
    pub fn fit_to_view(&mut self, frame: &Frame, container_width: f64, container_height: f64) {
        let available_width = container_width - self.padding;
        let available_height = container_height - self.padding;
        let scale_x = available_width / f64::from(frame.width);
        let scale_y = available_height / f64::from(frame.height);
        let fit = scale_x.min(scale_y).min(1.0);
        self.zoom = if fit > 0.0 { fit } else { self.min };
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }

    /// Size of the rendered frame on screen.
    pub fn screen_size(&self, frame: &Frame) -> (f64, f64) {
        (
            f64::from(frame.width) * self.zoom,
            f64::from(frame.height) * self.zoom,
        )
    }
}
