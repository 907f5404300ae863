//! # Camera
//!
//! World ↔ screen mapping.
//!
//! ```text
//! screen = (world - camera) * zoom
//! world  = screen / zoom + camera
//! ```
//!
//! The camera position is the world point at the top-left of the viewport.

use tessera_shared::{Collider, Vec2};

use crate::config::CameraConfig;

/// Viewport camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl Camera {
    /// Creates a camera at the world origin.
    #[must_use]
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: config.zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
        }
    }

    /// Top-left world point.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Moves the top-left world point.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Current zoom.
    #[inline]
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport size in screen pixels.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Resizes the viewport.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// World point → screen pixels.
    #[inline]
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new((world.x - self.x) * self.zoom, (world.y - self.y) * self.zoom)
    }

    /// Screen pixels → world point.
    #[inline]
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x / self.zoom + self.x, screen.y / self.zoom + self.y)
    }

    /// World length → screen length.
    #[inline]
    #[must_use]
    pub fn scale(&self, length: f32) -> f32 {
        length * self.zoom
    }

    /// Visible world rectangle.
    #[must_use]
    pub fn view_rect(&self) -> Collider {
        Collider::new(
            self.x,
            self.y,
            self.viewport_width / self.zoom,
            self.viewport_height / self.zoom,
        )
    }

    /// Re-centres on a body: horizontally on its midpoint, vertically on its
    /// top edge.
    pub fn follow(&mut self, target: &Collider) {
        self.x = target.x + target.width / 2.0 - self.viewport_width / self.zoom / 2.0;
        self.y = target.y - self.viewport_height / self.zoom / 2.0;
    }

    // =========================================================================
    // ZOOM
    // =========================================================================

    /// One step closer, clamped. Returns true if the zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + self.zoom_step)
    }

    /// One step farther, clamped. Returns true if the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - self.zoom_step)
    }

    /// Wheel handler: positive delta zooms out, negative zooms in.
    pub fn on_wheel(&mut self, delta: f32) -> bool {
        if delta > 0.0 {
            self.zoom_out()
        } else if delta < 0.0 {
            self.zoom_in()
        } else {
            false
        }
    }

    fn set_zoom(&mut self, zoom: f32) -> bool {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if clamped == self.zoom {
            return false;
        }
        self.zoom = clamped;
        true
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transforms() {
        let mut camera = Camera::default();
        camera.set_position(100.0, 50.0);
        assert_eq!(camera.world_to_screen(Vec2::new(110.0, 60.0)), Vec2::new(20.0, 20.0));
        assert_eq!(camera.screen_to_world(Vec2::new(20.0, 20.0)), Vec2::new(110.0, 60.0));
        assert_eq!(camera.scale(8.0), 16.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        assert_eq!(camera.zoom(), 2.0);
        assert!(!camera.zoom_out());
        assert_eq!(camera.zoom(), 2.0);

        for _ in 0..20 {
            camera.zoom_in();
        }
        assert_eq!(camera.zoom(), 5.0);
        assert!(!camera.zoom_in());
    }

    #[test]
    fn test_wheel_direction() {
        let mut camera = Camera::default();
        assert!(camera.on_wheel(-1.0));
        assert_eq!(camera.zoom(), 2.25);
        assert!(camera.on_wheel(3.0));
        assert_eq!(camera.zoom(), 2.0);
        assert!(!camera.on_wheel(0.0));
    }

    #[test]
    fn test_follow_centres_horizontally() {
        let mut camera = Camera::default();
        let player = Collider::new(1000.0, -10.0, 16.0, 32.0);
        camera.follow(&player);

        assert_eq!(camera.position(), Vec2::new(1000.0 + 8.0 - 320.0, -10.0 - 180.0));
        let view = camera.view_rect();
        assert_eq!(view.width, 640.0);
        assert_eq!(view.height, 360.0);
        assert_eq!(view.center().x, player.center().x);
    }
}
