use crate::motion::UniverseCoordinate;
use glam::{Mat4, Vec2};

/// Orthographic view of the universe map.
/// `half_height` is the zoom size: smaller means more zoomed in.
pub struct Camera {
    pub position: Vec2,
    pub half_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            half_height: 1.0,
            viewport_width,
            viewport_height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Follow the coordinate published by the motion controller
    pub fn sync(&mut self, coordinate: UniverseCoordinate) {
        self.position = Vec2::new(coordinate.x, coordinate.y);
        self.half_height = coordinate.zoom_size;
    }

    fn aspect(&self) -> f32 {
        if self.viewport_height <= 0.0 {
            1.0
        } else {
            self.viewport_width / self.viewport_height
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let (min, max) = self.visible_bounds();
        Mat4::orthographic_rh(min.x, max.x, min.y, max.y, -1.0, 1.0)
    }

    /// Bottom-left and top-right corners of the view in world space
    pub fn visible_bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.half_height * self.aspect(), self.half_height);
        (self.position - half, self.position + half)
    }
}
