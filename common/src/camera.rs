//! 2D camera over a fixed virtual canvas

use glam::{Mat4, Vec2};
use winit::dpi::{PhysicalPosition, PhysicalSize};

/// Orthographic camera with pixel-like world coordinates.
///
/// World space runs from (0, 0) at the top-left of the canvas to `viewport`
/// at the bottom-right, y increasing downward — the space the physics modules
/// integrate in. `zoom` magnifies around `center` for the simulations that
/// support zooming and panning; the rest leave both at their defaults.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub viewport: Vec2,
    pub center: Vec2,
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            center: Vec2::new(width / 2.0, height / 2.0),
            zoom: 1.0,
        }
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half = self.viewport / (2.0 * self.zoom);

        // Larger world y is the bottom of the screen
        Mat4::orthographic_rh(
            self.center.x - half.x,
            self.center.x + half.x,
            self.center.y + half.y,
            self.center.y - half.y,
            -1.0,
            1.0,
        )
    }

    /// Map a physical cursor position to world coordinates
    pub fn screen_to_world(&self, pos: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Vec2 {
        let normalized = Vec2::new(
            pos.x as f32 / size.width as f32 - 0.5,
            pos.y as f32 / size.height as f32 - 0.5,
        );
        self.center + normalized * self.viewport / self.zoom
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_corners_map_to_canvas_corners() {
        let camera = Camera2D::new(800.0, 600.0);
        let size = PhysicalSize::new(1600, 1200);

        let top_left = camera.screen_to_world(PhysicalPosition::new(0.0, 0.0), size);
        assert!(top_left.distance(Vec2::ZERO) < 1e-3);

        let bottom_right = camera.screen_to_world(PhysicalPosition::new(1600.0, 1200.0), size);
        assert!(bottom_right.distance(Vec2::new(800.0, 600.0)) < 1e-3);
    }

    #[test]
    fn zoom_shrinks_the_visible_region_around_center() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom = 2.0;
        let size = PhysicalSize::new(800, 600);

        let top_left = camera.screen_to_world(PhysicalPosition::new(0.0, 0.0), size);
        assert!(top_left.distance(Vec2::new(200.0, 150.0)) < 1e-3);

        let center = camera.screen_to_world(PhysicalPosition::new(400.0, 300.0), size);
        assert!(center.distance(camera.center) < 1e-3);
    }
}
