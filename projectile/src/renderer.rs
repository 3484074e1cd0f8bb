//! Scene assembly for the projectile simulation

use common::DrawList;
use glam::Vec2;

use crate::physics::{Phase, Projectile, BALL_RADIUS};

const GROUND_HEIGHT: f32 = 4.0;
const GROUND_COLOR: [f32; 4] = [0.2, 0.78, 0.2, 1.0];
const CANNON_SIZE: Vec2 = Vec2::new(50.0, 20.0);
const CANNON_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const BALL_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const PREVIEW_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const PREVIEW_DOT_RADIUS: f32 = 2.0;

/// Build the frame's draw list: ground, rotated cannon, aim preview dots,
/// and the ball. `cannon_angle` is the last aim direction so the barrel
/// keeps pointing where the shot went.
pub fn build_scene(
    list: &mut DrawList,
    sim: &Projectile,
    pointer: Vec2,
    cannon_angle: f32,
    window: Vec2,
) {
    list.clear();

    list.solid_rect(
        Vec2::new(0.0, window.y - GROUND_HEIGHT),
        Vec2::new(window.x, GROUND_HEIGHT),
        GROUND_COLOR,
    );

    list.solid_rect_rotated(
        sim.cannon,
        CANNON_SIZE,
        Vec2::new(0.0, CANNON_SIZE.y / 2.0),
        cannon_angle,
        CANNON_COLOR,
    );

    if sim.phase == Phase::Aiming {
        for point in sim.preview(pointer) {
            list.circle(point, PREVIEW_DOT_RADIUS, PREVIEW_COLOR);
        }
    }

    list.circle(sim.position, BALL_RADIUS, BALL_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aiming_scene_shows_preview_dots() {
        let mut sim = Projectile::new(Vec2::new(50.0, 586.0), 600.0);
        sim.begin_aim();

        let pointer = sim.cannon + Vec2::new(120.0, -120.0);
        let mut list = DrawList::default();
        build_scene(&mut list, &sim, pointer, 0.0, Vec2::new(800.0, 600.0));

        // Ground and cannon quads
        assert_eq!(list.triangles.len(), 12);
        // Preview dots plus the ball
        assert!(list.circles.len() > 1);
    }
}
