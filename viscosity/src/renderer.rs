//! Scene assembly for the viscosity race

use common::DrawList;
use glam::Vec2;

use crate::physics::{Column, Race, BALL_RADIUS};

const OUTLINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BALL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Wave surface sample count per column
const WAVE_POINTS: usize = 50;
const WAVE_AMPLITUDE: f32 = 6.0;
const WAVE_FREQUENCY: f32 = 0.05;

/// Build the frame's draw list: column outlines, animated fluid bands, and
/// the settling balls.
pub fn build_scene(list: &mut DrawList, race: &Race) {
    list.clear();

    for column in &race.columns {
        push_wave(list, column);
        list.rect_outline(column.position, column.size, OUTLINE_COLOR);
        list.circle(column.ball, BALL_RADIUS, BALL_COLOR);
    }
}

/// The translucent fluid band filling the lower half of the column, with a
/// sine-rippled surface.
fn push_wave(list: &mut DrawList, column: &Column) {
    let color = column.fluid.color;
    let dx = column.size.x / (WAVE_POINTS - 1) as f32;

    let surface = |i: usize| {
        let x = i as f32 * dx;
        let ripple = WAVE_AMPLITUDE * (WAVE_FREQUENCY * x + column.wave_phase).sin();
        column.position + Vec2::new(x, ripple + column.size.y / 2.0)
    };
    let bottom = |i: usize| {
        let x = i as f32 * dx;
        column.position + Vec2::new(x, column.size.y)
    };

    for i in 0..WAVE_POINTS - 1 {
        let (top_a, bot_a) = (surface(i), bottom(i));
        let (top_b, bot_b) = (surface(i + 1), bottom(i + 1));
        list.triangle(top_a, bot_a, top_b, color);
        list.triangle(top_b, bot_a, bot_b, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_covers_every_column() {
        let race = Race::new(1280.0, Vec2::new(150.0, 400.0), 100.0, 50.0);

        let mut list = DrawList::default();
        build_scene(&mut list, &race);

        assert_eq!(list.circles.len(), 5);
        // 4 outline segments per column
        assert_eq!(list.lines.len(), 5 * 8);
        // 49 quads of 6 vertices per fluid band
        assert_eq!(list.triangles.len(), 5 * 49 * 6);
    }

    #[test]
    fn wave_band_stays_inside_the_column() {
        let race = Race::new(1280.0, Vec2::new(150.0, 400.0), 100.0, 50.0);

        let mut list = DrawList::default();
        build_scene(&mut list, &race);

        for vertex in &list.triangles {
            assert!(vertex.position[1] >= 50.0 + 200.0 - WAVE_AMPLITUDE - 1e-3);
            assert!(vertex.position[1] <= 50.0 + 400.0 + 1e-3);
        }
    }
}
