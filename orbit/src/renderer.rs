//! Scene assembly for the orbit visualization

use common::DrawList;

use crate::physics::{SolarSystem, SUN_RADIUS};

const SUN_COLOR: [f32; 4] = [1.0, 1.0, 0.39, 1.0];

/// Build the frame's draw list: star field, sun, orbit trails, planets.
/// Trails fade from transparent (oldest) to the planet's color (newest).
pub fn build_scene(list: &mut DrawList, system: &SolarSystem) {
    list.clear();

    for star in &system.stars {
        let alpha = star.brightness(system.elapsed);
        list.circle(star.position, star.size, [1.0, 1.0, 1.0, alpha]);
    }

    list.circle(system.center, SUN_RADIUS, SUN_COLOR);

    for planet in &system.planets {
        if planet.trail.len() > 1 {
            let len = planet.trail.len() as f32;
            for (i, pair) in planet.trail.windows(2).enumerate() {
                let mut tail = planet.color;
                tail[3] = i as f32 / len;
                let mut head = planet.color;
                head[3] = (i + 1) as f32 / len;
                list.line_gradient(pair[0], tail, pair[1], head);
            }
        }

        list.circle(planet.position(system.center), planet.radius, planet.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn scene_holds_stars_sun_and_planets() {
        let mut system = SolarSystem::new(Vec2::new(640.0, 450.0), 1280.0, 900.0);
        for _ in 0..3 {
            system.update(0.016);
        }

        let mut list = DrawList::default();
        build_scene(&mut list, &system);

        // 400 stars + sun + 8 planets
        assert_eq!(list.circles.len(), 409);
        assert!(!list.lines.is_empty());
    }
}
