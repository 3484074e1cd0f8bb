//! Planetary revolution model
//!
//! Planets advance along fixed circular orbits around a central sun; there is
//! no mutual gravitation. Orbital periods use real planetary data, sped up by
//! [`TIME_SCALE`] so the revolutions are visible.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Simulated seconds per wall-clock second
pub const TIME_SCALE: f32 = 9_999_999.0;

/// One astronomical unit in world units
pub const AU: f32 = 150.0;

/// Sun display radius in world units
pub const SUN_RADIUS: f32 = 60.0;

const DAY_SECONDS: f32 = 86_400.0;

/// Maximum retained trail points per planet
const TRAIL_LENGTH: usize = 80;

/// Background star count
const STAR_COUNT: usize = 400;

fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ]
}

/// A planet on a fixed circular orbit
#[derive(Debug, Clone)]
pub struct Planet {
    pub name: &'static str,
    pub orbit_radius: f32,
    pub orbit_period_days: f32,
    pub radius: f32,
    pub color: [f32; 4],
    pub angle: f32,
    pub trail: Vec<Vec2>,
}

impl Planet {
    pub fn new(
        name: &'static str,
        orbit_radius: f32,
        orbit_period_days: f32,
        radius: f32,
        color: [f32; 4],
    ) -> Self {
        Self {
            name,
            orbit_radius,
            orbit_period_days,
            radius,
            color,
            angle: 0.0,
            trail: Vec::new(),
        }
    }

    /// Advance the orbit angle by `dt` wall-clock seconds
    pub fn update(&mut self, dt: f32) {
        let angular_speed = TAU / (self.orbit_period_days * DAY_SECONDS / TIME_SCALE);
        self.angle += angular_speed * dt;
        if self.angle > TAU {
            self.angle -= TAU;
        }
    }

    /// World position on the orbit around `center`
    pub fn position(&self, center: Vec2) -> Vec2 {
        center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.orbit_radius
    }

    /// Record a trail point, discarding the oldest past the cap
    pub fn push_trail(&mut self, position: Vec2) {
        self.trail.push(position);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }
}

/// A twinkling background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub position: Vec2,
    pub size: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
}

impl Star {
    /// Brightness in [0, 1] at time `t`
    pub fn brightness(&self, t: f32) -> f32 {
        (self.twinkle_speed * t + self.twinkle_phase).sin() * 0.5 + 0.5
    }
}

fn generate_stars(count: usize, width: f32, height: f32) -> Vec<Star> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Star {
            position: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            size: rng.gen_range(1..4) as f32,
            twinkle_speed: rng.gen_range(0.5..2.0),
            twinkle_phase: rng.gen_range(0.0..TAU),
        })
        .collect()
}

/// The solar system scene state
pub struct SolarSystem {
    pub planets: Vec<Planet>,
    pub stars: Vec<Star>,
    pub center: Vec2,
    pub elapsed: f32,
}

impl SolarSystem {
    /// Build the eight planets around `center`, with stars scattered over a
    /// `width` x `height` backdrop.
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        let planets = vec![
            Planet::new("Mercury", 0.39 * AU, 88.0, 8.0, rgb(169, 169, 169)),
            Planet::new("Venus", 0.72 * AU, 224.7, 14.0, rgb(218, 165, 32)),
            Planet::new("Earth", 1.0 * AU, 365.25, 16.0, rgb(70, 130, 180)),
            Planet::new("Mars", 1.52 * AU, 687.0, 12.0, rgb(178, 34, 34)),
            Planet::new("Jupiter", 5.2 * AU, 4331.0, 30.0, rgb(205, 133, 63)),
            Planet::new("Saturn", 9.58 * AU, 10747.0, 26.0, rgb(210, 180, 140)),
            Planet::new("Uranus", 19.22 * AU, 30589.0, 22.0, rgb(72, 209, 204)),
            Planet::new("Neptune", 30.05 * AU, 59800.0, 22.0, rgb(25, 25, 112)),
        ];

        Self {
            planets,
            stars: generate_stars(STAR_COUNT, width, height),
            center,
            elapsed: 0.0,
        }
    }

    /// Advance every orbit and trail by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        let center = self.center;
        for planet in &mut self.planets {
            planet.update(dt);
            let position = planet.position(center);
            planet.push_trail(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_full_period_returns_to_the_start_angle() {
        let mut planet = Planet::new("Mercury", 0.39 * AU, 88.0, 8.0, [1.0; 4]);
        let period_seconds = 88.0 * 86_400.0 / TIME_SCALE;

        let steps = 100;
        for _ in 0..steps {
            planet.update(period_seconds / steps as f32);
        }

        // Angle wrapped once and came back near zero
        let wrapped = planet.angle.min(TAU - planet.angle);
        assert!(wrapped.abs() < 1e-2);
    }

    #[test]
    fn longer_periods_orbit_more_slowly() {
        let mut inner = Planet::new("Mercury", 0.39 * AU, 88.0, 8.0, [1.0; 4]);
        let mut outer = Planet::new("Neptune", 30.05 * AU, 59800.0, 22.0, [1.0; 4]);

        inner.update(0.1);
        outer.update(0.1);

        assert!(inner.angle > outer.angle);
    }

    #[test]
    fn trail_is_capped() {
        let mut planet = Planet::new("Earth", AU, 365.25, 16.0, [1.0; 4]);
        for i in 0..200 {
            planet.push_trail(Vec2::new(i as f32, 0.0));
        }

        assert_eq!(planet.trail.len(), 80);
        // Oldest entries were discarded
        assert_eq!(planet.trail[0], Vec2::new(120.0, 0.0));
    }

    #[test]
    fn star_brightness_stays_in_range() {
        let star = Star {
            position: Vec2::ZERO,
            size: 2.0,
            twinkle_speed: 1.3,
            twinkle_phase: 0.7,
        };

        let mut t = 0.0;
        while t < 10.0 {
            let b = star.brightness(t);
            assert!((0.0..=1.0).contains(&b));
            t += 0.1;
        }
    }

    #[test]
    fn positions_stay_on_the_orbit_circle() {
        let center = Vec2::new(640.0, 450.0);
        let mut system = SolarSystem::new(center, 1280.0, 900.0);

        for _ in 0..50 {
            system.update(0.016);
        }

        for planet in &system.planets {
            let distance = planet.position(center).distance(center);
            assert!((distance - planet.orbit_radius).abs() < 1e-2);
        }
    }
}
