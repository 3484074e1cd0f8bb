//! Container collision physics
//!
//! A fixed set of discs bouncing inside a rectangular container. Each tick
//! integrates positions, clamps against the four walls, and resolves
//! disc-disc contacts pairwise with an equal-mass impulse and a positional
//! correction. One disc at a time can be grabbed with the pointer and thrown
//! along the drag vector on release.

use glam::Vec2;
use rand::Rng;

/// Energy retained on a bounce, in (0, 1]
pub const RESTITUTION: f32 = 0.8;

/// Velocity applied per unit of drag displacement on release
pub const THROW_SCALE: f32 = 5.0;

/// Discs per session
pub const BODY_COUNT: usize = 10;

/// Disc radius
pub const BODY_RADIUS: f32 = 15.0;

/// Inset from the container edges for random placement
const SPAWN_MARGIN: f32 = 20.0;

const BODY_COLOR: [f32; 4] = [0.39, 0.78, 0.98, 1.0];

/// A movable disc
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            color: BODY_COLOR,
        }
    }
}

/// Static rectangular boundary for disc motion
#[derive(Debug, Clone, Copy)]
pub struct Container {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// A single in-flight grab-and-throw interaction
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub index: usize,
    pub start: Vec2,
}

/// The collision simulation state
pub struct Simulation {
    pub bodies: Vec<Body>,
    pub container: Container,
    pub drag: Option<DragSession>,
    pub restitution: f32,
}

impl Simulation {
    /// Create a session with `count` discs at rest, placed randomly inside
    /// the container minus a spawn margin.
    pub fn new(container: Container, count: usize, radius: f32) -> Self {
        let mut rng = rand::thread_rng();
        let bodies = (0..count)
            .map(|_| {
                let x = rng
                    .gen_range(container.left + SPAWN_MARGIN..container.right() - SPAWN_MARGIN);
                let y = rng
                    .gen_range(container.top + SPAWN_MARGIN..container.bottom() - SPAWN_MARGIN);
                Body::new(Vec2::new(x, y), radius)
            })
            .collect();

        Self {
            bodies,
            container,
            drag: None,
            restitution: RESTITUTION,
        }
    }

    /// Advance all discs by `dt` seconds, then resolve walls and contacts.
    ///
    /// A grabbed disc is pinned: it is not integrated while the drag session
    /// is open (its velocity is already zero).
    pub fn step(&mut self, dt: f32) {
        let grabbed = self.drag.map(|session| session.index);
        for (i, body) in self.bodies.iter_mut().enumerate() {
            if grabbed == Some(i) {
                continue;
            }
            body.position += body.velocity * dt;
        }
        self.resolve_all();
    }

    /// Grab the first disc under the pointer, if any. Zeroes its velocity
    /// and opens the drag session; a miss changes nothing.
    pub fn start_drag(&mut self, pointer: Vec2) {
        for (i, body) in self.bodies.iter_mut().enumerate() {
            if pointer.distance(body.position) <= body.radius {
                body.velocity = Vec2::ZERO;
                self.drag = Some(DragSession {
                    index: i,
                    start: pointer,
                });
                return;
            }
        }
    }

    /// Release the grabbed disc, throwing it along the drag vector scaled by
    /// [`THROW_SCALE`]. Without an open session this does nothing.
    pub fn end_drag(&mut self, pointer: Vec2) {
        if let Some(session) = self.drag.take() {
            self.bodies[session.index].velocity = (pointer - session.start) * THROW_SCALE;
        }
    }

    /// Zero every disc's velocity and cancel any open drag
    pub fn clear_velocities(&mut self) {
        for body in &mut self.bodies {
            body.velocity = Vec2::ZERO;
        }
        self.drag = None;
    }

    /// Guide line for an open drag, from grab start to the pointer
    pub fn drag_line(&self, pointer: Vec2) -> Option<(Vec2, Vec2)> {
        self.drag.map(|session| (session.start, pointer))
    }

    /// Apply wall constraints, then pairwise disc constraints
    pub fn resolve_all(&mut self) {
        self.resolve_walls();
        self.resolve_pairs();
    }

    fn resolve_walls(&mut self) {
        let container = self.container;
        for body in &mut self.bodies {
            // All four planes are checked independently so a corner hit
            // rebounds on both axes in the same tick.
            if body.position.x - body.radius < container.left {
                body.position.x = container.left + body.radius;
                body.velocity.x *= -self.restitution;
            }
            if body.position.x + body.radius > container.right() {
                body.position.x = container.right() - body.radius;
                body.velocity.x *= -self.restitution;
            }
            if body.position.y - body.radius < container.top {
                body.position.y = container.top + body.radius;
                body.velocity.y *= -self.restitution;
            }
            if body.position.y + body.radius > container.bottom() {
                body.position.y = container.bottom() - body.radius;
                body.velocity.y *= -self.restitution;
            }
        }
    }

    /// Single pass over index-ordered pairs. With three or more mutually
    /// overlapping discs some overlap can survive the tick; it decays over
    /// the following ticks.
    fn resolve_pairs(&mut self) {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.bodies[i].position - self.bodies[j].position;
                let dist = delta.length();
                let min_dist = self.bodies[i].radius + self.bodies[j].radius;

                // Exactly coincident centers have no contact normal; leave
                // the pair untouched.
                if dist <= 0.0 || dist >= min_dist {
                    continue;
                }

                let normal = delta / dist;
                let vrel = (self.bodies[i].velocity - self.bodies[j].velocity).dot(normal);
                if vrel >= 0.0 {
                    // Already separating
                    continue;
                }

                let impulse = -(1.0 + self.restitution) * vrel / 2.0;
                self.bodies[i].velocity += impulse * normal;
                self.bodies[j].velocity -= impulse * normal;

                let half_overlap = (min_dist - dist) * 0.5;
                self.bodies[i].position += normal * half_overlap;
                self.bodies[j].position -= normal * half_overlap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn empty_sim(container: Container) -> Simulation {
        Simulation {
            bodies: Vec::new(),
            container,
            drag: None,
            restitution: RESTITUTION,
        }
    }

    fn body_at(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        let mut body = Body::new(Vec2::new(x, y), BODY_RADIUS);
        body.velocity = Vec2::new(vx, vy);
        body
    }

    fn assert_contained(sim: &Simulation) {
        let c = sim.container;
        for body in &sim.bodies {
            assert!(body.position.x - body.radius >= c.left - EPS);
            assert!(body.position.x + body.radius <= c.right() + EPS);
            assert!(body.position.y - body.radius >= c.top - EPS);
            assert!(body.position.y + body.radius <= c.bottom() + EPS);
        }
    }

    #[test]
    fn new_session_places_bodies_inside_with_margin() {
        let container = Container::new(50.0, 50.0, 700.0, 500.0);
        let sim = Simulation::new(container, BODY_COUNT, BODY_RADIUS);

        assert_eq!(sim.bodies.len(), BODY_COUNT);
        assert!(sim.drag.is_none());
        for body in &sim.bodies {
            assert_eq!(body.velocity, Vec2::ZERO);
            assert_eq!(body.radius, BODY_RADIUS);
            assert!(body.position.x >= container.left + 20.0);
            assert!(body.position.x <= container.right() - 20.0);
            assert!(body.position.y >= container.top + 20.0);
            assert!(body.position.y <= container.bottom() - 20.0);
        }
    }

    #[test]
    fn walls_contain_bodies_after_resolution() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(395.0, 150.0, 50.0, 0.0));
        sim.bodies.push(body_at(5.0, 150.0, -50.0, 0.0));
        sim.bodies.push(body_at(200.0, 295.0, 0.0, 50.0));

        sim.resolve_all();
        assert_contained(&sim);
    }

    #[test]
    fn restitution_flips_and_scales_wall_velocity() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(10.0, 150.0, -50.0, 0.0));

        sim.resolve_all();

        let body = &sim.bodies[0];
        assert!((body.position.x - BODY_RADIUS).abs() < EPS);
        assert!((body.velocity.x - 50.0 * RESTITUTION).abs() < EPS);
        assert!(body.velocity.y.abs() < EPS);
    }

    #[test]
    fn corner_hit_rebounds_on_both_axes() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(5.0, 5.0, -10.0, -20.0));

        sim.resolve_all();

        let body = &sim.bodies[0];
        assert!((body.position.x - BODY_RADIUS).abs() < EPS);
        assert!((body.position.y - BODY_RADIUS).abs() < EPS);
        assert!((body.velocity.x - 10.0 * RESTITUTION).abs() < EPS);
        assert!((body.velocity.y - 20.0 * RESTITUTION).abs() < EPS);
    }

    #[test]
    fn overlapping_pair_separates_to_contact_distance() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 150.0, 10.0, 0.0));
        sim.bodies.push(body_at(120.0, 150.0, -10.0, 0.0));

        sim.resolve_all();

        let dist = sim.bodies[0].position.distance(sim.bodies[1].position);
        assert!(dist >= 2.0 * BODY_RADIUS - EPS);
    }

    #[test]
    fn head_on_elastic_collision_exchanges_velocities() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.restitution = 1.0;
        sim.bodies.push(body_at(100.0, 150.0, 50.0, 0.0));
        sim.bodies.push(body_at(125.0, 150.0, -50.0, 0.0));

        sim.resolve_all();

        assert!(sim.bodies[0].velocity.distance(Vec2::new(-50.0, 0.0)) < EPS);
        assert!(sim.bodies[1].velocity.distance(Vec2::new(50.0, 0.0)) < EPS);
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        // Overlapping but moving apart: no impulse, no correction
        sim.bodies.push(body_at(100.0, 150.0, -30.0, 0.0));
        sim.bodies.push(body_at(120.0, 150.0, 30.0, 0.0));
        let before: Vec<Body> = sim.bodies.clone();

        sim.resolve_all();

        for (body, prev) in sim.bodies.iter().zip(&before) {
            assert_eq!(body.position, prev.position);
            assert_eq!(body.velocity, prev.velocity);
        }
    }

    #[test]
    fn coincident_centers_are_a_no_op() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(200.0, 150.0, 10.0, 0.0));
        sim.bodies.push(body_at(200.0, 150.0, -10.0, 0.0));

        sim.resolve_all();

        assert_eq!(sim.bodies[0].position, sim.bodies[1].position);
        assert_eq!(sim.bodies[0].velocity, Vec2::new(10.0, 0.0));
        assert_eq!(sim.bodies[1].velocity, Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn resolution_is_idempotent_without_contacts() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 12.0, -7.0));
        sim.bodies.push(body_at(300.0, 200.0, -3.0, 4.0));
        let before: Vec<Body> = sim.bodies.clone();

        sim.resolve_all();

        for (body, prev) in sim.bodies.iter().zip(&before) {
            assert_eq!(body.position, prev.position);
            assert_eq!(body.velocity, prev.velocity);
        }
    }

    #[test]
    fn grab_zeroes_velocity_and_release_throws() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 30.0, 40.0));

        sim.start_drag(Vec2::new(105.0, 100.0));
        assert!(sim.drag.is_some());
        assert_eq!(sim.bodies[0].velocity, Vec2::ZERO);

        sim.end_drag(Vec2::new(125.0, 90.0));
        assert!(sim.drag.is_none());
        // Displacement (20, -10) scaled by THROW_SCALE
        assert!(sim.bodies[0]
            .velocity
            .distance(Vec2::new(100.0, -50.0))
            < EPS);
    }

    #[test]
    fn grab_picks_the_lowest_index_under_the_pointer() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 0.0, 0.0));
        sim.bodies.push(body_at(105.0, 100.0, 0.0, 0.0));

        sim.start_drag(Vec2::new(103.0, 100.0));
        assert_eq!(sim.drag.map(|session| session.index), Some(0));
    }

    #[test]
    fn missed_grab_and_unmatched_release_are_no_ops() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 30.0, 40.0));

        sim.start_drag(Vec2::new(300.0, 300.0));
        assert!(sim.drag.is_none());
        assert_eq!(sim.bodies[0].velocity, Vec2::new(30.0, 40.0));

        sim.end_drag(Vec2::new(300.0, 300.0));
        assert_eq!(sim.bodies[0].velocity, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn zero_length_throw_leaves_the_disc_at_rest() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 30.0, 40.0));

        let grab = Vec2::new(100.0, 100.0);
        sim.start_drag(grab);
        sim.end_drag(grab);
        assert_eq!(sim.bodies[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn clear_velocities_stops_everything_and_cancels_the_drag() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 30.0, 40.0));
        sim.bodies.push(body_at(200.0, 200.0, -5.0, 9.0));
        sim.start_drag(Vec2::new(100.0, 100.0));

        sim.clear_velocities();

        assert!(sim.drag.is_none());
        for body in &sim.bodies {
            assert_eq!(body.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn grabbed_disc_is_not_integrated() {
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 100.0, 0.0, 0.0));
        sim.bodies.push(body_at(300.0, 200.0, 10.0, 0.0));

        sim.start_drag(Vec2::new(100.0, 100.0));
        sim.step(1.0);

        assert_eq!(sim.bodies[0].position, Vec2::new(100.0, 100.0));
        assert!((sim.bodies[1].position.x - 310.0).abs() < EPS);
    }

    #[test]
    fn head_on_approach_resolves_with_restitution() {
        // Two discs closing at 100 units/s; after 0.9 s they overlap by 20
        // and the contact resolves with e = 0.8.
        let mut sim = empty_sim(Container::new(0.0, 0.0, 400.0, 300.0));
        sim.bodies.push(body_at(100.0, 150.0, 50.0, 0.0));
        sim.bodies.push(body_at(200.0, 150.0, -50.0, 0.0));

        sim.step(0.9);

        let normal = (sim.bodies[0].position - sim.bodies[1].position).normalize();
        let vrel = (sim.bodies[0].velocity - sim.bodies[1].velocity).dot(normal);
        // Pre-contact normal velocity was -100; restitution scales it by -0.8
        assert!((vrel - 80.0).abs() < EPS);

        let dist = sim.bodies[0].position.distance(sim.bodies[1].position);
        assert!(dist >= 2.0 * BODY_RADIUS - EPS);
    }
}
