//! Projectile flight model
//!
//! A cannon launches a ball under constant gravity (y-down world). The shot
//! cycle is a small state machine: aim with the mouse held, fly, pause at the
//! apex, land and show the flight stats, then reset.

use glam::Vec2;

/// Downward gravitational acceleration (world units/s²)
pub const GRAVITY: f32 = 500.0;

/// Launch speed per unit of aim distance
const AIM_SPEED_SCALE: f32 = 4.0;

/// Launch speed cap
const MAX_LAUNCH_SPEED: f32 = 1000.0;

/// The ball spawns this far along the aim direction (barrel length)
const MUZZLE_OFFSET: f32 = 50.0;

/// Seconds the ball hangs at the top of its arc
const PEAK_PAUSE: f32 = 2.0;

/// Seconds the landing results stay on screen
const RESULT_HOLD: f32 = 4.0;

/// Trajectory preview sampling: 0.1 s steps over 2 s of flight
const PREVIEW_STEP: f32 = 0.1;
const PREVIEW_SPAN: f32 = 2.0;

pub const BALL_RADIUS: f32 = 8.0;

/// Flight statistics captured during one shot
#[derive(Debug, Clone, Copy, Default)]
pub struct ShotStats {
    pub range: f32,
    pub max_height: f32,
    pub angle_degrees: f32,
    pub launch_speed: f32,
}

/// Where the simulation is in the shot cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Waiting for the player to press the mouse
    Idle,
    /// Mouse held, live trajectory preview
    Aiming,
    /// Free flight
    Flight,
    /// Frozen at the apex
    PeakPause { remaining: f32 },
    /// On the ground with results showing
    Landed { remaining: f32 },
}

/// The projectile simulation state
pub struct Projectile {
    pub phase: Phase,
    pub cannon: Vec2,
    pub floor_y: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub stats: ShotStats,
    prev_vy: f32,
}

impl Projectile {
    pub fn new(cannon: Vec2, floor_y: f32) -> Self {
        Self {
            phase: Phase::Idle,
            cannon,
            floor_y,
            position: cannon,
            velocity: Vec2::ZERO,
            stats: ShotStats::default(),
            prev_vy: 0.0,
        }
    }

    /// Mouse pressed: start aiming. Ignored while a shot is in progress.
    pub fn begin_aim(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Aiming;
            self.position = self.cannon;
            self.velocity = Vec2::ZERO;
            self.stats = ShotStats::default();
        }
    }

    /// Aim direction and clamped launch speed for a pointer position.
    /// A pointer on the cannon gives no aim at all.
    pub fn aim(&self, pointer: Vec2) -> Option<(Vec2, f32)> {
        let offset = pointer - self.cannon;
        let length = offset.length();
        if length <= 0.0 {
            return None;
        }
        let speed = (length * AIM_SPEED_SCALE).min(MAX_LAUNCH_SPEED);
        Some((offset / length, speed))
    }

    /// Mouse released: fire toward the pointer
    pub fn launch(&mut self, pointer: Vec2) {
        if self.phase != Phase::Aiming {
            return;
        }

        match self.aim(pointer) {
            Some((direction, speed)) => {
                self.velocity = direction * speed;
                self.position = self.cannon + direction * MUZZLE_OFFSET;
                self.prev_vy = self.velocity.y;
                self.stats.launch_speed = speed;
                // Report the angle y-up, the way artillery tables read
                self.stats.angle_degrees = (-direction.y).atan2(direction.x).to_degrees();
                self.phase = Phase::Flight;
            }
            None => self.phase = Phase::Idle,
        }
    }

    /// Dotted arc preview for the current pointer position, cut off at the
    /// ground line
    pub fn preview(&self, pointer: Vec2) -> Vec<Vec2> {
        let mut points = Vec::new();
        if let Some((direction, speed)) = self.aim(pointer) {
            let muzzle = self.cannon + direction * MUZZLE_OFFSET;
            let v0 = direction * speed;
            let mut t = 0.0;
            while t < PREVIEW_SPAN {
                let p = muzzle + v0 * t + Vec2::new(0.0, 0.5 * GRAVITY * t * t);
                if p.y > self.floor_y {
                    break;
                }
                points.push(p);
                t += PREVIEW_STEP;
            }
        }
        points
    }

    /// Barrel angle in radians for a pointer position (0 points right)
    pub fn aim_angle(&self, pointer: Vec2) -> Option<f32> {
        self.aim(pointer)
            .map(|(direction, _)| direction.y.atan2(direction.x))
    }

    /// Advance the shot by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        match self.phase {
            Phase::Flight => {
                self.velocity.y += GRAVITY * dt;
                self.position += self.velocity * dt;

                // Apex: vertical velocity crossing from upward to downward
                if self.velocity.y >= 0.0 && self.prev_vy < 0.0 {
                    self.stats.max_height = self.cannon.y - self.position.y;
                    self.velocity.y = 0.0;
                    self.prev_vy = 0.0;
                    self.phase = Phase::PeakPause {
                        remaining: PEAK_PAUSE,
                    };
                    return;
                }
                self.prev_vy = self.velocity.y;

                if self.position.y >= self.floor_y - BALL_RADIUS {
                    self.position.y = self.floor_y - BALL_RADIUS;
                    self.stats.range = self.position.x - self.cannon.x;
                    self.phase = Phase::Landed {
                        remaining: RESULT_HOLD,
                    };
                }
            }
            Phase::PeakPause { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    Phase::Flight
                } else {
                    Phase::PeakPause { remaining }
                };
            }
            Phase::Landed { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.phase = Phase::Idle;
                    self.position = self.cannon;
                    self.velocity = Vec2::ZERO;
                } else {
                    self.phase = Phase::Landed { remaining };
                }
            }
            Phase::Idle | Phase::Aiming => {}
        }
    }

    /// True while the landing results should be displayed
    pub fn showing_results(&self) -> bool {
        matches!(self.phase, Phase::Landed { .. })
    }
}
