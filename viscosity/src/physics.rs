//! Viscous settling model
//!
//! One ball per fluid column, accelerating under gravity against a linear
//! drag proportional to its speed (`a = g - k*v`), until it settles on the
//! column floor. Higher drag coefficients settle later, which is the point
//! of the side-by-side race.

use glam::Vec2;

/// Downward gravitational acceleration (world units/s²)
pub const GRAVITY: f32 = 500.0;

pub const BALL_RADIUS: f32 = 10.0;

/// Wave surface phase speed while the race runs (rad/s)
const WAVE_SPEED: f32 = 2.0;

/// A fluid's label, drag coefficient, and display color
#[derive(Debug, Clone, Copy)]
pub struct Fluid {
    pub name: &'static str,
    pub viscosity: f32,
    pub color: [f32; 4],
}

/// The five fluids of the race, in display order
pub const FLUIDS: [Fluid; 5] = [
    Fluid {
        name: "Water",
        viscosity: 5.0,
        color: [0.25, 0.64, 0.87, 0.71],
    },
    Fluid {
        name: "Alcohol",
        viscosity: 8.0,
        color: [0.76, 0.96, 1.0, 0.71],
    },
    Fluid {
        name: "Oil",
        viscosity: 15.0,
        color: [1.0, 0.87, 0.35, 0.71],
    },
    Fluid {
        name: "Honey",
        viscosity: 50.0,
        color: [0.8, 0.56, 0.21, 0.78],
    },
    Fluid {
        name: "Glycerine",
        viscosity: 30.0,
        color: [0.9, 0.9, 1.0, 0.78],
    },
];

/// A fluid column with its test ball
#[derive(Debug, Clone)]
pub struct Column {
    pub fluid: Fluid,
    pub position: Vec2,
    pub size: Vec2,
    pub ball: Vec2,
    pub velocity: Vec2,
    pub settled: bool,
    pub wave_phase: f32,
}

impl Column {
    pub fn new(fluid: Fluid, position: Vec2, size: Vec2) -> Self {
        Self {
            fluid,
            position,
            size,
            ball: Self::rest_point(position, size),
            velocity: Vec2::ZERO,
            settled: false,
            wave_phase: 0.0,
        }
    }

    /// Drop point: the column center, nudged up slightly
    fn rest_point(position: Vec2, size: Vec2) -> Vec2 {
        position + size / 2.0 - Vec2::new(0.0, 10.0)
    }

    pub fn floor_y(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Advance the ball by `dt` seconds while the race runs
    pub fn step(&mut self, dt: f32) {
        if !self.settled {
            let accel = GRAVITY - self.fluid.viscosity * self.velocity.y;
            self.velocity.y += accel * dt;
            self.ball.y += self.velocity.y * dt;

            let floor = self.floor_y() - BALL_RADIUS;
            if self.ball.y >= floor {
                self.ball.y = floor;
                self.velocity = Vec2::ZERO;
                self.settled = true;
            }
        }
        self.wave_phase += dt * WAVE_SPEED;
    }

    /// Put the ball back at the drop point, at rest
    pub fn reset(&mut self) {
        self.ball = Self::rest_point(self.position, self.size);
        self.velocity = Vec2::ZERO;
        self.settled = false;
    }
}

/// The settling race: five columns stepped in lockstep
pub struct Race {
    pub columns: Vec<Column>,
    pub running: bool,
}

impl Race {
    /// Lay the columns out centered in a `window_width`-wide area with their
    /// floors on the ground line
    pub fn new(window_width: f32, column_size: Vec2, spacing: f32, top_y: f32) -> Self {
        let count = FLUIDS.len() as f32;
        let total = count * column_size.x + (count - 1.0) * spacing;
        let start_x = (window_width - total) / 2.0;

        let columns = FLUIDS
            .iter()
            .enumerate()
            .map(|(i, &fluid)| {
                let x = start_x + i as f32 * (column_size.x + spacing);
                Column::new(fluid, Vec2::new(x, top_y), column_size)
            })
            .collect();

        Self {
            columns,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the race and re-center every ball
    pub fn reset(&mut self) {
        self.running = false;
        for column in &mut self.columns {
            column.reset();
        }
    }

    /// Advance every column; does nothing until the race is started
    pub fn step(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        for column in &mut self.columns {
            column.step(dt);
        }
    }

    pub fn all_settled(&self) -> bool {
        self.columns.iter().all(|column| column.settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn race() -> Race {
        Race::new(1280.0, Vec2::new(150.0, 400.0), 100.0, 50.0)
    }

    #[test]
    fn layout_is_centered_with_even_spacing() {
        let race = race();
        assert_eq!(race.columns.len(), 5);
        assert!((race.columns[0].position.x - 65.0).abs() < EPS);
        for pair in race.columns.windows(2) {
            assert!((pair[1].position.x - pair[0].position.x - 250.0).abs() < EPS);
        }
    }

    #[test]
    fn nothing_moves_until_the_race_starts() {
        let mut race = race();
        let before = race.columns[0].ball;

        race.step(0.5);
        assert_eq!(race.columns[0].ball, before);

        race.start();
        race.step(0.5);
        assert!(race.columns[0].ball.y > before.y);
    }

    #[test]
    fn thicker_fluids_fall_behind() {
        let mut race = race();
        race.start();
        for _ in 0..20 {
            race.step(0.01);
        }

        let water = &race.columns[0];
        let honey = &race.columns[3];
        assert!(water.fluid.viscosity < honey.fluid.viscosity);
        assert!(water.ball.y > honey.ball.y);
    }

    #[test]
    fn balls_settle_on_the_floor_and_stay_there() {
        let mut race = race();
        race.start();
        for _ in 0..4000 {
            race.step(0.01);
        }

        assert!(race.all_settled());
        for column in &race.columns {
            assert!((column.ball.y - (column.floor_y() - BALL_RADIUS)).abs() < EPS);
            assert_eq!(column.velocity, Vec2::ZERO);
        }

        let frozen: Vec<Vec2> = race.columns.iter().map(|c| c.ball).collect();
        race.step(0.1);
        for (column, before) in race.columns.iter().zip(&frozen) {
            assert_eq!(column.ball, *before);
        }
    }

    #[test]
    fn speed_approaches_terminal_velocity() {
        let mut column = Column::new(FLUIDS[3], Vec2::new(0.0, 0.0), Vec2::new(150.0, 1e6));
        let terminal = GRAVITY / column.fluid.viscosity;

        for _ in 0..1000 {
            column.step(0.001);
        }

        assert!((column.velocity.y - terminal).abs() < 0.5);
    }

    #[test]
    fn reset_recenters_and_stops_everything() {
        let mut race = race();
        race.start();
        for _ in 0..100 {
            race.step(0.01);
        }

        race.reset();
        assert!(!race.running);
        for column in &race.columns {
            assert!(!column.settled);
            assert_eq!(column.velocity, Vec2::ZERO);
            let rest = column.position + column.size / 2.0 - Vec2::new(0.0, 10.0);
            assert_eq!(column.ball, rest);
        }
    }
}
