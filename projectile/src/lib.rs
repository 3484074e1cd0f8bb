//! Projectile Motion Simulation
//!
//! Hold the left mouse button to aim the cannon with a live trajectory
//! preview, release to fire. The ball pauses briefly at the top of its arc;
//! landing shows range, max height, launch angle, and launch speed.
//!
//! Controls:
//! - Left mouse hold: aim (preview shown), release: fire
//! - Escape: close the simulation

pub mod physics;
pub mod renderer;

use common::{Camera2D, DrawList, GraphicsContext, Overlay, ShapeRenderer};
use glam::Vec2;
use physics::{Phase, Projectile};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

const MAX_CIRCLES: usize = 32;
const MAX_FLAT_VERTICES: usize = 64;

struct App {
    ctx: GraphicsContext,
    renderer: ShapeRenderer,
    overlay: Overlay,
    list: DrawList,
    camera: Camera2D,
    simulation: Projectile,
    pointer: Vec2,
    cannon_angle: f32,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = ShapeRenderer::new(&ctx, MAX_CIRCLES, MAX_FLAT_VERTICES);
        let overlay = Overlay::new(&ctx);
        let camera = Camera2D::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);

        let floor_y = WINDOW_HEIGHT as f32;
        // Cannon sits on the ground strip at the left edge
        let cannon = Vec2::new(50.0, floor_y - 4.0 - 10.0);
        let simulation = Projectile::new(cannon, floor_y);

        Self {
            ctx,
            renderer,
            overlay,
            list: DrawList::default(),
            camera,
            simulation,
            pointer: Vec2::ZERO,
            cannon_angle: 0.0,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    fn update(&mut self, dt: f32) {
        if self.simulation.phase == Phase::Aiming {
            if let Some(angle) = self.simulation.aim_angle(self.pointer) {
                self.cannon_angle = angle;
            }
        }
        self.simulation.step(dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer::build_scene(
            &mut self.list,
            &self.simulation,
            self.pointer,
            self.cannon_angle,
            Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
        );
        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let counts = self.renderer.upload(&self.ctx.queue, &self.list);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer
            .render(&mut encoder, &view, &counts, wgpu::Color::BLACK);

        let stats = self.simulation.stats;
        let showing_results = self.simulation.showing_results();
        self.overlay.paint(&self.ctx, &mut encoder, &view, |ctx| {
            egui::TopBottomPanel::top("readout").show(ctx, |ui| {
                if showing_results {
                    ui.label(format!(
                        "Range: {:.0} px   Max Height: {:.0} px   Angle: {:.1} deg   Max Velocity: {:.0} px/s",
                        stats.range, stats.max_height, stats.angle_degrees, stats.launch_speed,
                    ));
                } else {
                    ui.label("Hold the left mouse button to aim, release to fire");
                }
            });
        });

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_cursor(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        self.pointer = self.camera.screen_to_world(position, self.ctx.size);
    }

    fn handle_mouse(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => self.simulation.begin_aim(),
            ElementState::Released => self.simulation.launch(self.pointer),
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.overlay.on_event(&self.ctx.window, event)
    }
}

/// Run the projectile simulation until its window closes
pub fn run(event_loop: &mut EventLoop<()>) {
    log::info!("projectile session: gravity {} units/s^2", physics::GRAVITY);

    let ctx = pollster::block_on(GraphicsContext::new(
        event_loop,
        "Projectile Motion",
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
    ));

    let mut app = App::new(ctx);
    let mut last_time = std::time::Instant::now();

    event_loop
        .run_on_demand(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { ref event, .. } => {
                    let consumed = app.handle_window_event(event);

                    if !consumed {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(size) => app.resize(*size),
                            WindowEvent::CursorMoved { position, .. } => {
                                app.handle_cursor(*position)
                            }
                            WindowEvent::MouseInput {
                                state,
                                button: MouseButton::Left,
                                ..
                            } => app.handle_mouse(*state),
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                                        state: ElementState::Pressed,
                                        ..
                                    },
                                ..
                            } => elwt.exit(),
                            WindowEvent::RedrawRequested => {
                                let now = std::time::Instant::now();
                                let dt = (now - last_time).as_secs_f32().min(0.1);
                                last_time = now;

                                app.update(dt);
                                match app.render() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => eprintln!("Render error: {:?}", e),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.ctx.window.request_redraw();
                }
                _ => {}
            }
        })
        .expect("Event loop error");
}
