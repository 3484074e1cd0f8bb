//! Viscosity Simulation
//!
//! Five fluid columns race identical balls to the bottom; the drag
//! coefficient of each fluid decides how quickly its ball settles.
//!
//! Controls:
//! - Space: start the race
//! - R: reset
//! - Escape: close the simulation

pub mod physics;
pub mod renderer;

use common::{Camera2D, DrawList, GraphicsContext, Overlay, ShapeRenderer};
use glam::Vec2;
use physics::Race;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 800;

const COLUMN_SIZE: Vec2 = Vec2::new(150.0, 400.0);
const COLUMN_SPACING: f32 = 100.0;
const COLUMN_TOP_Y: f32 = 50.0;

const MAX_CIRCLES: usize = 16;
const MAX_FLAT_VERTICES: usize = 2048;

struct App {
    ctx: GraphicsContext,
    renderer: ShapeRenderer,
    overlay: Overlay,
    list: DrawList,
    camera: Camera2D,
    race: Race,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = ShapeRenderer::new(&ctx, MAX_CIRCLES, MAX_FLAT_VERTICES);
        let overlay = Overlay::new(&ctx);
        let camera = Camera2D::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);

        let race = Race::new(
            WINDOW_WIDTH as f32,
            COLUMN_SIZE,
            COLUMN_SPACING,
            COLUMN_TOP_Y,
        );

        Self {
            ctx,
            renderer,
            overlay,
            list: DrawList::default(),
            camera,
            race,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    fn update(&mut self, dt: f32) {
        self.race.step(dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer::build_scene(&mut self.list, &self.race);
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

        let running = self.race.running;
        let all_settled = self.race.all_settled();
        let labels: Vec<(String, egui::Color32)> = self
            .race
            .columns
            .iter()
            .map(|column| {
                let [r, g, b, _] = column.fluid.color;
                (
                    format!(
                        "{} - {} mPa\u{b7}s",
                        column.fluid.name, column.fluid.viscosity
                    ),
                    egui::Color32::from_rgb(
                        (r * 255.0) as u8,
                        (g * 255.0) as u8,
                        (b * 255.0) as u8,
                    ),
                )
            })
            .collect();

        self.overlay.paint(&self.ctx, &mut encoder, &view, |ctx| {
            egui::TopBottomPanel::top("status").show(ctx, |ui| {
                if !running {
                    ui.label("Space starts the race, R resets");
                } else if all_settled {
                    ui.label("All settled - press R to race again");
                } else {
                    ui.label("Settling...");
                }
            });

            egui::TopBottomPanel::bottom("labels").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (text, color) in &labels {
                        ui.label(egui::RichText::new(text).color(*color));
                        ui.separator();
                    }
                });
            });
        });

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => self.race.start(),
            KeyCode::KeyR => self.race.reset(),
            _ => {}
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.overlay.on_event(&self.ctx.window, event)
    }
}

/// Run the viscosity simulation until its window closes
pub fn run(event_loop: &mut EventLoop<()>) {
    log::info!("viscosity session: {} fluids", physics::FLUIDS.len());

    let ctx = pollster::block_on(GraphicsContext::new(
        event_loop,
        "Viscosity Simulation",
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
                            WindowEvent::KeyboardInput {
                                event:
                                    KeyEvent {
                                        physical_key: PhysicalKey::Code(key),
                                        state,
                                        ..
                                    },
                                ..
                            } => {
                                if *key == KeyCode::Escape && *state == ElementState::Pressed {
                                    elwt.exit();
                                } else {
                                    app.handle_key(*key, *state);
                                }
                            }
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
