//! Planetary Orbit Simulation
//!
//! Eight planets revolving around a sun on fixed circular orbits, with orbit
//! trails and a twinkling star field.
//!
//! Controls:
//! - Scroll: zoom in/out
//! - Middle mouse drag: pan the view
//! - Escape: close the simulation

pub mod physics;
pub mod renderer;

use common::{Camera2D, DrawList, GraphicsContext, Overlay, ShapeRenderer};
use physics::SolarSystem;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 900;

const MAX_CIRCLES: usize = 512;
const MAX_FLAT_VERTICES: usize = 2048;

const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.06,
    a: 1.0,
};

struct App {
    ctx: GraphicsContext,
    renderer: ShapeRenderer,
    overlay: Overlay,
    list: DrawList,
    camera: Camera2D,
    system: SolarSystem,
    panning: bool,
    last_cursor: PhysicalPosition<f64>,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = ShapeRenderer::new(&ctx, MAX_CIRCLES, MAX_FLAT_VERTICES);
        let overlay = Overlay::new(&ctx);
        let camera = Camera2D::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);

        let system = SolarSystem::new(
            camera.center,
            WINDOW_WIDTH as f32,
            WINDOW_HEIGHT as f32,
        );

        Self {
            ctx,
            renderer,
            overlay,
            list: DrawList::default(),
            camera,
            system,
            panning: false,
            last_cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    fn update(&mut self, dt: f32) {
        self.system.update(dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer::build_scene(&mut self.list, &self.system);
        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let counts = self.renderer.upload(&self.ctx.queue, &self.list);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, &counts, BACKGROUND);

        self.overlay.paint(&self.ctx, &mut encoder, &view, |ctx| {
            egui::TopBottomPanel::top("legend").show(ctx, |ui| {
                ui.label("Planetary orbits  (scroll zooms, middle drag pans)");
            });
        });

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        if self.panning {
            let previous = self.camera.screen_to_world(self.last_cursor, self.ctx.size);
            let current = self.camera.screen_to_world(position, self.ctx.size);
            self.camera.center += previous - current;
        }
        self.last_cursor = position;
    }

    fn handle_scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.camera.zoom *= 1.1;
        } else if delta < 0.0 {
            self.camera.zoom /= 1.1;
        }
        self.camera.zoom = self.camera.zoom.clamp(0.1, 10.0);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.overlay.on_event(&self.ctx.window, event)
    }
}

/// Run the orbit simulation until its window closes
pub fn run(event_loop: &mut EventLoop<()>) {
    log::info!("orbit session: time scale {}x", physics::TIME_SCALE);

    let ctx = pollster::block_on(GraphicsContext::new(
        event_loop,
        "Planetary Orbit",
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
                                button: MouseButton::Middle,
                                ..
                            } => app.panning = *state == ElementState::Pressed,
                            WindowEvent::MouseWheel { delta, .. } => {
                                let scroll = match delta {
                                    MouseScrollDelta::LineDelta(_, y) => *y,
                                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                                };
                                app.handle_scroll(scroll);
                            }
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
