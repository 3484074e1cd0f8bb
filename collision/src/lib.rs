//! Container Collision Simulation
//!
//! Ten discs inside a rectangular container. Grab a disc with the left
//! mouse button and release to throw it; discs bounce off the walls and
//! each other with restitution.
//!
//! Controls:
//! - Left mouse drag: grab a disc, release to throw
//! - Space: stop all motion
//! - Escape: close the simulation

pub mod physics;
pub mod renderer;

use common::{Camera2D, DrawList, GraphicsContext, Overlay, ShapeRenderer};
use glam::Vec2;
use physics::{Container, Simulation, BODY_COUNT, BODY_RADIUS};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
};

const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

/// Inset of the container from the window edges
const CONTAINER_INSET: f32 = 50.0;

const MAX_CIRCLES: usize = 32;
const MAX_FLAT_VERTICES: usize = 256;

struct App {
    ctx: GraphicsContext,
    renderer: ShapeRenderer,
    overlay: Overlay,
    list: DrawList,
    camera: Camera2D,
    simulation: Simulation,
    pointer: Vec2,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = ShapeRenderer::new(&ctx, MAX_CIRCLES, MAX_FLAT_VERTICES);
        let overlay = Overlay::new(&ctx);
        let camera = Camera2D::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32);

        let container = Container::new(
            CONTAINER_INSET,
            CONTAINER_INSET,
            WINDOW_WIDTH as f32 - 2.0 * CONTAINER_INSET,
            WINDOW_HEIGHT as f32 - 2.0 * CONTAINER_INSET,
        );
        let simulation = Simulation::new(container, BODY_COUNT, BODY_RADIUS);

        Self {
            ctx,
            renderer,
            overlay,
            list: DrawList::default(),
            camera,
            simulation,
            pointer: Vec2::ZERO,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    fn update(&mut self, dt: f32) {
        self.simulation.step(dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer::build_scene(&mut self.list, &self.simulation, self.pointer);
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

        self.overlay.paint(&self.ctx, &mut encoder, &view, |ctx| {
            egui::TopBottomPanel::top("legend").show(ctx, |ui| {
                ui.label("Drag the ball to throw it!  (Space stops all motion)");
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
            ElementState::Pressed => self.simulation.start_drag(self.pointer),
            ElementState::Released => self.simulation.end_drag(self.pointer),
        }
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        if key == KeyCode::Space {
            self.simulation.clear_velocities();
        }
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.overlay.on_event(&self.ctx.window, event)
    }
}

/// Run the collision simulation until its window closes
pub fn run(event_loop: &mut EventLoop<()>) {
    log::info!("collision session: {} discs of radius {}", BODY_COUNT, BODY_RADIUS);

    let ctx = pollster::block_on(GraphicsContext::new(
        event_loop,
        "Container Collision",
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
