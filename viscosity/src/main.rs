//! Standalone launcher for the viscosity simulation

use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    println!("Viscosity Simulation");
    println!();
    println!("Controls:");
    println!("  Space  - Start the race");
    println!("  R      - Reset");
    println!("  Escape - Quit");
    println!();

    let mut event_loop = EventLoop::new().expect("Failed to create event loop");
    viscosity::run(&mut event_loop);
}
