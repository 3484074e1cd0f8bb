//! Standalone launcher for the planetary orbit simulation

use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    println!("Planetary Orbit");
    println!();
    println!("Controls:");
    println!("  Scroll      - Zoom in/out");
    println!("  Middle drag - Pan the view");
    println!("  Escape      - Quit");
    println!();

    let mut event_loop = EventLoop::new().expect("Failed to create event loop");
    orbit::run(&mut event_loop);
}
