//! Standalone launcher for the container collision simulation

use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    println!("Container Collision");
    println!();
    println!("Controls:");
    println!("  Drag   - Grab a disc, release to throw");
    println!("  Space  - Stop all motion");
    println!("  Escape - Quit");
    println!();

    let mut event_loop = EventLoop::new().expect("Failed to create event loop");
    collision::run(&mut event_loop);
}
