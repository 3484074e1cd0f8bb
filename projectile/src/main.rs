//! Standalone launcher for the projectile motion simulation

use winit::event_loop::EventLoop;

fn main() {
    env_logger::init();

    println!("Projectile Motion");
    println!();
    println!("Controls:");
    println!("  Hold left mouse  - Aim (trajectory preview)");
    println!("  Release          - Fire");
    println!("  Escape           - Quit");
    println!();

    let mut event_loop = EventLoop::new().expect("Failed to create event loop");
    projectile::run(&mut event_loop);
}
