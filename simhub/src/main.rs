//! Physics Simulation Hub
//!
//! Text-menu front end for the four simulations. The menu loops on stdin;
//! each selection opens a window and control returns here when it closes.
//!
//! The winit event loop is created exactly once and re-entered per selection
//! (`run_on_demand`), since recreating it within one process is not
//! supported on every platform.

use std::io::{self, BufRead, Write};

use winit::event_loop::EventLoop;

fn print_menu() {
    println!();
    println!("========================================");
    println!("         Physics Simulation Hub         ");
    println!("========================================");
    println!(" Select Simulation Mode:");
    println!("  [1] Planetary Orbit");
    println!("  [2] Projectile Motion");
    println!("  [3] Collision Simulation");
    println!("  [4] Viscosity Simulation");
    println!("  [5] Quit");
    println!("----------------------------------------");
    print!(" Enter choice: ");
    io::stdout().flush().expect("Failed to flush stdout");
}

fn main() {
    env_logger::init();

    let mut event_loop = EventLoop::new().expect("Failed to create event loop");
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_menu();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        match line.trim().parse::<u32>() {
            Ok(1) => {
                log::info!("starting planetary orbit simulation");
                orbit::run(&mut event_loop);
            }
            Ok(2) => {
                log::info!("starting projectile motion simulation");
                projectile::run(&mut event_loop);
            }
            Ok(3) => {
                log::info!("starting collision simulation");
                collision::run(&mut event_loop);
            }
            Ok(4) => {
                log::info!("starting viscosity simulation");
                viscosity::run(&mut event_loop);
            }
            Ok(5) => {
                println!();
                println!("Exiting... Have a great day!");
                break;
            }
            _ => {
                println!();
                println!("Invalid choice, please try again.");
            }
        }
    }
}
