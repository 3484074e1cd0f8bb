//! Common utilities for the physics simulation hub
//!
//! This crate provides the shared graphics setup, camera mapping, shape
//! rendering, and overlay plumbing used by all four simulations.

pub mod camera;
pub mod graphics;
pub mod overlay;
pub mod shapes;

pub use camera::*;
pub use graphics::*;
pub use overlay::*;
pub use shapes::*;
