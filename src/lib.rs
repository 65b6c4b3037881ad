/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure of the flocking engine and its
 * interactive front end. The engine (vector, boid, physics, flock, boundary,
 * params, sink) has no knowledge of windows or drawing; the front end
 * (app, renderer, camera, ui, input, debug) consumes it through a render sink.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidId, FlockId, Neighbor, SteeringForces};
pub use boundary::{BoundaryPolicy, Bounds};
pub use error::FlockError;
pub use flock::Flock;
pub use params::SimulationParams;
pub use sink::{FrameBuffer, RenderFrame, RenderSink, RenderedBoid};
pub use vector::Vector;

// Define modules
pub mod app;
pub mod boid;
pub mod boundary;
pub mod camera;
pub mod debug;
pub mod error;
pub mod flock;
pub mod input;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod sink;
pub mod ui;
pub mod vector;

// Constants
pub const BOID_SIZE: f32 = 6.0;
