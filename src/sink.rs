/*
 * Render Sink Module
 *
 * The flock never draws anything itself. After every completed tick it
 * hands (identity, position, velocity) for each boid to the sinks the host
 * application registered. FrameBuffer is the sink used by the nannou front
 * end: it keeps the latest frame behind a shared lock for the view to read.
 */

use std::sync::{Arc, Mutex};

use nannou::prelude::Vec3;

use crate::boid::BoidId;
use crate::vector::Vector;

pub trait RenderSink<V>: Send {
    fn render(&mut self, id: BoidId, position: V, velocity: V);

    // Called once all boids of a tick have been rendered
    fn frame_complete(&mut self, _tick: u64) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedBoid {
    pub id: BoidId,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    pending: Vec<RenderedBoid>,
    latest: Arc<Mutex<RenderFrame>>,
}

#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub tick: u64,
    pub boids: Vec<RenderedBoid>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // Shared handle to the most recently completed frame
    pub fn handle(&self) -> Arc<Mutex<RenderFrame>> {
        Arc::clone(&self.latest)
    }
}

impl<V: Vector> RenderSink<V> for FrameBuffer {
    fn render(&mut self, id: BoidId, position: V, velocity: V) {
        self.pending.push(RenderedBoid {
            id,
            position: position.to_vec3(),
            velocity: velocity.to_vec3(),
        });
    }

    fn frame_complete(&mut self, tick: u64) {
        // A poisoned lock only means a reader panicked; the frame data is still replaceable
        let mut frame = match self.latest.lock() {
            Ok(frame) => frame,
            Err(poisoned) => poisoned.into_inner(),
        };
        frame.tick = tick;
        std::mem::swap(&mut frame.boids, &mut self.pending);
        self.pending.clear();
    }
}
