/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation state to be displayed in the UI.
 */

use std::time::Duration;

use crate::renderer::Orientation;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick: u64,
    pub boid_count: usize,
    pub chunk_size: usize,
    pub mean_speed: f32,
    pub first_boid: Option<String>,
    pub first_orientation: Option<Orientation>,
}

impl DebugInfo {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Tick: {}", self.tick),
            format!("Boids: {}", self.boid_count),
            format!("Chunk size: {}", self.chunk_size),
            format!("Mean speed: {:.3}", self.mean_speed),
        ];
        if let (Some(name), Some(o)) = (&self.first_boid, self.first_orientation) {
            lines.push(format!("{}: pitch {:.1}° yaw {:.1}°", name, o.pitch, o.yaw));
        }
        lines
    }
}
