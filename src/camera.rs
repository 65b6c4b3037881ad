/*
 * Camera Module
 *
 * This module defines the Camera struct that handles zooming and panning
 * over the x/y plane of the flock. World units are scaled so that the whole
 * simulation volume fits the window at zoom 1.0, which matters for the small
 * 5-unit volumetric flock as much as for the 640-unit planar one.
 */

use nannou::prelude::*;

use crate::boundary::BoundaryPolicy;
use crate::params::SimulationParams;

pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    // Pixels per world unit at zoom 1.0
    pub base_scale: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    // Fit the volume into the window with a margin. A recentring flock is
    // framed around its spawn point, where it starts and is pulled back to.
    pub fn fit(params: &SimulationParams, window_rect: Rect) -> Self {
        let bounds = &params.bounds;
        let margin = 0.8;
        let base_scale = (window_rect.w() / bounds.width).min(window_rect.h() / bounds.height) * margin;
        let position = match params.boundary {
            BoundaryPolicy::Recenter { .. } => vec2(params.spawn_position[0], params.spawn_position[1]),
            _ => vec2(bounds.width / 2.0, bounds.height / 2.0),
        };
        Self {
            position,
            zoom: 1.0,
            base_scale,
            min_zoom: 0.05,
            max_zoom: 20.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    fn scale(&self) -> f32 {
        self.base_scale * self.zoom
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - self.position) * self.scale() + window_rect.xy()
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        (point - window_rect.xy()) / self.scale() + self.position
    }

    // World length to pixels
    pub fn to_pixels(&self, length: f32) -> f32 {
        length * self.scale()
    }

    // Zoom around the cursor so the world point under it stays put
    pub fn zoom(&mut self, scroll_delta: Vec2, cursor_position: Vec2, window_rect: Rect) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;
        let cursor_world_before = self.screen_to_world(cursor_position, window_rect);
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
        let cursor_world_after = self.screen_to_world(cursor_position, window_rect);
        self.position += cursor_world_before - cursor_world_after;
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;
            if delta.length_squared() > 0.0 {
                self.position -= delta / self.scale();
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}
