/*
 * Input Module
 *
 * This module handles user input events for the simulation window.
 * The pointer is the "tracked input" of the flock:
 * - Moving it drags the recenter target along
 * - Left click spawns a boid under the cursor
 * - Right drag pans the camera, the wheel zooms
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};
use tracing::{debug, warn};

use crate::app::Model;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if model.camera.is_dragging {
        model.camera.drag(pos);
    }
    model.mouse_position = pos;

    if model.scene.recenter_target().is_some() && !model.egui.ctx().is_pointer_over_area() {
        let world = model.camera.screen_to_world(pos, app.window_rect());
        if let Err(err) = model.scene.steer_target(world) {
            warn!(%err, "Ignored pointer target");
        }
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match button {
        MouseButton::Left => {
            let world = model.camera.screen_to_world(model.mouse_position, app.window_rect());
            match model.scene.spawn_at(world) {
                Ok(id) => debug!(%id, "Spawned boid from pointer"),
                Err(err) => warn!(%err, "Could not spawn boid"),
            }
        }
        MouseButton::Right => model.camera.start_drag(model.mouse_position),
        _ => {}
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Right {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let window_rect = app.window_rect();
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y), model.mouse_position, window_rect);
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model.camera.zoom(vec2(pos.x as f32, pos.y as f32) * 0.01, model.mouse_position, window_rect);
        }
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
