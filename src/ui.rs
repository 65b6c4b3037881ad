/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. The panel edits a copy of the flock's parameters; the
 * caller hands the copy back to the flock only when something changed.
 */

use nannou_egui::{egui, Egui};

use crate::boundary::BoundaryPolicy;
use crate::debug::DebugInfo;
use crate::params::SimulationParams;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiResponse {
    pub params_changed: bool,
    pub reset_requested: bool,
}

// Update the UI; `params` is edited in place
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiResponse {
    let before = params.clone();
    let mut reset_requested = false;
    let radius_range = params.get_radius_range();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed (new boids)"));
                ui.add(egui::Slider::new(&mut params.max_force, SimulationParams::get_max_force_range()).text("Max Force (new boids)"));
                if ui.button("Reset Flock").clicked() {
                    reset_requested = true;
                }
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation_weight, SimulationParams::get_weight_range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::get_weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::get_weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.separation_radius, radius_range.clone()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.alignment_radius, radius_range.clone()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion_radius, radius_range).text("Cohesion Radius"));

                match &mut params.boundary {
                    BoundaryPolicy::Recenter { weight } => {
                        ui.add(egui::Slider::new(weight, 0.0..=0.01).text("Recenter Weight"));
                    }
                    BoundaryPolicy::Wrap { radius } => {
                        ui.add(egui::Slider::new(radius, 0.0..=50.0).text("Wrap Radius"));
                    }
                    BoundaryPolicy::Open => {
                        ui.label("Open boundary");
                    }
                }
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
                ui.separator();
                for line in debug_info.lines() {
                    ui.label(line);
                }
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
            ui.label("Move the mouse to steer the target, click to spawn a boid, right-drag to pan.");
        });

    UiResponse {
        params_changed: *params != before,
        reset_requested,
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines();
    let panel_width = 260.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 100.0, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
