/*
 * Renderer Module
 *
 * This module draws the latest frame published by the flock's FrameBuffer
 * sink. Boids are projected onto the x/y plane; depth only changes their
 * size. It also hosts the presentation helpers a scene-graph renderer needs:
 * the categorical colour palette and the velocity-to-rotation convention.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::sink::RenderedBoid;
use crate::ui;
use crate::BOID_SIZE;

// Categorical palette, cycled by boid serial
const PALETTE: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

pub fn palette_colour(index: usize) -> Rgb<u8> {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    rgb(r, g, b)
}

/// Scene-graph rotation of a cone whose axis is +y, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation about x.
    pub pitch: f32,
    /// Rotation about z.
    pub yaw: f32,
}

pub fn orientation(velocity: Vec3) -> Orientation {
    let pitch = velocity.z.atan2(velocity.y);
    let yaw = -velocity.x.atan2((velocity.y * velocity.y + velocity.z * velocity.z).sqrt());
    Orientation {
        pitch: pitch.to_degrees(),
        yaw: yaw.to_degrees(),
    }
}

// Draw a triangle rotated in the direction of velocity
pub fn draw_boid(draw: &Draw, camera: &Camera, window_rect: Rect, boid: &RenderedBoid, depth: f32) {
    let screen_pos = camera.world_to_screen(boid.position.truncate(), window_rect);
    let angle = boid.velocity.y.atan2(boid.velocity.x);

    // Nearer boids (larger z) are drawn larger
    let depth_factor = if depth > 0.0 {
        0.6 + 0.8 * (boid.position.z / depth).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let size = BOID_SIZE * depth_factor * camera.zoom.sqrt();

    let points = [
        pt2(size, 0.0),
        pt2(-size, size / 2.0),
        pt2(-size, -size / 2.0),
    ];

    draw.polygon()
        .color(palette_colour(boid.id.serial as usize))
        .points(points)
        .xy(screen_pos)
        .rotate(angle);
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let params = model.scene.params();
    let bounds = params.bounds;

    // Outline of the simulation volume
    let corner_a = model.camera.world_to_screen(vec2(0.0, 0.0), window_rect);
    let corner_b = model.camera.world_to_screen(vec2(bounds.width, bounds.height), window_rect);
    let world_rect = Rect::from_corners(corner_a, corner_b);
    draw.rect()
        .xy(world_rect.xy())
        .wh(world_rect.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    // Recenter target
    if let Some(target) = model.scene.recenter_target() {
        let screen = model.camera.world_to_screen(target.truncate(), window_rect);
        draw.ellipse()
            .xy(screen)
            .radius(4.0)
            .no_fill()
            .stroke(WHITE)
            .stroke_weight(1.0);
    }

    let rendered = match model.frame.lock() {
        Ok(frame) => frame.boids.clone(),
        Err(poisoned) => poisoned.into_inner().boids.clone(),
    };

    for boid in &rendered {
        draw_boid(&draw, &model.camera, window_rect, boid, bounds.depth);
    }

    if params.show_debug {
        if let Some(first) = rendered.first() {
            let screen_pos = model.camera.world_to_screen(first.position.truncate(), window_rect);

            // Perception radii of the first boid
            for (radius, colour) in [
                (params.separation_radius, RED),
                (params.alignment_radius, GREEN),
                (params.cohesion_radius, BLUE),
            ] {
                draw.ellipse()
                    .xy(screen_pos)
                    .radius(model.camera.to_pixels(radius))
                    .no_fill()
                    .stroke(colour)
                    .stroke_weight(1.0);
            }

            let velocity_tip = first.position.truncate() + first.velocity.truncate() * 5.0;
            draw.arrow()
                .start(screen_pos)
                .end(model.camera.world_to_screen(velocity_tip, window_rect))
                .color(YELLOW)
                .stroke_weight(2.0);
        }

        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::warn!(?err, "Failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::warn!(?err, "Failed to draw UI");
    }
}
