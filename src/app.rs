/*
 * Application Module
 *
 * This module defines the nannou application model for the interactive
 * front end. The model owns one flock (planar or volumetric), drives it one
 * tick per frame and reads positions back through a FrameBuffer sink.
 */

use std::sync::{Arc, Mutex};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::boid::BoidId;
use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::error::FlockError;
use crate::flock::Flock;
use crate::input;
use crate::params::SimulationParams;
use crate::physics;
use crate::renderer::{self, orientation};
use crate::sink::{FrameBuffer, RenderFrame};
use crate::ui;
use crate::vector::Vector;

// The flock being simulated, in either dimensionality
pub enum Scene {
    Planar(Flock<Vec2>),
    Volume(Flock<Vec3>),
}

impl Scene {
    // Build a flock with a FrameBuffer sink attached; returns the frame handle as well
    pub fn new(params: SimulationParams, volumetric: bool) -> Result<(Self, Arc<Mutex<RenderFrame>>), FlockError> {
        let buffer = FrameBuffer::new();
        let frame = buffer.handle();
        let scene = if volumetric {
            let mut flock = Flock::<Vec3>::new(params)?;
            flock.add_sink(Box::new(buffer));
            Scene::Volume(flock)
        } else {
            let mut flock = Flock::<Vec2>::new(params)?;
            flock.add_sink(Box::new(buffer));
            Scene::Planar(flock)
        };
        Ok((scene, frame))
    }

    pub fn is_volume(&self) -> bool {
        matches!(self, Scene::Volume(_))
    }

    pub fn params(&self) -> &SimulationParams {
        match self {
            Scene::Planar(flock) => flock.params(),
            Scene::Volume(flock) => flock.params(),
        }
    }

    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), FlockError> {
        match self {
            Scene::Planar(flock) => flock.set_params(params),
            Scene::Volume(flock) => flock.set_params(params),
        }
    }

    pub fn tick(&mut self) -> Result<(), FlockError> {
        match self {
            Scene::Planar(flock) => flock.tick(),
            Scene::Volume(flock) => flock.tick(),
        }
    }

    pub fn tick_count(&self) -> u64 {
        match self {
            Scene::Planar(flock) => flock.tick_count(),
            Scene::Volume(flock) => flock.tick_count(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Scene::Planar(flock) => flock.len(),
            Scene::Volume(flock) => flock.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mean_speed(&self) -> f32 {
        match self {
            Scene::Planar(flock) => flock.mean_speed(),
            Scene::Volume(flock) => flock.mean_speed(),
        }
    }

    // Identity and velocity of the first boid, widened to 3-D
    pub fn first_boid(&self) -> Option<(BoidId, Vec3)> {
        match self {
            Scene::Planar(flock) => flock.boids().first().map(|b| (b.id(), b.velocity().to_vec3())),
            Scene::Volume(flock) => flock.boids().first().map(|b| (b.id(), b.velocity())),
        }
    }

    // Spawn on the x/y plane; volumetric boids start mid-depth
    pub fn spawn_at(&mut self, world: Vec2) -> Result<BoidId, FlockError> {
        match self {
            Scene::Planar(flock) => flock.spawn(world),
            Scene::Volume(flock) => {
                let depth = flock.params().bounds.depth;
                flock.spawn(world.extend(depth / 2.0))
            }
        }
    }

    // Move the recenter target on the x/y plane, keeping its depth
    pub fn steer_target(&mut self, world: Vec2) -> Result<(), FlockError> {
        match self {
            Scene::Planar(flock) => flock.set_target(world),
            Scene::Volume(flock) => {
                let z = flock.target().z;
                flock.set_target(world.extend(z))
            }
        }
    }

    pub fn recenter_target(&self) -> Option<Vec3> {
        self.params().boundary.recenter_weight()?;
        match self {
            Scene::Planar(flock) => Some(flock.target().to_vec3()),
            Scene::Volume(flock) => Some(flock.target()),
        }
    }
}

// Main model for the application
pub struct Model {
    pub scene: Scene,
    pub frame: Arc<Mutex<RenderFrame>>,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
}

type PendingScene = (Scene, Arc<Mutex<RenderFrame>>);

// `nannou::app` only accepts a plain `fn(&App) -> Model`, which cannot capture
// the scene the CLI built. This slot holds it from `run` until `model` takes
// it on startup; it is empty for the rest of the run.
static PENDING_SCENE: Mutex<Option<PendingScene>> = Mutex::new(None);

fn stash_scene(scene: PendingScene) {
    match PENDING_SCENE.lock() {
        Ok(mut pending) => *pending = Some(scene),
        Err(poisoned) => *poisoned.into_inner() = Some(scene),
    }
}

fn take_scene() -> Option<PendingScene> {
    match PENDING_SCENE.lock() {
        Ok(mut pending) => pending.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

// Open the window and run `scene` until the window closes
pub fn run(scene: Scene, frame: Arc<Mutex<RenderFrame>>) {
    stash_scene((scene, frame));
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    let window_id = app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window closed during startup");
    let egui = Egui::from_window(&window);

    let (scene, frame) = match take_scene() {
        Some(built) => built,
        None => Scene::new(SimulationParams::planar(), false).expect("Default parameters are valid"),
    };

    let camera = Camera::fit(scene.params(), window.rect());
    info!(boids = scene.len(), volumetric = scene.is_volume(), "Opened simulation window");

    Model {
        scene,
        frame,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vec2::ZERO,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let mut edited = model.scene.params().clone();
    let response = ui::update_ui(&mut model.egui, &mut edited, &model.debug_info);

    if response.reset_requested {
        match Scene::new(edited, model.scene.is_volume()) {
            Ok((scene, frame)) => {
                model.scene = scene;
                model.frame = frame;
            }
            Err(err) => warn!(%err, "Could not reset flock"),
        }
    } else if response.params_changed {
        if let Err(err) = model.scene.set_params(edited) {
            warn!(%err, "Rejected parameter change");
        }
    }

    if !model.scene.params().pause_simulation {
        if let Err(err) = model.scene.tick() {
            error!(%err, "Simulation corrupted, stopping");
            app.quit();
            return;
        }
    }

    model.debug_info.tick = model.scene.tick_count();
    model.debug_info.boid_count = model.scene.len();
    model.debug_info.chunk_size = physics::chunk_size(model.scene.len());
    model.debug_info.mean_speed = model.scene.mean_speed();
    match model.scene.first_boid() {
        Some((id, velocity)) => {
            model.debug_info.first_boid = Some(id.to_string());
            model.debug_info.first_orientation = Some(orientation(velocity));
        }
        None => {
            model.debug_info.first_boid = None;
            model.debug_info.first_orientation = None;
        }
    }
}
