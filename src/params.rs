/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * tunables of a flock: rule weights and neighbor radii, per-boid speed and
 * force limits, the simulation volume, the spawn recipe and the boundary
 * policy. The two presets reproduce the planar wrap-around flock and the
 * volumetric recentring flock; every other variant is a different table.
 *
 * Radii are in world units. Neighbor tests compare squared distances
 * against squared radii.
 */

use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::boundary::{BoundaryPolicy, Bounds};
use crate::error::FlockError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub bounds: Bounds,
    pub spawn_position: [f32; 3],
    // Each velocity component of a new boid is uniform in [-range, range]
    pub spawn_velocity_range: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub boundary: BoundaryPolicy,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    pub enable_parallel: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::planar()
    }
}

impl SimulationParams {
    // Planar flock that wraps around the edges of a 640x360 area
    pub fn planar() -> Self {
        let bounds = Bounds::new(640.0, 360.0, 0.0);
        Self {
            num_boids: 150,
            bounds,
            spawn_position: bounds.center(),
            spawn_velocity_range: 1.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_radius: 25.0,
            alignment_radius: 50.0,
            cohesion_radius: 50.0,
            max_speed: 3.0,
            max_force: 0.05,
            boundary: BoundaryPolicy::Wrap { radius: 3.0 },
            rng_seed: None,
            enable_parallel: true,
            show_debug: false,
            pause_simulation: false,
        }
    }

    // Volumetric flock released from the origin and softly pulled back toward a target
    pub fn volume() -> Self {
        Self {
            num_boids: 500,
            bounds: Bounds::new(5.0, 5.0, 5.0),
            spawn_position: [0.0, 0.0, 0.0],
            spawn_velocity_range: 0.01,
            separation_weight: 0.0107,
            alignment_weight: 0.0002,
            cohesion_weight: 0.0105,
            separation_radius: 15.0,
            alignment_radius: 250.0_f32.sqrt(),
            cohesion_radius: 5.0,
            max_speed: 3.0,
            max_force: 0.5,
            boundary: BoundaryPolicy::Recenter { weight: 0.0005 },
            rng_seed: None,
            enable_parallel: true,
            show_debug: false,
            pause_simulation: false,
        }
    }

    pub fn validate(&self) -> Result<(), FlockError> {
        let Bounds { width, height, depth } = self.bounds;
        if !(width > 0.0 && height > 0.0 && depth >= 0.0)
            || !(width.is_finite() && height.is_finite() && depth.is_finite())
        {
            return Err(FlockError::InvalidConfig(
                "bounds must be finite, width and height positive, depth non-negative",
            ));
        }
        if self.spawn_position.iter().any(|c| !c.is_finite()) {
            return Err(FlockError::InvalidConfig("spawn_position must be finite"));
        }
        if !(self.spawn_velocity_range >= 0.0 && self.spawn_velocity_range.is_finite()) {
            return Err(FlockError::InvalidConfig(
                "spawn_velocity_range must be finite and non-negative",
            ));
        }
        if [
            self.separation_weight,
            self.alignment_weight,
            self.cohesion_weight,
        ]
        .iter()
        .any(|w| !w.is_finite())
        {
            return Err(FlockError::InvalidConfig("rule weights must be finite"));
        }
        if [
            self.separation_radius,
            self.alignment_radius,
            self.cohesion_radius,
        ]
        .iter()
        .any(|r| !(*r >= 0.0 && r.is_finite()))
        {
            return Err(FlockError::InvalidConfig(
                "neighbor radii must be finite and non-negative",
            ));
        }
        if !(self.max_speed > 0.0 && self.max_speed.is_finite()) {
            return Err(FlockError::InvalidConfig("max_speed must be positive"));
        }
        if !(self.max_force >= 0.0 && self.max_force.is_finite()) {
            return Err(FlockError::InvalidConfig("max_force must be non-negative"));
        }
        match self.boundary {
            BoundaryPolicy::Wrap { radius } if !(radius >= 0.0 && radius.is_finite()) => {
                Err(FlockError::InvalidConfig("wrap radius must be non-negative"))
            }
            BoundaryPolicy::Recenter { weight } if !weight.is_finite() => {
                Err(FlockError::InvalidConfig("recenter weight must be finite"))
            }
            _ => Ok(()),
        }
    }

    /// Returns the configured RNG seed, generating one from entropy if absent.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }

    // Ranges for UI sliders
    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    // Wide enough for half the volume and for every configured radius
    pub fn get_radius_range(&self) -> std::ops::RangeInclusive<f32> {
        let largest = self.bounds.width.max(self.bounds.height).max(self.bounds.depth);
        let upper = (largest / 2.0)
            .max(self.separation_radius)
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
            .max(1.0);
        0.0..=upper
    }

    pub fn get_max_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.1..=10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert_eq!(SimulationParams::planar().validate(), Ok(()));
        assert_eq!(SimulationParams::volume().validate(), Ok(()));
        assert_eq!(SimulationParams::default(), SimulationParams::planar());
    }

    #[test]
    fn rejects_bad_values() {
        let mut params = SimulationParams::planar();
        params.max_speed = 0.0;
        assert!(matches!(params.validate(), Err(FlockError::InvalidConfig(_))));

        let mut params = SimulationParams::planar();
        params.bounds.width = -1.0;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::planar();
        params.cohesion_radius = f32::NAN;
        assert!(params.validate().is_err());

        let mut params = SimulationParams::planar();
        params.boundary = BoundaryPolicy::Wrap { radius: -1.0 };
        assert!(params.validate().is_err());

        let mut params = SimulationParams::volume();
        params.spawn_velocity_range = -0.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn preset_values_fit_their_slider_ranges() {
        for params in [SimulationParams::planar(), SimulationParams::volume()] {
            let radii = params.get_radius_range();
            assert!(radii.contains(&params.separation_radius));
            assert!(radii.contains(&params.alignment_radius));
            assert!(radii.contains(&params.cohesion_radius));
            assert!(SimulationParams::get_weight_range().contains(&params.separation_weight));
            assert!(SimulationParams::get_max_force_range().contains(&params.max_force));
            assert!(SimulationParams::get_max_speed_range().contains(&params.max_speed));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;
        let params = SimulationParams {
            rng_seed: Some(42),
            ..SimulationParams::volume()
        };
        let a: u64 = params.seeded_rng().gen();
        let b: u64 = params.seeded_rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn json_fills_missing_fields_from_defaults() {
        let params: SimulationParams = serde_json::from_str(
            r#"{ "num_boids": 12, "boundary": { "kind": "recenter", "weight": 0.001 } }"#,
        )
        .expect("parse params");
        assert_eq!(params.num_boids, 12);
        assert_eq!(params.boundary, BoundaryPolicy::Recenter { weight: 0.001 });
        assert_eq!(params.separation_weight, SimulationParams::planar().separation_weight);
    }
}
