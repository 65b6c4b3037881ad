/*
 * Boundary Module
 *
 * Defines the simulation volume and the policy that keeps the flock inside
 * it. A configuration selects exactly one policy:
 * - Open: no boundary handling, steering weights alone hold the flock together
 * - Wrap: per-axis wrap-around just outside the volume
 * - Recenter: a weak pull toward a shared, externally movable target
 */

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

// Extents of the simulation volume, starting at the origin on every axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> f32 {
        match axis {
            0 => self.width,
            1 => self.height,
            _ => self.depth,
        }
    }

    pub fn center(&self) -> [f32; 3] {
        [self.width / 2.0, self.height / 2.0, self.depth / 2.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    Open,
    /// Relocate to the opposite side once a boid is more than `radius`
    /// outside the volume.
    Wrap { radius: f32 },
    /// Add `weight * (target - position)` to every boid's acceleration.
    Recenter { weight: f32 },
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        BoundaryPolicy::Wrap { radius: 3.0 }
    }
}

impl BoundaryPolicy {
    pub fn recenter_weight(&self) -> Option<f32> {
        match *self {
            BoundaryPolicy::Recenter { weight } => Some(weight),
            _ => None,
        }
    }

    // Apply the positional part of the policy after integration
    pub fn confine<V: Vector>(&self, position: &mut V, bounds: &Bounds) {
        if let BoundaryPolicy::Wrap { radius } = *self {
            wrap_edges(position, bounds, radius);
        }
    }
}

// Wrap each axis independently around [-radius, extent + radius]
pub fn wrap_edges<V: Vector>(position: &mut V, bounds: &Bounds, radius: f32) {
    for axis in 0..V::DIMS {
        let extent = bounds.extent(axis);
        let value = position.axis(axis);

        if value < -radius {
            position.set_axis(axis, extent + radius);
        } else if value > extent + radius {
            position.set_axis(axis, -radius);
        }
    }
}
