/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * plus, under the recenter policy, a weak pull toward a shared target.
 *
 * A boid only ever reads its neighbors through `Neighbor` snapshots taken
 * before the tick, so a tick behaves as if every boid moved at once.
 */

use std::fmt;

use crate::params::SimulationParams;
use crate::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlockId(pub u32);

/// Stable identity used to correlate a boid with its visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoidId {
    pub flock: FlockId,
    pub serial: u32,
}

impl fmt::Display for BoidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flock-{}-boid-{}", self.flock.0, self.serial)
    }
}

// Pre-tick state of a boid as seen by the others
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<V> {
    pub position: V,
    pub velocity: V,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringForces<V> {
    pub separation: V,
    pub alignment: V,
    pub cohesion: V,
    /// Only present when the flock uses the recenter policy.
    pub recenter: Option<V>,
}

impl<V: Vector> SteeringForces<V> {
    // Weighted sum of all rule outputs
    pub fn blend(&self, params: &SimulationParams) -> V {
        let mut combined = self.separation * params.separation_weight
            + self.alignment * params.alignment_weight
            + self.cohesion * params.cohesion_weight;

        if let (Some(recenter), Some(weight)) = (self.recenter, params.boundary.recenter_weight()) {
            combined += recenter * weight;
        }

        combined
    }
}

#[derive(Debug, Clone)]
pub struct Boid<V> {
    id: BoidId,
    position: V,
    velocity: V,
    acceleration: V,
    max_speed: f32,
    max_force: f32,
}

impl<V: Vector> Boid<V> {
    pub fn new(id: BoidId, position: V, velocity: V, max_speed: f32, max_force: f32) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: V::ZERO,
            max_speed,
            max_force,
        }
    }

    pub fn id(&self) -> BoidId {
        self.id
    }

    pub fn position(&self) -> V {
        self.position
    }

    pub fn velocity(&self) -> V {
        self.velocity
    }

    pub fn acceleration(&self) -> V {
        self.acceleration
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    pub fn snapshot(&self) -> Neighbor<V> {
        Neighbor {
            position: self.position,
            velocity: self.velocity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: V) {
        self.acceleration += force;
    }

    // Accelerate, clamp speed, move, then reset the accumulator. The order is fixed.
    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = V::ZERO;
    }

    // Reynolds steering: desired velocity along `direction` at full speed, minus current velocity
    fn steer(&self, direction: V) -> V {
        (direction.normalize_or_zero() * self.max_speed - self.velocity).limit(self.max_force)
    }

    /// Steering force toward `target`, bounded by `max_force`.
    pub fn seek(&self, target: V) -> V {
        self.steer(target - self.position)
    }

    /// Evaluate every rule against `neighbors` in a single pass.
    ///
    /// `neighbors` may include this boid; entries at distance zero are
    /// skipped, which also makes exactly coincident boids ignore each other.
    pub fn compute_forces(
        &self,
        neighbors: &[Neighbor<V>],
        params: &SimulationParams,
        target: Option<V>,
    ) -> SteeringForces<V> {
        let sep_radius_sq = params.separation_radius * params.separation_radius;
        let align_radius_sq = params.alignment_radius * params.alignment_radius;
        let cohesion_radius_sq = params.cohesion_radius * params.cohesion_radius;

        let mut separation = V::ZERO;
        let mut alignment = V::ZERO;
        let mut cohesion = V::ZERO;
        let mut sep_count = 0usize;
        let mut align_count = 0usize;
        let mut cohesion_count = 0usize;

        for other in neighbors {
            let d_squared = self.position.distance_squared(other.position);
            if !(d_squared > 0.0) {
                continue;
            }

            if d_squared < cohesion_radius_sq {
                cohesion += other.position;
                cohesion_count += 1;
            }

            if d_squared < align_radius_sq {
                alignment += other.velocity;
                align_count += 1;
            }

            if d_squared < sep_radius_sq {
                // Closer neighbors push harder: unit vector away, divided by distance
                let d = d_squared.sqrt();
                separation += (self.position - other.position).normalize_or_zero() / d;
                sep_count += 1;
            }
        }

        let cohesion = if cohesion_count > 0 {
            self.seek(cohesion / cohesion_count as f32)
        } else {
            V::ZERO
        };

        let alignment = if align_count > 0 {
            self.steer(alignment / align_count as f32)
        } else {
            V::ZERO
        };

        // Opposing pushes can cancel out exactly; then there is nothing to steer along
        let separation = if separation.length_squared() > 0.0 {
            self.steer(separation / sep_count as f32)
        } else {
            V::ZERO
        };

        SteeringForces {
            separation,
            alignment,
            cohesion,
            recenter: target.map(|t| t - self.position),
        }
    }

    // Accumulate the weighted rule outputs into the acceleration
    pub fn flock(&mut self, neighbors: &[Neighbor<V>], params: &SimulationParams, target: Option<V>) {
        let forces = self.compute_forces(neighbors, params, target);
        self.apply_force(forces.blend(params));
    }

    /// One full tick for this boid: steer, integrate, then apply the boundary policy.
    pub fn step(&mut self, neighbors: &[Neighbor<V>], params: &SimulationParams, target: Option<V>) {
        self.flock(neighbors, params, target);
        self.update();
        params.boundary.confine(&mut self.position, &params.bounds);
    }
}
