/*
 * Flock Module
 *
 * A Flock owns its boids, the shared simulation parameters and the target
 * used by the recenter policy. It is the simulation context: created once per
 * run and driven by the caller's tick loop.
 *
 * Boids are only ever appended; serials are handed out in insertion order.
 */

use std::sync::atomic::{AtomicU32, Ordering};

use rand::rngs::SmallRng;
use tracing::{debug, info, trace};

use crate::boid::{Boid, BoidId, FlockId};
use crate::error::FlockError;
use crate::params::SimulationParams;
use crate::physics;
use crate::sink::RenderSink;
use crate::vector::Vector;

static NEXT_FLOCK_ID: AtomicU32 = AtomicU32::new(0);

pub struct Flock<V: Vector> {
    id: FlockId,
    boids: Vec<Boid<V>>,
    params: SimulationParams,
    target: V,
    rng: SmallRng,
    tick: u64,
    next_serial: u32,
    sinks: Vec<Box<dyn RenderSink<V>>>,
}

impl<V: Vector> Flock<V> {
    /// Validate `params` and spawn `params.num_boids` boids at the spawn position.
    pub fn new(params: SimulationParams) -> Result<Self, FlockError> {
        params.validate()?;

        let spawn_position = V::from_array3(params.spawn_position);
        let rng = params.seeded_rng();
        let mut flock = Self {
            id: FlockId(NEXT_FLOCK_ID.fetch_add(1, Ordering::Relaxed)),
            boids: Vec::with_capacity(params.num_boids),
            target: spawn_position,
            params,
            rng,
            tick: 0,
            next_serial: 0,
            sinks: Vec::new(),
        };

        for _ in 0..flock.params.num_boids {
            flock.spawn(spawn_position)?;
        }

        info!(
            flock = flock.id.0,
            dims = V::DIMS,
            boids = flock.boids.len(),
            boundary = ?flock.params.boundary,
            "Created flock",
        );

        Ok(flock)
    }

    pub fn id(&self) -> FlockId {
        self.id
    }

    pub fn boids(&self) -> &[Boid<V>] {
        &self.boids
    }

    pub fn get(&self, id: BoidId) -> Option<&Boid<V>> {
        if id.flock != self.id {
            return None;
        }
        self.boids.get(id.serial as usize)
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Replace the shared parameters between ticks.
    ///
    /// Boids keep the speed and force limits they were spawned with; only
    /// boids spawned afterwards pick up new `max_speed`/`max_force` values.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), FlockError> {
        params.validate()?;
        debug!(flock = self.id.0, "Updated simulation parameters");
        self.params = params;
        Ok(())
    }

    pub fn target(&self) -> V {
        self.target
    }

    // Move the shared recenter target; accepted at any tick boundary
    pub fn set_target(&mut self, target: V) -> Result<(), FlockError> {
        if !target.is_finite() {
            return Err(FlockError::NonFiniteInput { what: "target" });
        }
        self.target = target;
        Ok(())
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn add_sink(&mut self, sink: Box<dyn RenderSink<V>>) {
        self.sinks.push(sink);
    }

    /// Append a boid at `position` with a small random initial velocity.
    pub fn spawn(&mut self, position: V) -> Result<BoidId, FlockError> {
        let velocity = V::random_in(&mut self.rng, self.params.spawn_velocity_range);
        self.spawn_with_velocity(position, velocity)
    }

    pub fn spawn_with_velocity(&mut self, position: V, velocity: V) -> Result<BoidId, FlockError> {
        if !position.is_finite() {
            return Err(FlockError::NonFiniteInput { what: "spawn position" });
        }
        if !velocity.is_finite() {
            return Err(FlockError::NonFiniteInput { what: "spawn velocity" });
        }

        let id = BoidId {
            flock: self.id,
            serial: self.next_serial,
        };
        self.next_serial += 1;

        self.boids.push(Boid::new(
            id,
            position,
            velocity,
            self.params.max_speed,
            self.params.max_force,
        ));
        debug!(%id, position = ?position, velocity = ?velocity, "Spawned boid");

        Ok(id)
    }

    /// Advance every boid by one simultaneous step, then notify the sinks.
    ///
    /// On `FlockError::NonFiniteState` the flock is corrupted; sinks are not
    /// notified and the tick counter does not advance.
    pub fn tick(&mut self) -> Result<(), FlockError> {
        let tick = self.tick + 1;
        let target = self.params.boundary.recenter_weight().map(|_| self.target);

        physics::update_boids(&mut self.boids, &self.params, target, tick)?;
        self.tick = tick;
        trace!(flock = self.id.0, tick, boids = self.boids.len(), "Tick complete");

        for sink in &mut self.sinks {
            for boid in &self.boids {
                sink.render(boid.id(), boid.position(), boid.velocity());
            }
            sink.frame_complete(tick);
        }

        Ok(())
    }

    // Average position of all boids, zero for an empty flock
    pub fn centroid(&self) -> V {
        if self.boids.is_empty() {
            return V::ZERO;
        }
        let mut sum = V::ZERO;
        for boid in &self.boids {
            sum += boid.position();
        }
        sum / self.boids.len() as f32
    }

    pub fn mean_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let total: f32 = self.boids.iter().map(|b| b.velocity().length()).sum();
        total / self.boids.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryPolicy;
    use crate::sink::FrameBuffer;
    use nannou::prelude::{Vec2, Vec3};

    fn seeded(mut params: SimulationParams, seed: u64) -> SimulationParams {
        params.rng_seed = Some(seed);
        params
    }

    #[test]
    fn new_spawns_configured_population_at_spawn_point() {
        let flock = Flock::<Vec3>::new(seeded(SimulationParams::volume(), 1)).unwrap();
        assert_eq!(flock.len(), 500);
        assert!(flock.boids().iter().all(|b| b.position() == Vec3::ZERO));
        assert!(flock
            .boids()
            .iter()
            .all(|b| (0..3).all(|i| b.velocity().axis(i).abs() <= 0.01)));
        assert_eq!(flock.target(), Vec3::ZERO);
    }

    #[test]
    fn serials_follow_insertion_order() {
        let mut params = seeded(SimulationParams::planar(), 2);
        params.num_boids = 3;
        let mut flock = Flock::<Vec2>::new(params).unwrap();
        let id = flock.spawn(Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(id.serial, 3);
        assert_eq!(id.flock, flock.id());
        assert_eq!(flock.get(id).map(|b| b.position()), Some(Vec2::new(1.0, 1.0)));
        let serials: Vec<u32> = flock.boids().iter().map(|b| b.id().serial).collect();
        assert_eq!(serials, vec![0, 1, 2, 3]);
    }

    #[test]
    fn spawn_leaves_other_boids_untouched() {
        let mut params = seeded(SimulationParams::planar(), 3);
        params.num_boids = 5;
        let mut flock = Flock::<Vec2>::new(params).unwrap();
        let before: Vec<_> = flock.boids().iter().map(|b| b.snapshot()).collect();
        flock.spawn(Vec2::new(10.0, 10.0)).unwrap();
        let after: Vec<_> = flock.boids()[..5].iter().map(|b| b.snapshot()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rejects_non_finite_inputs() {
        let mut params = SimulationParams::volume();
        params.num_boids = 0;
        let mut flock = Flock::<Vec3>::new(params).unwrap();
        assert_eq!(
            flock.set_target(Vec3::new(f32::NAN, 0.0, 0.0)),
            Err(FlockError::NonFiniteInput { what: "target" })
        );
        assert!(flock.spawn(Vec3::new(0.0, f32::INFINITY, 0.0)).is_err());
        assert!(flock.is_empty());
    }

    #[test]
    fn invalid_params_are_rejected_up_front() {
        let mut params = SimulationParams::planar();
        params.max_force = -1.0;
        assert!(Flock::<Vec2>::new(params.clone()).is_err());

        let mut flock = Flock::<Vec2>::new(SimulationParams::planar()).unwrap();
        assert!(flock.set_params(params).is_err());
        assert_eq!(flock.params().max_force, 0.05);
    }

    #[test]
    fn sinks_receive_every_boid_after_each_tick() {
        let mut params = seeded(SimulationParams::planar(), 4);
        params.num_boids = 10;
        let mut flock = Flock::<Vec2>::new(params).unwrap();
        let buffer = FrameBuffer::new();
        let frame = buffer.handle();
        flock.add_sink(Box::new(buffer));

        flock.tick().unwrap();
        flock.tick().unwrap();

        let frame = frame.lock().unwrap();
        assert_eq!(frame.tick, 2);
        assert_eq!(frame.boids.len(), 10);
        assert_eq!(frame.boids[3].id, flock.boids()[3].id());
        assert_eq!(frame.boids[3].position, flock.boids()[3].position().to_vec3());
        assert_eq!(flock.tick_count(), 2);
    }

    #[test]
    fn target_only_matters_under_recenter() {
        let mut params = seeded(SimulationParams::planar(), 5);
        params.num_boids = 0;
        params.boundary = BoundaryPolicy::Open;
        let mut flock = Flock::<Vec2>::new(params.clone()).unwrap();
        flock.spawn_with_velocity(Vec2::new(100.0, 100.0), Vec2::ZERO).unwrap();
        flock.set_target(Vec2::new(0.0, 0.0)).unwrap();
        flock.tick().unwrap();
        assert_eq!(flock.boids()[0].position(), Vec2::new(100.0, 100.0));

        params.boundary = BoundaryPolicy::Recenter { weight: 0.001 };
        flock.set_params(params).unwrap();
        flock.tick().unwrap();
        let moved = flock.boids()[0].position();
        assert!(moved.x < 100.0 && moved.y < 100.0);
    }

    #[test]
    fn centroid_and_mean_speed() {
        let mut params = SimulationParams::planar();
        params.num_boids = 0;
        let mut flock = Flock::<Vec2>::new(params).unwrap();
        assert_eq!(flock.centroid(), Vec2::ZERO);
        assert_eq!(flock.mean_speed(), 0.0);

        flock.spawn_with_velocity(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)).unwrap();
        flock.spawn_with_velocity(Vec2::new(4.0, 2.0), Vec2::new(0.0, 3.0)).unwrap();
        assert_eq!(flock.centroid(), Vec2::new(2.0, 1.0));
        assert_eq!(flock.mean_speed(), 2.0);
    }
}
