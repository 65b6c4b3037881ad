/*
 * Physics Module
 *
 * This module advances every boid by one tick.
 *
 * The neighbor scan is brute force, O(n^2) per tick. All boids read the
 * same pre-tick snapshot and write only to themselves, so the pass can be
 * split across threads with rayon and still give bit-identical results to
 * the sequential loop.
 */

use rayon::prelude::*;
use tracing::error;

use crate::boid::{Boid, Neighbor};
use crate::error::FlockError;
use crate::params::SimulationParams;
use crate::vector::Vector;

// Copy the pre-tick position and velocity of every boid
pub fn snapshot<V: Vector>(boids: &[Boid<V>]) -> Vec<Neighbor<V>> {
    boids.iter().map(Boid::snapshot).collect()
}

// Chunk size for the parallel pass, one chunk per worker thread
pub fn chunk_size(len: usize) -> usize {
    std::cmp::max(len / rayon::current_num_threads(), 1)
}

// Update boid positions and behaviors
pub fn update_boids<V: Vector>(
    boids: &mut [Boid<V>],
    params: &SimulationParams,
    target: Option<V>,
    tick: u64,
) -> Result<(), FlockError> {
    let neighbors = snapshot(boids);

    if params.enable_parallel {
        // Process boids in parallel chunks to reduce synchronization overhead
        boids
            .par_chunks_mut(chunk_size(neighbors.len()))
            .for_each(|boid_chunk| {
                for boid in boid_chunk {
                    boid.step(&neighbors, params, target);
                }
            });
    } else {
        for boid in boids.iter_mut() {
            boid.step(&neighbors, params, target);
        }
    }

    // Any NaN or infinity means the simulation is corrupted
    if let Some(boid) = boids.iter().find(|boid| !boid.is_finite()) {
        error!(
            id = %boid.id(),
            tick,
            position = ?boid.position(),
            velocity = ?boid.velocity(),
            "boid state is no longer finite",
        );
        return Err(FlockError::NonFiniteState { id: boid.id(), tick });
    }

    Ok(())
}
