/*
 * Error Module
 *
 * Failure modes of the flocking engine. The steering math itself is total;
 * errors come from bad configuration, non-finite inputs handed in by a
 * collaborator, or a simulation that has been corrupted by NaN/Inf.
 */

use thiserror::Error;

use crate::boid::BoidId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    /// A simulation parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A position, velocity or target supplied from outside is NaN or infinite.
    #[error("{what} must be a finite vector")]
    NonFiniteInput { what: &'static str },
    /// A boid's state stopped being finite after integration.
    #[error("boid {id} left finite space on tick {tick}")]
    NonFiniteState { id: BoidId, tick: u64 },
}
