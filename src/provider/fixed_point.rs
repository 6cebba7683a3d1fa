use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::state_vector::StateVector;

/// Constant-point backing: the stored position and velocity are returned
/// for any epoch. Models a fixed reference point, not a moving body.
///
/// The payload is immutable after construction; all components default to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedPoint {
    position: Vector3<f64>,
    velocity: Vector3<f64>,
}

impl FixedPoint {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        FixedPoint { position, velocity }
    }

    /// Construct from six scalars: three position components [m] followed
    /// by three velocity components [m/s].
    pub fn from_components(r1: f64, r2: f64, r3: f64, v1: f64, v2: f64, v3: f64) -> Self {
        FixedPoint {
            position: Vector3::new(r1, r2, r3),
            velocity: Vector3::new(v1, v2, v3),
        }
    }

    /// The stored position and velocity (constant for any given time).
    pub fn state(&self) -> StateVector {
        StateVector::new(self.position, self.velocity)
    }
}
