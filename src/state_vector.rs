use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::KM2M;

/// Position and velocity of a body at one instant, in SI units
/// (meters, meters per second). The two vectors are always produced
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }

    /// Build a state from kernel-store units (km, km/s).
    pub fn from_km(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector {
            position: position * KM2M,
            velocity: velocity * KM2M,
        }
    }
}
