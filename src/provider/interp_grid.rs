//! Sampled-grid backing.
//!
//! An [`InterpGrid`] caches `samples + 1` states of another provider over
//! an epoch range (both endpoints included) and evaluates by linear
//! interpolation between the two bracketing grid points. Once built, the
//! grid is self-contained: it serializes and evaluates without any kernel
//! being loaded, which makes it the persisted form of choice for
//! kernel-backed ephemerides.

use serde::{Deserialize, Serialize};

use crate::errors::EphemkitError;
use crate::kernel::registry::KernelRegistry;
use crate::provider::EphemerisProvider;
use crate::state_vector::StateVector;
use crate::time::Epoch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpGrid {
    start: Epoch,
    end: Epoch,
    states: Vec<StateVector>,
}

impl InterpGrid {
    /// Sample `provider` on a uniform grid over `[start, end]`.
    ///
    /// Arguments
    /// ---------
    /// * `provider`: the source of states to cache
    /// * `registry`: kernel registry, used when the source is kernel-backed
    /// * `start`, `end`: epoch range to cover (both endpoints sampled)
    /// * `samples`: number of grid intervals; `samples + 1` states are
    ///   stored. Values below 1 are treated as 1.
    ///
    /// Return
    /// ------
    /// * The populated grid, or the first evaluation failure of `provider`.
    pub fn sample(
        provider: &EphemerisProvider,
        registry: &mut KernelRegistry,
        start: impl Into<Epoch>,
        end: impl Into<Epoch>,
        samples: usize,
    ) -> Result<Self, EphemkitError> {
        let start = start.into();
        let end = end.into();
        let samples = samples.max(1);

        let step = (end.mjd2000() - start.mjd2000()) / samples as f64;
        let mut states = Vec::with_capacity(samples + 1);
        for i in 0..=samples {
            let epoch = Epoch::new(start.mjd2000() + step * i as f64);
            states.push(provider.evaluate(epoch, registry)?);
        }

        Ok(InterpGrid { start, end, states })
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn end(&self) -> Epoch {
        self.end
    }

    /// Linear interpolation between the two grid points bracketing
    /// `epoch`. Epochs outside `[start, end]` fail with
    /// [`EphemkitError::EpochOutOfRange`].
    pub fn evaluate(&self, epoch: Epoch) -> Result<StateVector, EphemkitError> {
        let days = epoch.mjd2000();
        if days < self.start.mjd2000() || days > self.end.mjd2000() {
            return Err(EphemkitError::EpochOutOfRange {
                epoch: days,
                start: self.start.mjd2000(),
                end: self.end.mjd2000(),
            });
        }

        let span = self.end.mjd2000() - self.start.mjd2000();
        let intervals = self.states.len() - 1;
        if span == 0.0 || intervals == 0 {
            return Ok(self.states[0]);
        }

        // Position within the grid, in units of one interval
        let offset = (days - self.start.mjd2000()) / span * intervals as f64;
        let index = (offset.floor() as usize).min(intervals - 1);
        let fraction = offset - index as f64;

        let before = &self.states[index];
        let after = &self.states[index + 1];
        Ok(StateVector::new(
            before.position + (after.position - before.position) * fraction,
            before.velocity + (after.velocity - before.velocity) * fraction,
        ))
    }
}
