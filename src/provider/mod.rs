//! # Ephemeris providers
//!
//! An [`EphemerisProvider`] maps an [`Epoch`](crate::time::Epoch) to a
//! [`StateVector`]: the uniform abstraction over body-state sources. It is
//! a **closed tagged-variant type** — each backing kind carries its own
//! parameter payload, and dispatch is a `match`, which makes `Clone` and
//! serde round-tripping derivable instead of hand-written per variant.
//!
//! Backings:
//!
//! * [`FixedPoint`] — stored constants; evaluation is epoch-invariant by
//!   design (a fixed reference point, not a moving body).
//! * [`KernelBody`] — a (target, center) pair resolved against the kernel
//!   registry at evaluation time. The provider holds no kernel reference:
//!   it is valid to construct, clone, and serialize with nothing loaded,
//!   and only evaluation fails when a needed kernel is absent.
//! * [`InterpGrid`] — a sampled state grid evaluated by linear
//!   interpolation, serializable without any kernel.
//!
//! Evaluation takes the registry as an explicit parameter: providers never
//! own registry state, they query it per call.

pub mod fixed_point;
pub mod interp_grid;
pub mod kernel_body;

use serde::{Deserialize, Serialize};

use crate::errors::EphemkitError;
use crate::kernel::registry::KernelRegistry;
use crate::state_vector::StateVector;
use crate::time::Epoch;

pub use fixed_point::FixedPoint;
pub use interp_grid::InterpGrid;
pub use kernel_body::KernelBody;

/// Polymorphic body-state source. See the [module docs](self).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EphemerisProvider {
    Fixed(FixedPoint),
    Kernel(KernelBody),
    Interpolated(InterpGrid),
}

impl EphemerisProvider {
    /// State of the body at `epoch`.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: an [`Epoch`] or raw MJD2000 day count
    /// * `registry`: the kernel registry queried by kernel-backed variants
    ///
    /// Return
    /// ------
    /// * The [`StateVector`] at `epoch`, or the variant-specific failure
    ///   (a kernel query failure, or an out-of-range epoch for sampled
    ///   grids).
    pub fn evaluate(
        &self,
        epoch: impl Into<Epoch>,
        registry: &mut KernelRegistry,
    ) -> Result<StateVector, EphemkitError> {
        let epoch = epoch.into();
        match self {
            EphemerisProvider::Fixed(fixed) => Ok(fixed.state()),
            EphemerisProvider::Kernel(body) => body.evaluate(epoch, registry),
            EphemerisProvider::Interpolated(grid) => grid.evaluate(epoch),
        }
    }

    /// Short human-readable tag identifying the backing kind. Infallible
    /// and independent of any loaded kernel.
    pub fn describe(&self) -> &'static str {
        match self {
            EphemerisProvider::Fixed(_) => "fixed coordinates",
            EphemerisProvider::Kernel(_) => "spice kernel",
            EphemerisProvider::Interpolated(_) => "interpolated grid",
        }
    }
}

impl From<FixedPoint> for EphemerisProvider {
    fn from(fixed: FixedPoint) -> Self {
        EphemerisProvider::Fixed(fixed)
    }
}

impl From<KernelBody> for EphemerisProvider {
    fn from(body: KernelBody) -> Self {
        EphemerisProvider::Kernel(body)
    }
}

impl From<InterpGrid> for EphemerisProvider {
    fn from(grid: InterpGrid) -> Self {
        EphemerisProvider::Interpolated(grid)
    }
}
