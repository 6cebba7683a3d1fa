use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::NaifId;
use crate::errors::EphemkitError;
use crate::kernel::registry::KernelRegistry;
use crate::state_vector::StateVector;
use crate::time::{epoch_to_et, Epoch};

/// Kernel-backed backing: a (target, center) pair of NAIF ids resolved
/// against the registry at evaluation time.
///
/// The provider carries no reference to registry state — only the
/// identifiers needed to issue a query — so it remains valid to construct,
/// clone, and serialize while no kernel is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelBody {
    target: NaifId,
    center: NaifId,
}

impl KernelBody {
    pub fn new(target: NaifId, center: NaifId) -> Self {
        KernelBody { target, center }
    }

    pub fn target(&self) -> NaifId {
        self.target
    }

    pub fn center(&self) -> NaifId {
        self.center
    }

    /// Convert `epoch` to the kernel-store convention, query the registry,
    /// and normalize the returned state into toolbox units (m, m/s).
    pub fn evaluate(
        &self,
        epoch: Epoch,
        registry: &mut KernelRegistry,
    ) -> Result<StateVector, EphemkitError> {
        let et = epoch_to_et(epoch);
        let s = registry.state(self.target, self.center, et)?;
        Ok(StateVector::from_km(
            Vector3::new(s[0], s[1], s[2]),
            Vector3::new(s[3], s[4], s[5]),
        ))
    }
}
