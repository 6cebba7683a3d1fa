//! # The kernel-engine boundary
//!
//! [`KernelEngine`] is the seam between the registry and whatever actually
//! holds kernel data in memory. The engine owns a global load table and a
//! single **sticky error flag**: fallible operations record their failure in
//! the flag instead of returning a `Result`, and the flag stays raised until
//! explicitly taken. The registry wraps every engine call with a
//! check-and-clear discipline and translates the flag into structured
//! errors at the boundary (see
//! [`KernelRegistry`](crate::kernel::registry::KernelRegistry)).
//!
//! ## Flag contract
//!
//! * [`KernelEngine::furnish`] and [`KernelEngine::state`] may raise the
//!   flag.
//! * [`KernelEngine::unload`], [`KernelEngine::count`],
//!   [`KernelEngine::kernel_data`], [`KernelEngine::bodies`] and
//!   [`KernelEngine::windows`] must never raise it: absent paths, unknown
//!   bodies, and empty load tables are answered with no-ops and empty
//!   values.
//! * While the flag is raised, the outcome of further fallible calls is
//!   unspecified; callers clear it before continuing.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::constants::{NaifId, Seconds};

/// Broad classification of a loaded kernel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    /// Binary DAF/SPK ephemeris kernel.
    Spk,
    /// `KPL/…` text kernel (leap seconds, constants, …).
    Text,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            KernelKind::Spk => "SPK",
            KernelKind::Text => "TEXT",
        })
    }
}

/// One entry of the engine load table, as reported by
/// [`KernelEngine::kernel_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelTag {
    /// Path the kernel was loaded from (the lookup key).
    pub path: Utf8PathBuf,
    /// File classification.
    pub kind: KernelKind,
    /// Name of the kernel that caused this load; empty for direct loads.
    pub source: String,
}

/// Black-box interface to a kernel store.
///
/// Implementations keep the load table **additive**: furnishing the same
/// path twice produces two entries, and each [`KernelEngine::unload`]
/// removes at most one. All times exchanged across this boundary are ET
/// seconds past J2000 (TDB); all state components are km and km/s.
pub trait KernelEngine: fmt::Debug {
    /// Load the kernel file at `path` into the table. Raises the error
    /// flag when the file is missing, corrupt, or of an unrecognized
    /// architecture; the table is unchanged in that case.
    fn furnish(&mut self, path: &Utf8Path);

    /// Remove the most recently loaded entry for `path`, if any.
    fn unload(&mut self, path: &Utf8Path);

    /// Number of entries currently in the load table.
    fn count(&self) -> usize;

    /// Table entry at `index` (load order), or `None` past the end.
    fn kernel_data(&self, index: usize) -> Option<KernelTag>;

    /// Distinct body ids for which the file at `path` carries data, in
    /// file order. Empty when the path is not loaded or carries none.
    fn bodies(&self, path: &Utf8Path) -> Vec<NaifId>;

    /// Raw, unmerged `(start, end)` ET intervals the file at `path`
    /// provides for `body`. Empty when the path is not loaded or the body
    /// is absent from it.
    fn windows(&self, path: &Utf8Path, body: NaifId) -> Vec<(Seconds, Seconds)>;

    /// State of `target` relative to `center` at `et`, as
    /// `[x, y, z, vx, vy, vz]` in km and km/s. Raises the error flag and
    /// returns zeros when no loaded segment covers the query.
    fn state(&mut self, target: NaifId, center: NaifId, et: Seconds) -> [f64; 6];

    /// Whether the error flag is raised.
    fn failed(&self) -> bool;

    /// Take the pending error message, clearing the flag.
    fn take_error(&mut self) -> Option<String>;
}
