//! # Kernel registry
//!
//! [`KernelRegistry`] is the single owner of engine-loaded-kernel state.
//! All mutation is routed through its operations; the engine is injected
//! ([`KernelRegistry::with_engine`]) or defaulted to the in-process
//! [`SpkEngine`](crate::kernel::spk::SpkEngine).
//!
//! ## Error-flag discipline
//!
//! The engine reports failures through a sticky flag rather than return
//! values. Every fallible engine call goes through the private `checked`
//! helper, which interrogates the flag immediately after the call and
//! **takes it on every exit path**, so the engine is left consistent for
//! subsequent calls. The flag is translated into structured
//! [`EphemkitError`] values at this boundary: load failures surface as
//! [`EphemkitError::KernelLoad`], evaluation-time failures as
//! [`EphemkitError::EphemerisQuery`] — same channel in the engine, distinct
//! conditions for the caller.
//!
//! ## Lifecycle semantics
//!
//! Loading is **not** idempotent: repeated loads of the same path are
//! additive in the engine, and each wants a matching [`KernelRegistry::unload`].
//! Unloading a path that is not loaded is a defined no-op, never an error.
//! The registry has no states beyond "set of currently loaded files" — the
//! first load and the last unload (or process teardown) are its natural
//! bounds.
//!
//! See the [module docs](crate::kernel) for the concurrency contract.

use std::fmt;

use camino::Utf8Path;

use crate::constants::{NaifId, Seconds};
use crate::errors::EphemkitError;
use crate::kernel::engine::{KernelEngine, KernelKind};
use crate::kernel::spk::SpkEngine;
use crate::time::{et_to_epoch, Epoch};

use itertools::Itertools;

/// One row of the loaded-kernel listing produced by
/// [`KernelRegistry::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelInfo {
    pub index: usize,
    pub path: camino::Utf8PathBuf,
    pub kind: KernelKind,
    pub source: String,
}

impl fmt::Display for KernelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}  {:<40}  {:<5}  {}",
            self.index, self.path, self.kind, self.source
        )
    }
}

/// A maximal contiguous time interval for which a kernel file supplies
/// data for a body, in the toolbox epoch domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageWindow {
    pub start: Epoch,
    pub end: Epoch,
}

impl fmt::Display for CoverageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start: {}   stop: {}", self.start, self.end)
    }
}

/// Process-wide table of loaded ephemeris kernel files.
///
/// Not safe for concurrent use; see the [module docs](crate::kernel).
#[derive(Debug)]
pub struct KernelRegistry {
    engine: Box<dyn KernelEngine>,
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelRegistry {
    /// Registry backed by the in-process [`SpkEngine`].
    pub fn new() -> Self {
        KernelRegistry {
            engine: Box::new(SpkEngine::new()),
        }
    }

    /// Registry backed by a caller-supplied engine.
    pub fn with_engine(engine: Box<dyn KernelEngine>) -> Self {
        KernelRegistry { engine }
    }

    /// Run one engine operation under the check/clear discipline.
    ///
    /// The flag is taken (cleared) on the failure path before the detail
    /// is handed back, so the engine stays usable for subsequent calls.
    fn checked<T>(
        &mut self,
        op: impl FnOnce(&mut dyn KernelEngine) -> T,
    ) -> Result<T, String> {
        let out = op(self.engine.as_mut());
        if self.engine.failed() {
            let detail = self
                .engine
                .take_error()
                .unwrap_or_else(|| "unspecified engine failure".to_string());
            return Err(detail);
        }
        Ok(out)
    }

    /// Load the ephemeris file at `path` into the registry.
    ///
    /// Loads are additive: loading the same path twice produces two engine
    /// entries, each wanting a matching [`Self::unload`].
    ///
    /// Arguments
    /// ---------
    /// * `path`: filename of the kernel to load (e.g. `de432s.bsp`)
    ///
    /// Return
    /// ------
    /// * `Ok(())` on success, [`EphemkitError::KernelLoad`] naming the path
    ///   otherwise. A failed load leaves already-loaded files untouched.
    pub fn load(&mut self, path: &Utf8Path) -> Result<(), EphemkitError> {
        self.checked(|engine| engine.furnish(path))
            .map_err(|detail| EphemkitError::KernelLoad {
                path: path.to_string(),
                detail,
            })
    }

    /// Remove the named file if currently loaded.
    ///
    /// It is safe to unload a kernel that was never loaded — in that case
    /// no action is taken.
    pub fn unload(&mut self, path: &Utf8Path) {
        self.engine.unload(path);
    }

    /// Number of currently loaded files.
    pub fn count(&self) -> usize {
        self.engine.count()
    }

    /// Enumerate all currently loaded files, in engine order.
    ///
    /// A zero-length listing is a valid state, not an error.
    pub fn inspect(&self) -> Vec<KernelInfo> {
        (0..self.engine.count())
            .filter_map(|index| self.engine.kernel_data(index))
            .enumerate()
            .map(|(index, tag)| KernelInfo {
                index,
                path: tag.path,
                kind: tag.kind,
                source: tag.source,
            })
            .collect()
    }

    /// Merged coverage of `body` within the file at `path`.
    ///
    /// The engine's per-segment intervals are sorted and merged into an
    /// ordered, non-overlapping sequence, converted into the epoch domain.
    /// An unknown body/path combination yields an empty sequence —
    /// indistinguishable from valid zero coverage; validating identifiers
    /// is the caller's responsibility.
    pub fn coverage(
        &mut self,
        body: NaifId,
        path: &Utf8Path,
    ) -> Result<Vec<CoverageWindow>, EphemkitError> {
        let raw = self
            .checked(|engine| engine.windows(path, body))
            .map_err(|detail| EphemkitError::EphemerisQuery {
                target: body,
                detail,
            })?;
        Ok(merge_windows(raw))
    }

    /// State of `target` relative to `center` at `et`, as
    /// `[x, y, z, vx, vy, vz]` in km and km/s.
    ///
    /// Fails with [`EphemkitError::EphemerisQuery`] when no loaded kernel
    /// covers the query — a different condition than a load failure, kept
    /// distinct by construction.
    pub fn state(
        &mut self,
        target: NaifId,
        center: NaifId,
        et: Seconds,
    ) -> Result<[f64; 6], EphemkitError> {
        self.checked(|engine| engine.state(target, center, et))
            .map_err(|detail| EphemkitError::EphemerisQuery { target, detail })
    }

    /// Textual coverage report for every body found in `spk`.
    ///
    /// Loads the leap-second kernel and the SPK (additively, like any
    /// load), then renders each body's merged windows as calendar
    /// timestamps.
    ///
    /// Arguments
    /// ---------
    /// * `lsk`: path of a leap-second kernel
    /// * `spk`: path of the ephemeris kernel to report on
    pub fn coverage_report(
        &mut self,
        lsk: &Utf8Path,
        spk: &Utf8Path,
    ) -> Result<String, EphemkitError> {
        self.load(lsk)?;
        self.load(spk)?;

        let mut report = String::new();
        for body in self.engine.bodies(spk) {
            report.push_str(&format!("Body: {body}\n"));
            for window in self.coverage(body, spk)? {
                report.push_str(&format!("  {window}\n"));
            }
        }
        Ok(report)
    }
}

/// Sort raw `(start, end)` ET intervals and merge every overlapping or
/// touching pair, converting the result into the epoch domain.
fn merge_windows(raw: Vec<(Seconds, Seconds)>) -> Vec<CoverageWindow> {
    let mut merged: Vec<(Seconds, Seconds)> = Vec::new();

    for (start, end) in raw
        .into_iter()
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
    {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
        .into_iter()
        .map(|(start, end)| CoverageWindow {
            start: et_to_epoch(start),
            end: et_to_epoch(end),
        })
        .collect()
}
