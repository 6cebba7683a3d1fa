//! # Kernel lifecycle management
//!
//! This module owns everything related to externally authored ephemeris
//! kernel files: the engine boundary ([`engine::KernelEngine`]), the default
//! in-process DAF/SPK engine ([`spk::SpkEngine`]), and the registry facade
//! ([`registry::KernelRegistry`]) through which all load/unload/inspect/
//! coverage operations are routed.
//!
//! ## Concurrency
//!
//! The engine keeps a single global load table and a single sticky error
//! flag, and is **not reentrant**. Neither the engine nor the registry does
//! any internal locking: a registry (and the engine it owns) must not be
//! used from multiple threads without an external guard serializing *all*
//! operations, e.g. `std::sync::Mutex<KernelRegistry>`. Operations are
//! observed in the order they are issued; nothing is batched or reordered.
//!
//! ## Failure model
//!
//! Load failures are recoverable and reported per call; they never corrupt
//! already-loaded files. Unloading an absent path is a defined no-op.
//! Inspect and coverage queries against an empty load table return empty
//! results, not errors. No operation retries.

pub mod engine;
pub mod registry;
pub mod spk;
