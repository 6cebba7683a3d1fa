//! # Constants and type definitions for ephemkit
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `ephemkit` library.
//!
//! ## Overview
//!
//! - Time conversions (days ↔ seconds) and reference-instant offsets
//! - Unit conversions (km ↔ m)
//! - Core type aliases used across the crate
//!
//! These definitions are used by the epoch converter, the kernel registry,
//! and the ephemeris providers.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Numerical epsilon used for floating-point comparisons (days)
pub const EPS: f64 = 1e-6;

/// Kilometers → meters
pub const KM2M: f64 = 1_000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Time in fractional days since the MJD2000 reference instant
pub type MJD2000 = f64;
/// Time in ET seconds past J2000 (2000-01-01 12:00:00 TDB)
pub type Seconds = f64;
/// NAIF integer identifier of a solar system body or barycenter
pub type NaifId = i32;
