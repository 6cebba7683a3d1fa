//! Segment payload decoding: directory footer and Chebyshev records.
//!
//! Each SPK type-2 segment stores `n_records` fixed-size records followed
//! by a four-value directory footer:
//!
//! * `init` — start epoch of the first record (ET seconds),
//! * `intlen` — time span of each record (seconds),
//! * `rsize` — record size in **double-precision words**, not bytes,
//! * `n_records` — number of records.
//!
//! A record holds its midpoint `mid` (ET seconds), half-interval `radius`
//! (seconds), and `ncoeff` Chebyshev coefficients per axis for position in
//! km. The normalized time is `t = (et - mid) / radius`; position uses
//! `T_n(t)` and velocity uses `T'_n(t)` scaled by the chain-rule factor
//! `1 / radius` (km/s).
//!
//! DAF addresses count double-precision words (8-byte units) starting at 1.

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use nalgebra::Vector3;
use nom::number::complete::le_f64;

use crate::errors::EphemkitError;

/// Four-value directory footer of an SPK type-2 segment.
#[derive(Debug, PartialEq, Clone)]
pub struct SegmentDirectory {
    pub init: f64,
    pub intlen: f64,
    pub rsize: usize,
    pub n_records: usize,
}

impl SegmentDirectory {
    /// Read the directory footer, located in the last four words of the
    /// segment.
    ///
    /// Arguments
    /// -----------------
    /// * `file`: reader positioned anywhere; this function seeks.
    /// * `final_addr`: end address of the segment in DP-words (1-based).
    pub fn parse(file: &mut BufReader<File>, final_addr: usize) -> Result<Self, EphemkitError> {
        if final_addr < 4 {
            return Err(EphemkitError::SpkParse(format!(
                "segment end address {final_addr} leaves no room for a directory"
            )));
        }
        let directory_offset_bytes = (final_addr - 4) * 8;
        let mut dir_buf = [0u8; 32]; // 4 f64 = 32 bytes
        file.seek(SeekFrom::Start(directory_offset_bytes as u64))?;
        file.read_exact(&mut dir_buf)?;

        let (input, init) = parse_f64(&dir_buf)?;
        let (input, intlen) = parse_f64(input)?;
        let (input, rsize) = parse_f64(input)?;
        let (_, n_records) = parse_f64(input)?;

        Ok(SegmentDirectory {
            init,
            intlen,
            rsize: rsize as usize,
            n_records: n_records as usize,
        })
    }
}

/// One SPK record: midpoint, half-interval, and per-axis Chebyshev
/// coefficients for position (km).
#[derive(Debug, Clone, PartialEq)]
pub struct ChebyshevRecord {
    /// Midpoint of the record time span (ET seconds).
    pub mid: f64,
    /// Half-width of the record interval (seconds).
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl ChebyshevRecord {
    fn parse_one(input: &[u8], ncoeff: usize) -> Result<Self, EphemkitError> {
        let (input, mid) = parse_f64(input)?;
        let (mut input, radius) = parse_f64(input)?;

        let mut axes = [
            Vec::with_capacity(ncoeff),
            Vec::with_capacity(ncoeff),
            Vec::with_capacity(ncoeff),
        ];
        for axis in &mut axes {
            for _ in 0..ncoeff {
                let (rest, coeff) = parse_f64(input)?;
                axis.push(coeff);
                input = rest;
            }
        }
        let [x, y, z] = axes;

        Ok(ChebyshevRecord { mid, radius, x, y, z })
    }

    /// Read `n_records` contiguous records of `rsize` DP-words each,
    /// starting at `initial_addr` (DP-words, 1-based).
    pub fn parse_all(
        file: &mut BufReader<File>,
        initial_addr: usize,
        rsize: usize,
        n_records: usize,
    ) -> Result<Vec<Self>, EphemkitError> {
        if rsize < 5 || (rsize - 2) % 3 != 0 {
            return Err(EphemkitError::SpkParse(format!(
                "record size {rsize} does not hold three equal coefficient sets"
            )));
        }
        let ncoeff = (rsize - 2) / 3;
        let record_byte_size = rsize * 8;
        let start_byte_offset = (initial_addr - 1) * 8;

        let mut buf = vec![0u8; record_byte_size];
        let mut records = Vec::with_capacity(n_records);

        for i in 0..n_records {
            let byte_offset = start_byte_offset + i * record_byte_size;
            file.seek(SeekFrom::Start(byte_offset as u64))?;
            file.read_exact(&mut buf)?;
            records.push(Self::parse_one(&buf, ncoeff)?);
        }

        Ok(records)
    }

    /// Evaluate Cartesian position [km] and velocity [km/s] at an ET epoch.
    ///
    /// The time is normalized to `t = (et - mid) / radius` and clamped to
    /// `[-1, 1]`. Position is the Chebyshev series `Σ cₙ Tₙ(t)`; velocity
    /// is `Σ cₙ T'ₙ(t) / radius`.
    pub fn interpolate(&self, et_seconds: f64) -> (Vector3<f64>, Vector3<f64>) {
        let t = ((et_seconds - self.mid) / self.radius).clamp(-1.0, 1.0);

        let ncoeff = self.x.len();
        let mut polynomials = vec![0.0; ncoeff];
        polynomials[0] = 1.0;

        // T_0 = 1, T_1 = t, T_n = 2 t T_{n-1} - T_{n-2}
        if ncoeff > 1 {
            polynomials[1] = t;
            for degree in 2..ncoeff {
                polynomials[degree] = 2.0 * t * polynomials[degree - 1] - polynomials[degree - 2];
            }
        }

        let series = |coeffs: &[f64], basis: &[f64]| -> f64 {
            coeffs.iter().zip(basis).map(|(c, p)| c * p).sum()
        };

        let position = Vector3::new(
            series(&self.x, &polynomials),
            series(&self.y, &polynomials),
            series(&self.z, &polynomials),
        );

        let mut velocity = Vector3::zeros();
        if ncoeff > 1 {
            let mut derivatives = vec![0.0; ncoeff];
            derivatives[1] = 1.0;

            if ncoeff > 2 {
                derivatives[2] = 4.0 * t;
                // T'_n = 2 t T'_{n-1} + 2 T_{n-1} - T'_{n-2}
                for degree in 3..ncoeff {
                    derivatives[degree] = 2.0 * t * derivatives[degree - 1]
                        + 2.0 * polynomials[degree - 1]
                        - derivatives[degree - 2];
                }
            }

            // dt/det = 1 / radius
            let scale = 1.0 / self.radius;
            velocity = Vector3::new(
                series(&self.x, &derivatives) * scale,
                series(&self.y, &derivatives) * scale,
                series(&self.z, &derivatives) * scale,
            );
        }

        (position, velocity)
    }
}

fn parse_f64(input: &[u8]) -> Result<(&[u8], f64), EphemkitError> {
    le_f64::<_, nom::error::Error<&[u8]>>(input)
        .map_err(|_| EphemkitError::SpkParse("truncated double-precision word".to_string()))
}
