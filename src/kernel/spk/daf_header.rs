//! DAF (Double Precision Array File) header parsing.
//!
//! The first 1024-byte record of a DAF container (typically an SPK kernel)
//! carries the structural metadata needed to walk the rest of the file:
//! the format id word, the summary layout (`nd`/`ni`), the doubly-linked
//! summary-record pointers (`fward`/`bward`), and the first free address.
//!
//! Integers are read little-endian; `BIG-IEEE` kernels are rejected at load
//! time by [`SpkFile::read`](crate::kernel::spk::SpkFile::read).

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

/// In-memory representation of the DAF/SPK header (first 1024-byte record).
///
/// Fields mirror the canonical NAIF layout, trimmed of trailing padding
/// where applicable.
#[derive(Debug, PartialEq, Clone)]
pub struct DafHeader {
    /// 8-byte identifier, typically `"DAF/SPK"`.
    pub idword: String,
    /// 60-byte, padded internal kernel name.
    pub internal_filename: String,
    /// Number of double-precision components in each summary (ND).
    pub nd: i32,
    /// Number of integer components in each summary (NI).
    pub ni: i32,
    /// Record index (1-based) of the first summary record.
    pub fward: i32,
    /// Record index (1-based) of the last summary record.
    pub bward: i32,
    /// First free address, in double-precision words (1-based).
    pub free: i32,
    /// Platform tag describing the numeric encoding (e.g. `"LTL-IEEE"`).
    pub locfmt: String,
}

impl DafHeader {
    /// Parse the first 1024-byte DAF record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: byte slice starting at the beginning of the file, at
    ///   least 1024 bytes long.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)` with all fields trimmed of padding.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?; // "DAF/SPK "
        let (input, nd) = le_i32(input)?; // ND
        let (input, ni) = le_i32(input)?; // NI
        let (input, ifname) = take(60usize)(input)?; // internal file name
        let (input, fward) = le_i32(input)?; // forward ptr
        let (input, bward) = le_i32(input)?; // backward ptr
        let (input, free) = le_i32(input)?; // first free address
        let (input, locfmt) = take(8usize)(input)?; // location format
        let (input, _) = take(603usize)(input)?; // reserved
        let (input, _ftpstr) = take(28usize)(input)?; // ftp sentinel
        Ok((
            input,
            DafHeader {
                idword: String::from_utf8_lossy(idword).trim().to_string(),
                internal_filename: String::from_utf8_lossy(ifname).trim().to_string(),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: String::from_utf8_lossy(locfmt).trim().to_string(),
            },
        ))
    }

    /// Summary size in double-precision words: `ND + ceil(NI / 2)`.
    pub fn summary_words(&self) -> usize {
        self.nd as usize + (self.ni as usize).div_ceil(2)
    }
}
