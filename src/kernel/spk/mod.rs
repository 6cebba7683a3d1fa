//! # In-process DAF/SPK kernel engine
//!
//! [`SpkEngine`] is the default [`KernelEngine`]: it decodes NAIF/JPL SPK
//! binaries entirely in memory through the parsing pipeline in this module
//! (DAF header → summary-record chain → per-segment directory footer →
//! Chebyshev records) and keeps the load table the registry operates on.
//!
//! Load-table semantics follow the engine contract: loads are **additive**
//! (the same path may appear several times), each unload removes at most
//! the most recent entry, and later loads take precedence when a state
//! query is covered by more than one kernel.
//!
//! `KPL/…` text kernels (leap seconds et al.) are recognized by prefix and
//! tracked in the table without being decoded; calendar conversions are
//! done natively by the toolbox.
//!
//! Only type-2 segments (Chebyshev position) are evaluated. Other segment
//! types still load and answer coverage queries — their summaries are
//! ordinary DAF data — but state queries against them raise the error
//! flag.

pub mod daf_header;
pub mod segment;
pub mod summary;

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use nom::number::complete::le_f64;

use crate::constants::{NaifId, Seconds};
use crate::errors::EphemkitError;
use crate::kernel::engine::{KernelEngine, KernelKind, KernelTag};

use daf_header::DafHeader;
use segment::{ChebyshevRecord, SegmentDirectory};
use summary::SegmentSummary;

/// One decoded SPK segment: descriptor, footer, and (for type 2) the
/// eagerly decoded records.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub summary: SegmentSummary,
    pub directory: SegmentDirectory,
    pub records: Vec<ChebyshevRecord>,
}

/// In-memory bundle of one loaded SPK kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkFile {
    pub header: DafHeader,
    pub segments: Vec<Segment>,
}

impl SpkFile {
    /// Load and decode an SPK file.
    ///
    /// Runs the full pipeline: DAF header, then every summary record in
    /// the forward chain, then each segment's directory footer and (for
    /// type-2 segments) its records.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: filesystem location of the kernel.
    ///
    /// Return
    /// ----------
    /// * A fully decoded [`SpkFile`], or the first structural error met.
    pub fn read(path: &Utf8Path) -> Result<Self, EphemkitError> {
        let mut file = BufReader::new(File::open(path)?);

        // --- DAF header (first 1024 bytes)
        let mut buffer = [0u8; 1 << 10];
        file.read_exact(&mut buffer)?;
        let (_, header) = DafHeader::parse(&buffer)
            .map_err(|_| EphemkitError::SpkParse("malformed DAF header".to_string()))?;

        if !header.idword.starts_with("DAF/SPK") {
            return Err(EphemkitError::SpkParse(format!(
                "not an SPK kernel (id word {:?})",
                header.idword
            )));
        }
        if header.locfmt != "LTL-IEEE" {
            return Err(EphemkitError::SpkParse(format!(
                "unsupported binary format {:?}",
                header.locfmt
            )));
        }

        let summary_bytes = header.summary_words() * 8;
        let mut segments = Vec::new();

        // --- Walk the forward-linked summary records
        let mut record_index = header.fward;
        while record_index > 0 {
            let offset = (record_index as u64 - 1) * 1024;
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut buffer)?;

            // Three control words per summary record: next, prev, nsum
            let (input, next) = parse_control(&buffer)?;
            let (input, _prev) = parse_control(input)?;
            let (_, nsum) = parse_control(input)?;

            for i in 0..(nsum as usize) {
                let start = 24 + i * summary_bytes;
                let end = start + summary_bytes;
                let slice = buffer.get(start..end).ok_or_else(|| {
                    EphemkitError::SpkParse(format!(
                        "summary {i} overruns record {record_index}"
                    ))
                })?;
                let (_, summary) = SegmentSummary::parse(slice)
                    .map_err(|_| EphemkitError::SpkParse("malformed segment summary".to_string()))?;

                segments.push(Self::read_segment(&mut file, summary)?);
            }

            record_index = next as i32;
        }

        Ok(SpkFile { header, segments })
    }

    fn read_segment(
        file: &mut BufReader<File>,
        summary: SegmentSummary,
    ) -> Result<Segment, EphemkitError> {
        if summary.initial_addr <= 0 || summary.final_addr < summary.initial_addr {
            return Err(EphemkitError::SpkParse(format!(
                "segment for body {} has invalid addresses {}..{}",
                summary.target, summary.initial_addr, summary.final_addr
            )));
        }

        let directory = SegmentDirectory::parse(file, summary.final_addr as usize)?;

        // Only type 2 is evaluated; other types keep their summary for
        // coverage queries and fail at state-query time.
        let records = if summary.data_type == 2 {
            ChebyshevRecord::parse_all(
                file,
                summary.initial_addr as usize,
                directory.rsize,
                directory.n_records,
            )?
        } else {
            Vec::new()
        };

        Ok(Segment {
            summary,
            directory,
            records,
        })
    }
}

fn parse_control(input: &[u8]) -> Result<(&[u8], f64), EphemkitError> {
    le_f64::<_, nom::error::Error<&[u8]>>(input)
        .map_err(|_| EphemkitError::SpkParse("truncated summary record".to_string()))
}

#[derive(Debug)]
enum KernelData {
    Spk(SpkFile),
    Text,
}

#[derive(Debug)]
struct LoadedKernel {
    tag: KernelTag,
    data: KernelData,
}

/// Default in-process kernel engine: additive load table plus the sticky
/// error flag of the [`KernelEngine`] contract.
#[derive(Debug, Default)]
pub struct SpkEngine {
    loaded: Vec<LoadedKernel>,
    error: Option<String>,
}

impl SpkEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently loaded SPK data for `path`, if any.
    fn find_spk(&self, path: &Utf8Path) -> Option<&SpkFile> {
        self.loaded.iter().rev().find_map(|kernel| {
            if kernel.tag.path != path {
                return None;
            }
            match &kernel.data {
                KernelData::Spk(spk) => Some(spk),
                KernelData::Text => None,
            }
        })
    }
}

fn sniff_kernel(path: &Utf8Path) -> Result<KernelData, EphemkitError> {
    let mut magic = [0u8; 8];
    let read = File::open(path)?.read(&mut magic)?;

    if magic[..read].starts_with(b"DAF/") {
        Ok(KernelData::Spk(SpkFile::read(path)?))
    } else if magic[..read].starts_with(b"KPL/") {
        Ok(KernelData::Text)
    } else {
        Err(EphemkitError::SpkParse(
            "unrecognized kernel architecture".to_string(),
        ))
    }
}

fn evaluate_segment(segment: &Segment, et: Seconds) -> Result<[f64; 6], String> {
    if segment.summary.data_type != 2 {
        return Err(EphemkitError::InvalidSpkDataType(segment.summary.data_type).to_string());
    }

    let directory = &segment.directory;
    let idx = (((et - directory.init) / directory.intlen).floor() as usize)
        .min(directory.n_records.saturating_sub(1));
    let record = segment.records.get(idx).ok_or_else(|| {
        format!(
            "missing record {idx} in segment for body {}",
            segment.summary.target
        )
    })?;

    let (position, velocity) = record.interpolate(et);
    Ok([
        position.x, position.y, position.z, velocity.x, velocity.y, velocity.z,
    ])
}

impl KernelEngine for SpkEngine {
    fn furnish(&mut self, path: &Utf8Path) {
        match sniff_kernel(path) {
            Ok(data) => {
                let kind = match data {
                    KernelData::Spk(_) => KernelKind::Spk,
                    KernelData::Text => KernelKind::Text,
                };
                self.loaded.push(LoadedKernel {
                    tag: KernelTag {
                        path: Utf8PathBuf::from(path),
                        kind,
                        source: String::new(),
                    },
                    data,
                });
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn unload(&mut self, path: &Utf8Path) {
        if let Some(index) = self.loaded.iter().rposition(|k| k.tag.path == path) {
            self.loaded.remove(index);
        }
    }

    fn count(&self) -> usize {
        self.loaded.len()
    }

    fn kernel_data(&self, index: usize) -> Option<KernelTag> {
        self.loaded.get(index).map(|kernel| kernel.tag.clone())
    }

    fn bodies(&self, path: &Utf8Path) -> Vec<NaifId> {
        let Some(spk) = self.find_spk(path) else {
            return Vec::new();
        };
        spk.segments
            .iter()
            .map(|segment| segment.summary.target)
            .unique()
            .collect()
    }

    fn windows(&self, path: &Utf8Path, body: NaifId) -> Vec<(Seconds, Seconds)> {
        let Some(spk) = self.find_spk(path) else {
            return Vec::new();
        };
        spk.segments
            .iter()
            .filter(|segment| segment.summary.target == body)
            .map(|segment| (segment.summary.start_epoch, segment.summary.end_epoch))
            .collect()
    }

    fn state(&mut self, target: NaifId, center: NaifId, et: Seconds) -> [f64; 6] {
        let mut outcome: Result<[f64; 6], String> = Err(format!(
            "insufficient ephemeris data for body {target} (center {center}) at {et} ET seconds"
        ));

        'search: for kernel in self.loaded.iter().rev() {
            let KernelData::Spk(spk) = &kernel.data else {
                continue;
            };
            for segment in &spk.segments {
                if segment.summary.target == target
                    && segment.summary.center == center
                    && et >= segment.summary.start_epoch
                    && et <= segment.summary.end_epoch
                {
                    outcome = evaluate_segment(segment, et);
                    break 'search;
                }
            }
        }

        match outcome {
            Ok(state) => state,
            Err(detail) => {
                self.error = Some(detail);
                [0.0; 6]
            }
        }
    }

    fn failed(&self) -> bool {
        self.error.is_some()
    }

    fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }
}
