//! Shared helpers: synthetic kernel files for end-to-end tests.
//!
//! The SPK writer emits the exact DAF/SPK layout the engine parses:
//! header record, one summary record (record 2), one name record
//! (record 3), then the segment payloads from record 4 on. Addresses are
//! DAF double-precision words, 1-based.

use camino::{Utf8Path, Utf8PathBuf};

/// One Chebyshev record of a synthetic type-2 segment.
pub struct TestRecord {
    pub mid: f64,
    pub radius: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// One synthetic SPK segment. Coverage is `[init, init + intlen * n]`.
pub struct TestSegment {
    pub target: i32,
    pub center: i32,
    pub data_type: i32,
    pub init: f64,
    pub intlen: f64,
    pub records: Vec<TestRecord>,
}

impl TestSegment {
    fn start_epoch(&self) -> f64 {
        self.init
    }

    fn end_epoch(&self) -> f64 {
        self.init + self.intlen * self.records.len() as f64
    }
}

const RECORD_BYTES: usize = 1024;
// First data word: record 4, so 3 * 1024 bytes before it.
const DATA_START_WORD: usize = 3 * RECORD_BYTES / 8 + 1;

/// Write a minimal little-endian DAF/SPK file holding `segments`.
pub fn write_spk(path: &Utf8Path, segments: &[TestSegment]) {
    let mut data_words: Vec<f64> = Vec::new();
    let mut summaries: Vec<[u8; 40]> = Vec::new();

    for segment in segments {
        let initial_addr = DATA_START_WORD + data_words.len();
        let ncoeff = segment.records[0].x.len();
        let rsize = 2 + 3 * ncoeff;

        for record in &segment.records {
            data_words.push(record.mid);
            data_words.push(record.radius);
            data_words.extend(&record.x);
            data_words.extend(&record.y);
            data_words.extend(&record.z);
        }
        data_words.push(segment.init);
        data_words.push(segment.intlen);
        data_words.push(rsize as f64);
        data_words.push(segment.records.len() as f64);

        let final_addr = DATA_START_WORD + data_words.len() - 1;

        let mut summary = [0u8; 40];
        summary[0..8].copy_from_slice(&segment.start_epoch().to_le_bytes());
        summary[8..16].copy_from_slice(&segment.end_epoch().to_le_bytes());
        let ints = [
            segment.target,
            segment.center,
            1, // frame: J2000
            segment.data_type,
            initial_addr as i32,
            final_addr as i32,
        ];
        for (i, value) in ints.iter().enumerate() {
            let offset = 16 + i * 4;
            summary[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        }
        summaries.push(summary);
    }

    let free = DATA_START_WORD + data_words.len();

    let mut buf = vec![0u8; 3 * RECORD_BYTES];

    // --- Header record
    buf[0..8].copy_from_slice(b"DAF/SPK ");
    buf[8..12].copy_from_slice(&2i32.to_le_bytes()); // ND
    buf[12..16].copy_from_slice(&6i32.to_le_bytes()); // NI
    buf[16..76].copy_from_slice(&[b' '; 60]); // internal filename
    buf[76..80].copy_from_slice(&2i32.to_le_bytes()); // fward
    buf[80..84].copy_from_slice(&2i32.to_le_bytes()); // bward
    buf[84..88].copy_from_slice(&(free as i32).to_le_bytes());
    buf[88..96].copy_from_slice(b"LTL-IEEE");

    // --- Summary record: next, prev, nsum, then the summaries
    let base = RECORD_BYTES;
    buf[base..base + 8].copy_from_slice(&0f64.to_le_bytes());
    buf[base + 8..base + 16].copy_from_slice(&0f64.to_le_bytes());
    buf[base + 16..base + 24].copy_from_slice(&(summaries.len() as f64).to_le_bytes());
    for (i, summary) in summaries.iter().enumerate() {
        let offset = base + 24 + i * 40;
        buf[offset..offset + 40].copy_from_slice(summary);
    }

    // --- Record 3 stays blank (segment names); data from record 4 on
    for word in &data_words {
        buf.extend_from_slice(&word.to_le_bytes());
    }

    std::fs::write(path, buf).expect("failed to write synthetic SPK");
}

/// Write a minimal `KPL/LSK` text kernel.
pub fn write_lsk(path: &Utf8Path) {
    let content = "KPL/LSK\n\n\\begindata\nDELTET/DELTA_T_A = 32.184\n\\begintext\n";
    std::fs::write(path, content).expect("failed to write synthetic LSK");
}

/// Standard fixture: linear motion for body 5, a constant point for
/// body 10.
///
/// Body 5 (center 0) spans ET `[-43200, 129600]` (MJD2000 days 0..2) in
/// two touching segments, with position `(1000, 2000, 3000) km +
/// (0.5, 0.25, 0.125) km/s * et`. Body 10 (center 0) holds
/// `(7000, 8000, 9000) km` over ET `[-43200, 43200]` (days 0..1).
pub fn write_two_body_spk(path: &Utf8Path) {
    write_spk(
        path,
        &[
            TestSegment {
                target: 5,
                center: 0,
                data_type: 2,
                init: -43_200.0,
                intlen: 86_400.0,
                records: vec![TestRecord {
                    mid: 0.0,
                    radius: 43_200.0,
                    x: vec![1_000.0, 21_600.0],
                    y: vec![2_000.0, 10_800.0],
                    z: vec![3_000.0, 5_400.0],
                }],
            },
            TestSegment {
                target: 5,
                center: 0,
                data_type: 2,
                init: 43_200.0,
                intlen: 86_400.0,
                records: vec![TestRecord {
                    mid: 86_400.0,
                    radius: 43_200.0,
                    x: vec![44_200.0, 21_600.0],
                    y: vec![23_600.0, 10_800.0],
                    z: vec![13_800.0, 5_400.0],
                }],
            },
            TestSegment {
                target: 10,
                center: 0,
                data_type: 2,
                init: -43_200.0,
                intlen: 86_400.0,
                records: vec![TestRecord {
                    mid: 0.0,
                    radius: 43_200.0,
                    x: vec![7_000.0],
                    y: vec![8_000.0],
                    z: vec![9_000.0],
                }],
            },
        ],
    );
}

/// Temp-dir scoped path helper.
pub fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("non-UTF8 temp path")
}
