use thiserror::Error;

#[derive(Error, Debug)]
pub enum EphemkitError {
    #[error("Kernel file {path} could not be loaded: {detail}")]
    KernelLoad { path: String, detail: String },

    #[error("Ephemeris query failed for body {target}: {detail}")]
    EphemerisQuery { target: i32, detail: String },

    #[error("Epoch {epoch} outside the sampled range [{start}, {end}] (MJD2000)")]
    EpochOutOfRange { epoch: f64, start: f64, end: f64 },

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SPK file structure: {0}")]
    SpkParse(String),

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),
}

impl PartialEq for EphemkitError {
    fn eq(&self, other: &Self) -> bool {
        use EphemkitError::*;
        match (self, other) {
            (
                KernelLoad { path: p1, detail: d1 },
                KernelLoad { path: p2, detail: d2 },
            ) => p1 == p2 && d1 == d2,
            (
                EphemerisQuery { target: t1, detail: d1 },
                EphemerisQuery { target: t2, detail: d2 },
            ) => t1 == t2 && d1 == d2,
            (
                EpochOutOfRange { epoch: e1, start: s1, end: n1 },
                EpochOutOfRange { epoch: e2, start: s2, end: n2 },
            ) => e1 == e2 && s1 == s2 && n1 == n2,

            // Not comparable by payload: equal if same variant
            (Io(_), Io(_)) => true,

            (SpkParse(a), SpkParse(b)) => a == b,
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,

            _ => false,
        }
    }
}
