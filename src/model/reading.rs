//! Tagged numeric reading produced by every parse operation.

use serde::{Deserialize, Serialize};

/// Result of extracting one number from the stats dump.
///
/// Distinguishes "nothing there" from "there but unparseable" so that a
/// legitimate `-1` (or `0`) is never mistaken for a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawScalar", into = "Option<f64>")]
pub enum Reading {
    /// Section, line or field is absent.
    #[default]
    Missing,
    /// Text is present but could not be read as a number.
    Malformed,
    /// Parsed value in base units (bytes, seconds, plain counts).
    Value(f64),
}

impl Reading {
    /// Legacy sentinel used by the dump's older consumers: `-1` for
    /// anything that is not a value.
    pub fn sentinel(self) -> f64 {
        match self {
            Reading::Value(v) => v,
            Reading::Missing | Reading::Malformed => -1.0,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Multiplies a value by `factor`; non-values pass through unchanged.
    pub fn scale(self, factor: f64) -> Reading {
        match self {
            Reading::Value(v) => Reading::Value(v * factor),
            other => other,
        }
    }
}

impl From<Reading> for Option<f64> {
    fn from(r: Reading) -> Self {
        r.value()
    }
}

/// Wire shape of a status scalar: the engine reports most of them as
/// strings (sometimes with a unit suffix) and a few as real numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
    Null(()),
}

impl From<RawScalar> for Reading {
    fn from(raw: RawScalar) -> Self {
        match raw {
            RawScalar::Number(v) => Reading::Value(v),
            RawScalar::Text(s) => crate::collector::rocksdb::parse_unit_value(&s),
            RawScalar::Null(()) => Reading::Missing,
        }
    }
}
