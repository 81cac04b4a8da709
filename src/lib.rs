//! Declarative extraction of typed fields from string-keyed request data.
//!
//! This library populates caller-owned typed values from a read-only source
//! of string fields (decoded form values, query parameters, plain maps) in a
//! single declarative pass.
//!
//! The library provides:
//! - A [`Source`] trait for anything that resolves string keys to string
//!   values, with implementations for the standard map types
//! - A [`ParsingMap`] builder declaring which keys are converted into which
//!   destinations, executed in declaration order
//! - A standard library of conversions in [`convert`] for strings, comma
//!   lists, booleans, integers, floats, and timestamps
//! - A closed set of destination kinds in [`Target`], so a conversion pointed
//!   at the wrong destination fails with [`Error::WrongTargetType`] instead
//!   of corrupting it
//!
//! Absent keys and empty values are equivalent: both skip the field without
//! touching its destination, which is what makes every declared field
//! optional. The first conversion that fails aborts the pass; destinations
//! written before the failure keep their new values, later ones are never
//! touched.
//!
//! ## Usage
//!
//! ```rust
//! use reqfields::ParsingMap;
//! use std::collections::HashMap;
//!
//! # fn main() -> reqfields::Result<()> {
//! let query: HashMap<String, String> = HashMap::from([
//!     ("limit".to_owned(), "10".to_owned()),
//!     ("page".to_owned(), "1".to_owned()),
//!     ("fields".to_owned(), "a,b,c".to_owned()),
//! ]);
//!
//! let mut limit = 0i64;
//! let mut page = 0i64;
//! let mut fields: Vec<String> = Vec::new();
//!
//! ParsingMap::new()
//!     .int("limit", &mut limit)
//!     .int("page", &mut page)
//!     .comma_list("fields", &mut fields)
//!     .parse(&query)?;
//!
//! assert_eq!(limit, 10);
//! assert_eq!(page, 1);
//! assert_eq!(fields, ["a", "b", "c"]);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod map;
pub mod source;
pub mod target;

// Re-export the public surface
pub use map::ParsingMap;
pub use source::Source;
pub use target::{Target, TargetKind};

/// Result type alias for field extraction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by field conversions.
///
/// [`Error::WrongTargetType`] is a programmer error: the declared conversion
/// does not match the destination it was paired with, and it is reported
/// regardless of the raw input. The remaining variants are data errors on
/// untrusted input.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Conversion paired with a destination of a different kind
    #[error("wrong target type for conversion: expected {expected}, found {found}")]
    WrongTargetType {
        expected: TargetKind,
        found: TargetKind,
    },

    /// Field value is not a valid base-10 integer
    #[error("invalid integer '{value}': {source}")]
    InvalidInt {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Field value is not a valid float
    #[error("invalid float '{value}': {source}")]
    InvalidFloat {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Field value is not a valid RFC 3339 timestamp
    #[error("invalid RFC 3339 timestamp '{value}': {source}")]
    InvalidDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Epoch seconds outside the representable datetime range
    #[error("unix timestamp out of range: {value}")]
    TimestampOutOfRange { value: String },
}

impl Error {
    /// Create a wrong-target error
    pub fn wrong_target(expected: TargetKind, found: TargetKind) -> Self {
        Self::WrongTargetType { expected, found }
    }

    /// Create an invalid-integer error
    pub fn invalid_int(value: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::InvalidInt {
            value: value.into(),
            source,
        }
    }

    /// Create an invalid-float error
    pub fn invalid_float(value: impl Into<String>, source: std::num::ParseFloatError) -> Self {
        Self::InvalidFloat {
            value: value.into(),
            source,
        }
    }

    /// Create an invalid-datetime error
    pub fn invalid_datetime(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidDateTime {
            value: value.into(),
            source,
        }
    }

    /// Create a timestamp-out-of-range error
    pub fn timestamp_out_of_range(value: impl Into<String>) -> Self {
        Self::TimestampOutOfRange {
            value: value.into(),
        }
    }
}
