//! Destination handles for field conversions.
//!
//! A [`Target`] is a mutable borrow of a caller-owned value, tagged with its
//! kind so a conversion can verify it was pointed at the destination type it
//! expects before touching anything. The set of kinds is closed: one variant
//! per destination type the standard conversion library writes to.

use chrono::{DateTime, Local};
use std::fmt;

/// A typed destination for one field conversion.
///
/// The engine never allocates or frees the underlying value, it only writes
/// through the borrow. A conversion handed a target of the wrong variant
/// reports [`Error::WrongTargetType`](crate::Error::WrongTargetType) and
/// leaves the destination untouched.
#[derive(Debug)]
pub enum Target<'a> {
    /// Verbatim string copy
    String(&'a mut String),
    /// Ordered list of strings
    StringList(&'a mut Vec<String>),
    /// Boolean flag
    Bool(&'a mut bool),
    /// Base-10 signed integer
    Int(&'a mut i64),
    /// 64-bit float
    Float(&'a mut f64),
    /// Instant in the local timezone
    Time(&'a mut DateTime<Local>),
    /// Optional instant, set to `Some` on conversion
    OptTime(&'a mut Option<DateTime<Local>>),
}

impl Target<'_> {
    /// The kind tag for this target, used in error reporting.
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::String(_) => TargetKind::String,
            Target::StringList(_) => TargetKind::StringList,
            Target::Bool(_) => TargetKind::Bool,
            Target::Int(_) => TargetKind::Int,
            Target::Float(_) => TargetKind::Float,
            Target::Time(_) => TargetKind::Time,
            Target::OptTime(_) => TargetKind::OptTime,
        }
    }

    /// Reborrow the target for the duration of one conversion call.
    ///
    /// A [`ParsingMap`](crate::ParsingMap) stores its targets for the life
    /// of the map but hands each conversion a short-lived borrow, which is
    /// what lets the same map run against multiple sources.
    pub fn reborrow(&mut self) -> Target<'_> {
        match self {
            Target::String(slot) => Target::String(&mut **slot),
            Target::StringList(slot) => Target::StringList(&mut **slot),
            Target::Bool(slot) => Target::Bool(&mut **slot),
            Target::Int(slot) => Target::Int(&mut **slot),
            Target::Float(slot) => Target::Float(&mut **slot),
            Target::Time(slot) => Target::Time(&mut **slot),
            Target::OptTime(slot) => Target::OptTime(&mut **slot),
        }
    }
}

/// Kind tag naming each [`Target`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    String,
    StringList,
    Bool,
    Int,
    Float,
    Time,
    OptTime,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::String => "string",
            TargetKind::StringList => "string list",
            TargetKind::Bool => "bool",
            TargetKind::Int => "integer",
            TargetKind::Float => "float",
            TargetKind::Time => "datetime",
            TargetKind::OptTime => "optional datetime",
        };
        f.write_str(name)
    }
}
