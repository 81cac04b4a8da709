//! Standard conversion library.
//!
//! Every conversion follows the same contract, [`ConvertFn`]: check that the
//! target is the variant it writes to, then parse the raw value, then write
//! through the target. The variant check always comes first, so pairing a
//! conversion with the wrong destination reports
//! [`Error::WrongTargetType`](crate::Error::WrongTargetType) no matter what
//! the raw input looks like.
//!
//! Conversions are pure functions with no hidden state. The engine never
//! invokes them for absent or empty values, so `raw` is always non-empty.

use crate::target::{Target, TargetKind};
use crate::{Error, Result};
use chrono::{DateTime, Local, TimeZone};

/// The uniform conversion contract: raw value in, typed destination out.
pub type ConvertFn = fn(&str, Target<'_>) -> Result<()>;

/// Split `raw` on `,` into a list of strings, without trimming.
///
/// Never fails on content: a value with no commas yields a one-element list.
pub fn to_comma_list(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::StringList(slot) => {
            *slot = raw.split(',').map(str::to_owned).collect();
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::StringList, other.kind())),
    }
}

/// Copy `raw` verbatim. Never fails on content.
pub fn to_string(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::String(slot) => {
            *slot = raw.to_owned();
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::String, other.kind())),
    }
}

/// Parse `raw` as a boolean flag.
///
/// `"on"` and `"1"` are true (HTML checkboxes submit `on`), `"0"` is false,
/// and `"true"` is true in any case combination. Anything else is false —
/// malformed input is never an error for this conversion, only a mismatched
/// target is.
pub fn to_bool(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::Bool(slot) => {
            *slot = match raw {
                "on" | "1" => true,
                "0" => false,
                _ => raw.eq_ignore_ascii_case("true"),
            };
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::Bool, other.kind())),
    }
}

/// Parse `raw` as a base-10 signed integer.
pub fn to_int(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::Int(slot) => {
            *slot = raw.parse().map_err(|e| Error::invalid_int(raw, e))?;
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::Int, other.kind())),
    }
}

/// Parse `raw` as a 64-bit float.
pub fn to_float(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::Float(slot) => {
            *slot = raw.parse().map_err(|e| Error::invalid_float(raw, e))?;
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::Float, other.kind())),
    }
}

/// Parse `raw` as base-10 seconds since the Unix epoch, as an instant in the
/// local timezone.
pub fn to_unix_time(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::Time(slot) => {
            *slot = parse_unix(raw)?;
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::Time, other.kind())),
    }
}

/// Like [`to_unix_time`], but writing `Some(instant)` through an optional
/// destination.
pub fn to_unix_time_opt(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::OptTime(slot) => {
            *slot = Some(parse_unix(raw)?);
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::OptTime, other.kind())),
    }
}

/// Parse `raw` per the RFC 3339 timestamp grammar, as an instant converted
/// to the local timezone.
pub fn to_rfc3339_time(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::Time(slot) => {
            *slot = parse_rfc3339(raw)?;
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::Time, other.kind())),
    }
}

/// Like [`to_rfc3339_time`], but writing `Some(instant)` through an optional
/// destination.
pub fn to_rfc3339_time_opt(raw: &str, target: Target<'_>) -> Result<()> {
    match target {
        Target::OptTime(slot) => {
            *slot = Some(parse_rfc3339(raw)?);
            Ok(())
        }
        other => Err(Error::wrong_target(TargetKind::OptTime, other.kind())),
    }
}

fn parse_unix(raw: &str) -> Result<DateTime<Local>> {
    let secs: i64 = raw.parse().map_err(|e| Error::invalid_int(raw, e))?;
    Local
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| Error::timestamp_out_of_range(raw))
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| Error::invalid_datetime(raw, e))
}
