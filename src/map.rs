//! The ordered parsing map: construction and execution.
//!
//! A [`ParsingMap`] is built once with the fields to extract, then executed
//! against one or more sources. Construction consumes and returns the map so
//! calls chain; execution walks the declared fields in order and stops at
//! the first conversion failure.

use crate::convert::{self, ConvertFn};
use crate::source::Source;
use crate::target::Target;
use crate::Result;
use chrono::{DateTime, Local};
use tracing::trace;

/// One declared field: lookup key, conversion, destination.
///
/// Fields are immutable once appended. Duplicate keys are legal and simply
/// re-invoke their conversion in declaration order.
struct Field<'a> {
    key: String,
    convert: ConvertFn,
    target: Target<'a>,
}

/// An ordered set of field declarations with a fluent construction API.
///
/// The map holds mutable borrows of its destinations, so the borrow checker
/// enforces what the contract requires: construction finishes before
/// execution starts, and concurrent executions need separate maps over
/// disjoint destinations. A fully built map can be executed any number of
/// times against different sources.
///
/// ```rust
/// use reqfields::{convert, ParsingMap, Target};
/// use std::collections::HashMap;
///
/// # fn main() -> reqfields::Result<()> {
/// let form: HashMap<&str, &str> = HashMap::from([("limit", "10"), ("q", "rust")]);
///
/// let mut limit = 0i64;
/// let mut query = String::new();
///
/// // Generic `add` and the typed helpers are interchangeable
/// ParsingMap::new()
///     .add("limit", convert::to_int, Target::Int(&mut limit))
///     .string("q", &mut query)
///     .parse(&form)?;
///
/// assert_eq!(limit, 10);
/// assert_eq!(query, "rust");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ParsingMap<'a> {
    fields: Vec<Field<'a>>,
}

impl<'a> ParsingMap<'a> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create an empty map pre-sized for an expected number of fields.
    pub fn with_capacity(fields: usize) -> Self {
        Self {
            fields: Vec::with_capacity(fields),
        }
    }

    /// Append a field declaration, pairing `key` with a conversion and the
    /// destination it writes to.
    pub fn add(mut self, key: impl Into<String>, convert: ConvertFn, target: Target<'a>) -> Self {
        self.fields.push(Field {
            key: key.into(),
            convert,
            target,
        });
        self
    }

    /// Declare a verbatim string field.
    pub fn string(self, key: impl Into<String>, dest: &'a mut String) -> Self {
        self.add(key, convert::to_string, Target::String(dest))
    }

    /// Declare a comma-separated list field.
    pub fn comma_list(self, key: impl Into<String>, dest: &'a mut Vec<String>) -> Self {
        self.add(key, convert::to_comma_list, Target::StringList(dest))
    }

    /// Declare a boolean field (`"on"`, `"1"`, `"true"` are true).
    pub fn boolean(self, key: impl Into<String>, dest: &'a mut bool) -> Self {
        self.add(key, convert::to_bool, Target::Bool(dest))
    }

    /// Declare a base-10 integer field.
    pub fn int(self, key: impl Into<String>, dest: &'a mut i64) -> Self {
        self.add(key, convert::to_int, Target::Int(dest))
    }

    /// Declare a 64-bit float field.
    pub fn float(self, key: impl Into<String>, dest: &'a mut f64) -> Self {
        self.add(key, convert::to_float, Target::Float(dest))
    }

    /// Declare a unix-timestamp field written to an instant.
    pub fn unix_time(self, key: impl Into<String>, dest: &'a mut DateTime<Local>) -> Self {
        self.add(key, convert::to_unix_time, Target::Time(dest))
    }

    /// Declare a unix-timestamp field written to an optional instant.
    pub fn unix_time_opt(
        self,
        key: impl Into<String>,
        dest: &'a mut Option<DateTime<Local>>,
    ) -> Self {
        self.add(key, convert::to_unix_time_opt, Target::OptTime(dest))
    }

    /// Declare an RFC 3339 timestamp field written to an instant.
    pub fn rfc3339_time(self, key: impl Into<String>, dest: &'a mut DateTime<Local>) -> Self {
        self.add(key, convert::to_rfc3339_time, Target::Time(dest))
    }

    /// Declare an RFC 3339 timestamp field written to an optional instant.
    pub fn rfc3339_time_opt(
        self,
        key: impl Into<String>,
        dest: &'a mut Option<DateTime<Local>>,
    ) -> Self {
        self.add(key, convert::to_rfc3339_time_opt, Target::OptTime(dest))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether any fields have been declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Execute the map against `source`.
    ///
    /// Fields are processed in declaration order. An absent or empty value
    /// skips the field without invoking its conversion. The first conversion
    /// failure aborts the pass and is returned: destinations written before
    /// it keep their new values, destinations after it are never evaluated.
    pub fn parse<S: Source + ?Sized>(&mut self, source: &S) -> Result<()> {
        for field in &mut self.fields {
            let raw = source.get(&field.key);
            if raw.is_empty() {
                trace!(key = %field.key, "field absent or empty, skipped");
                continue;
            }
            trace!(key = %field.key, value = %raw, "converting field");
            (field.convert)(&raw, field.target.reborrow())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, TargetKind};
    use std::collections::HashMap;

    fn form(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_typed_helpers_populate_all_fields() {
        let source = form(&[
            ("limit", "10"),
            ("page", "1"),
            ("fields", "a,b,c"),
            ("f", "1.5"),
            ("b", "true"),
            ("q", "hello"),
        ]);

        let mut limit = 0i64;
        let mut page = 0i64;
        let mut fields: Vec<String> = Vec::new();
        let mut f = 0f64;
        let mut b = false;
        let mut q = String::new();

        ParsingMap::new()
            .int("limit", &mut limit)
            .int("page", &mut page)
            .comma_list("fields", &mut fields)
            .float("f", &mut f)
            .boolean("b", &mut b)
            .string("q", &mut q)
            .parse(&source)
            .unwrap();

        assert_eq!(limit, 10);
        assert_eq!(page, 1);
        assert_eq!(fields, ["a", "b", "c"]);
        assert_eq!(f, 1.5);
        assert!(b);
        assert_eq!(q, "hello");
    }

    #[test]
    fn test_generic_add_matches_typed_helper() {
        let source = form(&[("limit", "10")]);

        let mut via_add = 0i64;
        let mut via_helper = 0i64;

        ParsingMap::new()
            .add("limit", convert::to_int, Target::Int(&mut via_add))
            .int("limit", &mut via_helper)
            .parse(&source)
            .unwrap();

        assert_eq!(via_add, via_helper);
    }

    #[test]
    fn test_first_failure_aborts_pass() {
        let source = form(&[("a", "1"), ("b", "oops"), ("c", "3")]);

        let mut a = 0i64;
        let mut b = 0i64;
        let mut c = 0i64;

        let err = ParsingMap::new()
            .int("a", &mut a)
            .int("b", &mut b)
            .int("c", &mut c)
            .parse(&source)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInt { ref value, .. } if value == "oops"));
        assert_eq!(a, 1, "field before the failure keeps its converted value");
        assert_eq!(b, 0, "failing field stays at its initial value");
        assert_eq!(c, 0, "field after the failure is never evaluated");
    }

    #[test]
    fn test_absent_and_empty_fields_are_skipped() {
        let source = form(&[("present", ""), ("limit", "10")]);

        let mut present = -1i64;
        let mut absent = -1i64;
        let mut limit = 0i64;

        ParsingMap::new()
            .int("present", &mut present)
            .int("absent", &mut absent)
            .int("limit", &mut limit)
            .parse(&source)
            .unwrap();

        assert_eq!(present, -1);
        assert_eq!(absent, -1);
        assert_eq!(limit, 10);
    }

    #[test]
    fn test_malformed_value_leaves_destination_untouched() {
        let source = form(&[("limit", "abc")]);

        let mut limit = 0i64;
        let err = ParsingMap::new()
            .int("limit", &mut limit)
            .parse(&source)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInt { .. }));
        assert_eq!(limit, 0);
    }

    #[test]
    fn test_duplicate_keys_convert_in_declaration_order() {
        let source = form(&[("v", "7")]);

        let mut first = 0i64;
        let mut second = String::new();

        ParsingMap::new()
            .int("v", &mut first)
            .string("v", &mut second)
            .parse(&source)
            .unwrap();

        assert_eq!(first, 7);
        assert_eq!(second, "7");
    }

    #[test]
    fn test_mismatched_pairing_reports_wrong_target() {
        let source = form(&[("limit", "10")]);

        let mut wrong = String::new();
        let err = ParsingMap::new()
            .add("limit", convert::to_int, Target::String(&mut wrong))
            .parse(&source)
            .unwrap_err();

        assert!(matches!(
            err,
            Error::WrongTargetType {
                expected: TargetKind::Int,
                found: TargetKind::String,
            }
        ));
    }

    #[test]
    fn test_map_is_reusable_across_sources() {
        let mut limit = 0i64;
        let mut map = ParsingMap::new().int("limit", &mut limit);

        map.parse(&form(&[("limit", "10")])).unwrap();
        assert_eq!(limit_snapshot(&map), 10);

        map.parse(&form(&[("limit", "20")])).unwrap();
        assert_eq!(limit_snapshot(&map), 20);

        // Empty source leaves the previous value in place
        map.parse(&form(&[])).unwrap();
        assert_eq!(limit_snapshot(&map), 20);
    }

    // Peek at the single Int target without ending the map's borrow.
    fn limit_snapshot(map: &ParsingMap<'_>) -> i64 {
        match &map.fields[0].target {
            Target::Int(slot) => **slot,
            other => panic!("expected Int target, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_capacity_hint_and_len() {
        let mut a = 0i64;
        let map = ParsingMap::with_capacity(4).int("a", &mut a);

        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert!(ParsingMap::new().is_empty());
    }

    #[test]
    fn test_time_helpers_write_both_shapes() {
        use chrono::{TimeZone, Utc};

        let source = form(&[
            ("ts", "1437743020"),
            ("ts_opt", "1437743020"),
            ("t", "2006-01-02T15:04:05Z"),
            ("t_opt", "2006-01-02T15:04:05Z"),
        ]);

        let mut ts = DateTime::<Local>::default();
        let mut ts_opt: Option<DateTime<Local>> = None;
        let mut t = DateTime::<Local>::default();
        let mut t_opt: Option<DateTime<Local>> = None;

        ParsingMap::new()
            .unix_time("ts", &mut ts)
            .unix_time_opt("ts_opt", &mut ts_opt)
            .rfc3339_time("t", &mut t)
            .rfc3339_time_opt("t_opt", &mut t_opt)
            .parse(&source)
            .unwrap();

        let expect_ts = Utc.timestamp_opt(1_437_743_020, 0).unwrap();
        let expect_t = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();

        assert_eq!(ts, expect_ts);
        assert_eq!(ts_opt.unwrap(), expect_ts);
        assert_eq!(t, expect_t);
        assert_eq!(t_opt.unwrap(), expect_t);
    }
}
