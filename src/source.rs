//! The read-only lookup capability that supplies raw field values.
//!
//! Anything that resolves string keys to string values can drive a
//! [`ParsingMap`](crate::ParsingMap): decoded HTTP form values, decoded query
//! strings, plain maps, environment readers. Absence has no error path at
//! this layer — a missing key and an empty value are indistinguishable by
//! contract, and both cause the engine to skip the field.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Read-only string-keyed lookup.
///
/// Values are returned as [`Cow`] so map-backed sources can hand out borrows
/// while computing sources (environment readers, decoders) can return owned
/// strings without an intermediate cache.
pub trait Source {
    /// Return the value for `key`, or the empty string when the key is
    /// absent or maps to an empty value.
    fn get(&self, key: &str) -> Cow<'_, str>;
}

impl Source for HashMap<String, String> {
    fn get(&self, key: &str) -> Cow<'_, str> {
        match HashMap::get(self, key) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => Cow::Borrowed(""),
        }
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Cow<'_, str> {
        match BTreeMap::get(self, key) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => Cow::Borrowed(""),
        }
    }
}

impl<'v> Source for HashMap<&'v str, &'v str> {
    fn get(&self, key: &str) -> Cow<'_, str> {
        Cow::Borrowed(HashMap::get(self, key).copied().unwrap_or(""))
    }
}
