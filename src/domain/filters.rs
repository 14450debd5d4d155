//! Filter expressions for `fip ls`
//!
//! Filters are collected from repeated `-f name=value` flags and forwarded
//! to the service, which does the actual narrowing.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::DomainError;

/// Set of filter values keyed by lowercased filter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    fields: BTreeMap<String, BTreeSet<String>>,
}

impl FilterArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build filter args from raw flag values, failing on the first malformed one.
    pub fn from_flags<I, S>(flags: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = Self::new();
        for flag in flags {
            args.parse_flag(flag.as_ref())?;
        }
        Ok(args)
    }

    /// Parse a single `name=value` expression into this set.
    ///
    /// An empty expression is ignored. The name is trimmed and lowercased,
    /// the value is trimmed. Only the first `=` separates name from value.
    pub fn parse_flag(&mut self, flag: &str) -> Result<(), DomainError> {
        if flag.is_empty() {
            return Ok(());
        }
        let Some((name, value)) = flag.split_once('=') else {
            return Err(DomainError::InvalidFilter {
                filter: flag.to_string(),
            });
        };
        self.add(name.trim().to_lowercase(), value.trim().to_string());
        Ok(())
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_default()
            .insert(value.into());
    }

    /// Values for a filter name, sorted.
    pub fn get(&self, name: &str) -> Vec<&str> {
        self.fields
            .get(name)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of distinct filter names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Wire form: `{"name":{"value":true}}`.
impl Serialize for FilterArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, values) in &self.fields {
            let flags: BTreeMap<&str, bool> = values.iter().map(|v| (v.as_str(), true)).collect();
            map.serialize_entry(name, &flags)?;
        }
        map.end()
    }
}
