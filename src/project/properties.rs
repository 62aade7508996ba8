//! Evaluated project properties
//!
//! MSBuild property names are case-insensitive. Values are kept verbatim,
//! including any `$(...)` expressions, and are interpreted only by the
//! component that consumes them.

use crate::config::ConfigError;
use std::collections::BTreeMap;
use tracing::warn;

/// Case-insensitive property bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties {
    // lowercased name -> (declared name, value)
    entries: BTreeMap<String, (String, String)>,
}

impl BuildProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any earlier definition regardless of case.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries
            .insert(name.to_ascii_lowercase(), (name, value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    /// Returns the property unless it is missing or blank.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Like [`get_non_empty`](Self::get_non_empty), but a value still holding
    /// a `$(...)` reference counts as unset since it cannot be evaluated here.
    pub fn get_evaluated(&self, name: &str) -> Option<&str> {
        let value = self.get_non_empty(name)?;
        if has_unevaluated_reference(value) {
            warn!(
                property = name,
                value = value,
                "Ignoring property with unevaluated reference"
            );
            return None;
        }
        Some(value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// MSBuild-style boolean: only a literal `true`/`false` (any case) counts,
    /// everything else falls back to `default`.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        match self.get_non_empty(name) {
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }

    /// Splits a `;`-separated list property, dropping blank segments.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|v| {
                v.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Layers `other` on top of `self`. Global properties win over values
    /// declared in the project file.
    pub fn overlay(&mut self, other: &BuildProperties) {
        for (key, entry) in &other.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses `KEY=VALUE` assignments as given on the command line.
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, ConfigError> {
        let mut properties = Self::new();
        for assignment in assignments {
            let (name, value) = parse_assignment(assignment.as_ref())?;
            properties.set(name, value);
        }
        Ok(properties)
    }
}

pub(crate) fn has_unevaluated_reference(value: &str) -> bool {
    value.contains("$(")
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str), ConfigError> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidProperty(assignment.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidProperty(assignment.to_string()));
    }
    Ok((name, value))
}
