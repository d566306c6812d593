//! Experiment configuration model
//!
//! The configuration blob is a JSON object mapping experiment names to
//! `{"isActive": bool, "values": object|null}` entries. Parsing is strict at
//! the top level (the blob must be an object) and lenient per entry, so one
//! badly shaped experiment never hides the others.

use crate::error::{Error, Result};
use crate::types::{Experiment, ExperimentEntry, ExperimentValues};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Parsed set of experiments keyed by name
///
/// Deserializing through serde applies the same validation as
/// [`ExperimentConfig::parse`].
///
/// # Example
///
/// ```rust
/// use switchboard::ExperimentConfig;
///
/// let json = r#"{
///     "active-experiment": {"isActive": true, "values": {"foo": true}},
///     "inactive-experiment": {"isActive": false, "values": null}
/// }"#;
///
/// let config = ExperimentConfig::parse(json)?;
/// assert!(config.is_active("active-experiment"));
/// assert!(!config.is_active("inactive-experiment"));
/// assert!(!config.is_active("missing"));
/// # Ok::<(), switchboard::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ExperimentConfig {
    experiments: BTreeMap<String, Experiment>,
}

impl ExperimentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration blob
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if `json` is not valid JSON
    /// - [`Error::InvalidConfig`] if the top-level value is not an object
    ///
    /// Entries that are not objects are skipped; see [`Experiment::from_value`]
    /// for how individual fields are validated.
    pub fn parse(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Build a configuration from an already parsed JSON value
    ///
    /// Same rules as [`ExperimentConfig::parse`], minus the JSON syntax check.
    pub fn from_value(root: Value) -> Result<Self> {
        let entries = match root {
            Value::Object(entries) => entries,
            other => {
                return Err(Error::InvalidConfig(format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut experiments = BTreeMap::new();
        for (name, entry) in entries {
            match Experiment::from_value(&entry) {
                Some(experiment) => {
                    experiments.insert(name, experiment);
                }
                None => {
                    log::debug!(
                        "Skipping experiment '{}': expected an object, found {}",
                        name,
                        json_kind(&entry)
                    );
                }
            }
        }

        Ok(Self { experiments })
    }

    /// Serialize back to the wire format
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, name: &str) -> Option<&Experiment> {
        self.experiments.get(name)
    }

    /// Whether `name` exists and is flagged active
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(|e| e.is_active)
    }

    /// Values payload for `name`, if the experiment exists and carries one
    pub fn values(&self, name: &str) -> Option<&ExperimentValues> {
        self.get(name).and_then(|e| e.values.as_ref())
    }

    /// Names of every active experiment, sorted
    pub fn active_names(&self) -> BTreeSet<String> {
        self.experiments
            .iter()
            .filter(|(_, e)| e.is_active)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Insert or replace an experiment, returning the previous entry
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        experiment: Experiment,
    ) -> Option<Experiment> {
        self.experiments.insert(name.into(), experiment)
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Experiment)> {
        self.experiments.iter()
    }

    /// Flatten into name-tagged entries for array output
    pub fn entries(&self) -> Vec<ExperimentEntry> {
        self.experiments
            .iter()
            .map(|(name, experiment)| ExperimentEntry {
                name: name.clone(),
                experiment: experiment.clone(),
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for ExperimentConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let root = Value::deserialize(deserializer)?;
        Self::from_value(root).map_err(serde::de::Error::custom)
    }
}

impl FromIterator<(String, Experiment)> for ExperimentConfig {
    fn from_iter<I: IntoIterator<Item = (String, Experiment)>>(iter: I) -> Self {
        Self {
            experiments: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
