use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Arbitrary key-value payload attached to an experiment
pub type ExperimentValues = serde_json::Map<String, Value>;

pub(crate) const IS_ACTIVE_FIELD: &str = "isActive";
pub(crate) const VALUES_FIELD: &str = "values";

/// A single named experiment as stored in the configuration blob
///
/// Serialized as `{"isActive": bool, "values": object|null}`. Deserializing
/// goes through [`Experiment::from_value`], so odd fields degrade instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Experiment {
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub values: Option<ExperimentValues>,
}

impl Experiment {
    /// Create an experiment with no values payload
    pub fn new(is_active: bool) -> Self {
        Self {
            is_active,
            values: None,
        }
    }

    /// Attach a values payload
    pub fn with_values(mut self, values: ExperimentValues) -> Self {
        self.values = Some(values);
        self
    }

    /// Build an experiment from an untyped JSON entry
    ///
    /// Returns `None` when the entry is not a JSON object. Inside an object,
    /// a missing or non-boolean `isActive` reads as inactive and a `values`
    /// field that is missing, null or not an object reads as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let is_active = fields
            .get(IS_ACTIVE_FIELD)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let values = fields.get(VALUES_FIELD).and_then(Value::as_object).cloned();

        Some(Self { is_active, values })
    }
}

impl<'de> Deserialize<'de> for Experiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected an experiment object"))
    }
}

/// Representation for array output format
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentEntry {
    pub name: String,
    #[serde(flatten)]
    pub experiment: Experiment,
}
