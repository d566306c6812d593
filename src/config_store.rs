//! Experiment configuration store
//!
//! [`ConfigStore`] keeps the config server URL and the raw experiment JSON in
//! a [`SettingsStore`] namespace and answers experiment queries against the
//! stored JSON. Apart from [`ConfigStore::try_device_uuid`], nothing here
//! returns an error to the caller: storage failures are logged and reads fall
//! back to `None`, `false` or an empty set.
//!
//! The two fields are written independently. A reader racing two writers may
//! observe the URL from one writer and the JSON from the other.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::experiment::ExperimentConfig;
use crate::file_store::FileStore;
use crate::settings::SettingsStore;
use crate::types::ExperimentValues;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use uuid::Uuid;

/// Key holding the config server URL
pub const SERVER_URL_KEY: &str = "dynamic-config-server-url";

/// Key holding the raw experiment configuration JSON
pub const CONFIG_JSON_KEY: &str = "dynamic-config";

/// Key holding the persisted device UUID
pub const DEVICE_UUID_KEY: &str = "device-uuid";

/// Experiment configuration persisted in a settings namespace
///
/// # Example
///
/// ```rust
/// use switchboard::{ConfigStore, MemoryStore};
///
/// let store = ConfigStore::new(MemoryStore::new());
/// store.set_config_json(r#"{"new-tabs":{"isActive":true,"values":{"limit":5}}}"#);
///
/// assert!(store.is_in_experiment("new-tabs"));
/// assert!(store.has_experiment_values("new-tabs"));
/// assert_eq!(store.experiment_values("new-tabs").unwrap()["limit"], 5);
/// assert!(!store.is_in_experiment("unknown"));
/// ```
#[derive(Debug)]
pub struct ConfigStore<S = FileStore> {
    settings: S,
    device_uuid: OnceLock<Uuid>,
    fallback_uuid: OnceLock<Uuid>,
}

impl ConfigStore<FileStore> {
    /// Open a file-backed store described by `config`
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be resolved or the namespace is not a
    /// valid file name. Missing files are not an error.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let directory = config.resolved_directory()?;
        let settings = FileStore::open(directory, &config.namespace)?;
        log::debug!("Opened settings at {}", settings.path().display());
        Ok(Self::new(settings))
    }
}

impl<S: SettingsStore> ConfigStore<S> {
    pub fn new(settings: S) -> Self {
        Self {
            settings,
            device_uuid: OnceLock::new(),
            fallback_uuid: OnceLock::new(),
        }
    }

    /// Underlying settings namespace
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Last stored config server URL
    pub fn server_url(&self) -> Option<String> {
        self.read(SERVER_URL_KEY)
    }

    /// Overwrite the config server URL
    pub fn set_server_url(&self, url: &str) {
        self.write(SERVER_URL_KEY, url);
    }

    /// Last stored experiment JSON, exactly as it was set
    pub fn config_json(&self) -> Option<String> {
        self.read(CONFIG_JSON_KEY)
    }

    /// Overwrite the experiment JSON
    ///
    /// The string is stored verbatim. Malformed JSON is accepted here and
    /// simply evaluates as "no experiments".
    pub fn set_config_json(&self, json: &str) {
        self.write(CONFIG_JSON_KEY, json);
    }

    /// Serialize `config` and store it as the experiment JSON
    pub fn set_experiments(&self, config: &ExperimentConfig) {
        match config.to_json() {
            Ok(json) => self.set_config_json(&json),
            Err(e) => log::warn!("Failed to serialize experiment configuration: {}", e),
        }
    }

    /// Parsed experiment configuration, empty if missing or malformed
    pub fn experiments(&self) -> ExperimentConfig {
        let Some(json) = self.config_json() else {
            return ExperimentConfig::new();
        };

        ExperimentConfig::parse(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed experiment configuration: {}", e);
            ExperimentConfig::new()
        })
    }

    /// Whether experiment `name` exists and is active
    pub fn is_in_experiment(&self, name: &str) -> bool {
        self.experiments().is_active(name)
    }

    /// Whether experiment `name` exists and carries a non-null values object
    pub fn has_experiment_values(&self, name: &str) -> bool {
        self.experiments().values(name).is_some()
    }

    /// Values payload of experiment `name`
    pub fn experiment_values(&self, name: &str) -> Option<ExperimentValues> {
        self.experiments().values(name).cloned()
    }

    /// Names of all active experiments
    pub fn active_experiments(&self) -> BTreeSet<String> {
        self.experiments().active_names()
    }

    /// Stable identifier for this installation
    ///
    /// Returns the stored UUID, or generates, stores and returns a random one
    /// if none is stored or the stored value does not parse. The read and
    /// the write happen as one store update, so handles racing on an empty
    /// namespace all end up with the same UUID.
    ///
    /// If the UUID cannot be persisted, the failure is logged and a random
    /// UUID is returned that stays fixed for this store only. Use
    /// [`try_device_uuid`](Self::try_device_uuid) to observe the failure.
    pub fn device_uuid(&self) -> Uuid {
        self.try_device_uuid().unwrap_or_else(|e| {
            log::error!("Device UUID could not be persisted, using a temporary one: {}", e);
            *self.fallback_uuid.get_or_init(Uuid::new_v4)
        })
    }

    /// Like [`device_uuid`](Self::device_uuid), but fails when storage does
    ///
    /// A successful result is cached; failures are retried on the next call.
    pub fn try_device_uuid(&self) -> Result<Uuid> {
        if let Some(uuid) = self.device_uuid.get() {
            return Ok(*uuid);
        }

        let stored = self
            .settings
            .update_string(DEVICE_UUID_KEY, &mut |current: Option<&str>| match current {
                Some(value) if Uuid::parse_str(value).is_ok() => value.to_string(),
                Some(value) => {
                    log::warn!("Replacing unparsable device UUID '{}'", value);
                    Uuid::new_v4().to_string()
                }
                None => Uuid::new_v4().to_string(),
            })?;

        let uuid = Uuid::parse_str(&stored)
            .map_err(|e| Error::InvalidDeviceUuid(format!("'{}': {}", stored, e)))?;
        Ok(*self.device_uuid.get_or_init(|| uuid))
    }

    fn read(&self, key: &str) -> Option<String> {
        self.settings.get_string(key).unwrap_or_else(|e| {
            log::warn!("Failed to read setting '{}': {}", key, e);
            None
        })
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.settings.put_string(key, value) {
            log::warn!("Failed to write setting '{}': {}", key, e);
        }
    }
}
