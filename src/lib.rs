//! # switchboard - Experiment Configuration Store
//!
//! This library persists the configuration of named feature experiments and
//! answers experiment questions against it. The configuration is a JSON blob
//! mapping experiment names to an active flag and an optional values payload,
//! stored next to the URL of the server it came from inside one settings
//! namespace.
//!
//! ## Features
//!
//! - Store and read back the config server URL and raw experiment JSON
//! - Check whether an experiment is active and read its values payload
//! - List active experiments, or filter experiments by glob patterns
//! - Stable per-installation device UUID
//! - Pluggable storage: in-memory for tests, JSON file per namespace on disk
//! - Every lookup degrades to `None`/`false`/empty instead of failing
//!
//! ## Quick Start
//!
//! ### Evaluating Experiments
//!
//! ```rust
//! use switchboard::{ConfigStore, MemoryStore};
//!
//! let store = ConfigStore::new(MemoryStore::new());
//! store.set_config_json(r#"{
//!     "active-experiment": {"isActive": true, "values": {"foo": true}},
//!     "inactive-experiment": {"isActive": false, "values": null}
//! }"#);
//!
//! assert!(store.is_in_experiment("active-experiment"));
//! assert!(!store.is_in_experiment("inactive-experiment"));
//! assert!(!store.is_in_experiment("missing"));
//!
//! let values = store.experiment_values("active-experiment").unwrap();
//! assert_eq!(values["foo"], true);
//!
//! let active = store.active_experiments();
//! assert_eq!(active.len(), 1);
//! ```
//!
//! ### Persisting to Disk
//!
//! ```rust
//! use switchboard::{ConfigStore, StoreConfig};
//!
//! let dir = tempfile::TempDir::new()?;
//! let config = StoreConfig::in_directory(dir.path());
//!
//! let store = ConfigStore::open(&config)?;
//! store.set_server_url("https://example.com/experiments.json");
//!
//! let reopened = ConfigStore::open(&config)?;
//! assert_eq!(
//!     reopened.server_url().as_deref(),
//!     Some("https://example.com/experiments.json")
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Querying Experiments
//!
//! ```rust
//! use switchboard::{query_experiments, ExperimentConfig};
//!
//! let config = ExperimentConfig::parse(r#"{
//!     "onboarding-v2": {"isActive": true},
//!     "onboarding-tour": {"isActive": false},
//!     "reader-mode": {"isActive": true}
//! }"#)?;
//!
//! let onboarding = query_experiments(&config, &["onboarding-*"])?;
//! assert_eq!(onboarding.len(), 2);
//! # Ok::<(), switchboard::Error>(())
//! ```
//!
//! ## Storage Layout
//!
//! [`FileStore`] writes `<directory>/<namespace>.json`. The default namespace
//! is [`DEFAULT_NAMESPACE`] and the directory is resolved by
//! [`resolve_store_directory`]:
//! - an explicit path, if given
//! - `$SWITCHBOARD_HOME`
//! - **Linux**: `$XDG_CONFIG_HOME/switchboard` or `~/.config/switchboard`
//! - **macOS**: `~/Library/Application Support/switchboard`
//! - **Windows**: `%APPDATA%\switchboard`
//!
//! ## Error Handling
//!
//! [`ConfigStore`] methods never fail; problems are reported through the
//! `log` facade. Lower-level functions return [`Result<T, Error>`]:
//!
//! ```rust
//! use switchboard::{Error, ExperimentConfig};
//!
//! match ExperimentConfig::parse("[]") {
//!     Ok(_) => println!("Parsed successfully"),
//!     Err(Error::InvalidConfig(message)) => eprintln!("Bad shape: {}", message),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

// Re-export all public types at crate root
pub use types::{Experiment, ExperimentEntry, ExperimentValues};

// Re-export error types
pub use error::{Error, Result};

pub use config::{resolve_store_directory, StoreConfig, DEFAULT_NAMESPACE, STORE_DIR_ENV};
pub use config_store::{ConfigStore, CONFIG_JSON_KEY, DEVICE_UUID_KEY, SERVER_URL_KEY};
pub use experiment::ExperimentConfig;
pub use file_store::FileStore;
pub use query::query_experiments;
pub use settings::{MemoryStore, SettingsStore};

// All modules are private - use re-exports above for public API
mod config;
mod config_store;
mod error;
mod experiment;
mod file_store;
mod query;
mod settings;
mod types;
