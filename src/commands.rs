use crate::cli::{self, Commands};
use switchboard::{query_experiments, ConfigStore, ExperimentConfig, StoreConfig};

/// Dispatch a parsed command against the configured store
pub fn run(cli: cli::Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig {
        directory: cli.store_dir,
        namespace: cli.namespace,
    };

    let store = ConfigStore::open(&config).map_err(|e| {
        anyhow::anyhow!(
            "Failed to open settings namespace '{}': {}. Check --store-dir or ${}.",
            config.namespace,
            e,
            switchboard::STORE_DIR_ENV
        )
    })?;

    match cli.command {
        Commands::ServerUrl { set } => server_url(&store, set),
        Commands::Config { set, file } => config_json(&store, set, file),
        Commands::Check { name } => {
            println!("{}", store.is_in_experiment(&name));
            Ok(())
        }
        Commands::Values { name } => experiment_values(&store, &name),
        Commands::Active => {
            let json = serde_json::to_string_pretty(&store.active_experiments())?;
            println!("{}", json);
            Ok(())
        }
        Commands::List {
            queries,
            output_type,
        } => list_experiments(&store, &queries, output_type),
        Commands::DeviceId => {
            println!("{}", store.device_uuid());
            Ok(())
        }
    }
}

/// Show or replace the config server URL
fn server_url(store: &ConfigStore, set: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = set {
        store.set_server_url(&url);
        return Ok(());
    }

    match store.server_url() {
        Some(url) => println!("{}", url),
        None => println!("null"),
    }
    Ok(())
}

/// Show or replace the raw configuration JSON
fn config_json(
    store: &ConfigStore,
    set: Option<String>,
    file: Option<std::path::PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let new_json = match (set, file) {
        (Some(json), _) => Some(json),
        (None, Some(path)) => Some(std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read configuration from {}: {e}. Make sure the file exists and is readable.",
                path.display()
            )
        })?),
        (None, None) => None,
    };

    if let Some(json) = new_json {
        // Stored as given; evaluation treats an unparsable blob as empty
        if let Err(e) = ExperimentConfig::parse(&json) {
            log::warn!("Storing configuration that does not parse: {}", e);
        }
        store.set_config_json(&json);
        return Ok(());
    }

    match store.config_json() {
        Some(json) => println!("{}", json),
        None => println!("null"),
    }
    Ok(())
}

/// Print an experiment's values payload as JSON
fn experiment_values(store: &ConfigStore, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    match store.experiment_values(name) {
        Some(values) => println!("{}", serde_json::to_string_pretty(&values)?),
        None => println!("null"),
    }
    Ok(())
}

/// Print the parsed experiments, filtered by glob patterns
fn list_experiments(
    store: &ConfigStore,
    queries: &[String],
    output_type: cli::OutputType,
) -> Result<(), Box<dyn std::error::Error>> {
    let patterns: Vec<&str> = queries.iter().map(String::as_str).collect();
    let experiments = query_experiments(&store.experiments(), &patterns)
        .map_err(|e| anyhow::anyhow!("Failed to apply query: {}", e))?;

    let json = match output_type {
        cli::OutputType::JsonObject => serde_json::to_string_pretty(&experiments)?,
        cli::OutputType::JsonArray => serde_json::to_string_pretty(&experiments.entries())?,
    };

    println!("{}", json);
    Ok(())
}
